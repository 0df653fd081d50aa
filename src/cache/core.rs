use crate::cache::config::CacheConfig;
use crate::cache::entry::CacheEntry;
use crate::cache::metrics::{CacheMetrics, CacheMetricsSnapshot};
use crate::cache::policy::purge_expired;
use lru::LruCache;
use parking_lot::RwLock;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

/// A thread-safe, in-memory cache with per-entry TTL expiry and LRU eviction
/// at capacity.
///
/// One instance is created per data category and lives for the process
/// lifetime. Cloning is cheap and shares the underlying store. The cache
/// itself never raises errors; anything inconsistent degrades to a miss.
#[derive(Clone)]
pub struct Cache<V> {
    store: Arc<RwLock<LruCache<String, CacheEntry<V>>>>,
    config: Arc<RwLock<CacheConfig>>, // runtime adjustable
    metrics: Arc<CacheMetrics>,
}

impl<V: Clone + Send + Sync + 'static> Cache<V> {
    /// Creates a new cache with a given capacity and starts the TTL purge task.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(CacheConfig { capacity, ..Default::default() })
    }

    /// Creates a new cache with the provided configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        let cache = Cache {
            store: Arc::new(RwLock::new(LruCache::new(nonzero(config.capacity)))),
            config: Arc::new(RwLock::new(config)),
            metrics: Arc::new(CacheMetrics::default()),
        };

        // Background thread for TTL purging. Holds only weak references so it
        // winds down once the last cache handle is dropped.
        let store = Arc::downgrade(&cache.store);
        let config = Arc::downgrade(&cache.config);
        let metrics = Arc::downgrade(&cache.metrics);
        std::thread::spawn(move || {
            loop {
                let secs = match config.upgrade() {
                    Some(cfg) => cfg.read().purge_interval_secs,
                    None => break,
                };
                std::thread::sleep(Duration::from_secs(secs.max(1)));
                match (store.upgrade(), metrics.upgrade()) {
                    (Some(store), Some(metrics)) => {
                        purge_expired(&store, &metrics);
                    }
                    _ => break,
                }
            }
        });

        cache
    }

    /// Returns the value if present and unexpired.
    ///
    /// A hit refreshes the entry's recency in the LRU order but not its TTL.
    /// An expired entry is lazily evicted and reads as a miss.
    pub fn get(&self, key: &str) -> Option<V> {
        let start = Instant::now();
        let mut guard = self.store.write();
        let result = if let Some(entry) = guard.get(key) {
            if entry.is_expired() {
                // Lazy eviction on access
                guard.pop(key);
                self.metrics.ttl_evictions.fetch_add(1, Ordering::Relaxed);
                self.metrics.misses.fetch_add(1, Ordering::Relaxed);
                None
            } else {
                self.metrics.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value.clone())
            }
        } else {
            self.metrics.misses.fetch_add(1, Ordering::Relaxed);
            None
        };
        drop(guard);
        self.metrics.total_get_ns.fetch_add(start.elapsed().as_nanos() as u64, Ordering::Relaxed);
        result
    }

    /// Inserts or replaces under the configured default TTL.
    pub fn set(&self, key: &str, value: V) {
        let ttl = self.config.read().default_ttl;
        self.set_with_ttl(key, value, ttl);
    }

    /// Inserts or replaces with an explicit TTL.
    ///
    /// Replacing an existing key resets its insertion time, so the TTL starts
    /// over. When at capacity, expired entries are purged first; if the cache
    /// is still full the least-recently-used entry is evicted.
    pub fn set_with_ttl(&self, key: &str, value: V, ttl: Duration) {
        let start = Instant::now();
        {
            let guard = self.store.read();
            let full = guard.len() >= guard.cap().get() && !guard.contains(key);
            drop(guard);
            if full {
                purge_expired(&self.store, &self.metrics);
            }
        }

        let mut guard = self.store.write();
        if let Some((evicted_key, _)) = guard.push(key.to_string(), CacheEntry::new(value, ttl)) {
            // push returns the displaced LRU victim, or the old entry when the
            // key was already present (a replace, not an eviction).
            if evicted_key != key {
                self.metrics.lru_evictions.fetch_add(1, Ordering::Relaxed);
                log::debug!("lru eviction of {evicted_key} to admit {key}");
            }
        }
        drop(guard);
        self.metrics.inserts.fetch_add(1, Ordering::Relaxed);
        self.metrics
            .total_insert_ns
            .fetch_add(start.elapsed().as_nanos() as u64, Ordering::Relaxed);
    }

    /// Returns the cached value, computing and storing it on a miss.
    ///
    /// The producer is awaited with no lock held; its failure propagates to
    /// the caller and nothing is cached. Two concurrent callers missing on
    /// the same key may both invoke their producer; last write wins.
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        producer: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }
        let value = producer().await?;
        let ttl = ttl.unwrap_or_else(|| self.config.read().default_ttl);
        self.set_with_ttl(key, value.clone(), ttl);
        Ok(value)
    }

    /// Explicitly removes a key. Returns whether an entry was present.
    pub fn delete(&self, key: &str) -> bool {
        let removed = self.store.write().pop(key).is_some();
        if removed {
            self.metrics.removes.fetch_add(1, Ordering::Relaxed);
        }
        removed
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.store.write().clear();
    }

    /// Whether a live entry exists. Does not disturb recency.
    pub fn contains(&self, key: &str) -> bool {
        self.store.read().peek(key).is_some_and(|e| !e.is_expired())
    }

    /// Number of stored entries, including any not-yet-purged expired ones.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    /// Force a TTL purge now. Returns number evicted.
    pub fn purge_expired_now(&self) -> usize {
        purge_expired(&self.store, &self.metrics)
    }

    /// Get a snapshot of metrics.
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Runtime config updates
    pub fn set_capacity(&self, capacity: usize) {
        let nz = nonzero(capacity);
        self.config.write().capacity = nz.get();
        self.store.write().resize(nz);
    }

    pub fn set_default_ttl(&self, ttl: Duration) {
        self.config.write().default_ttl = ttl;
    }

    pub fn set_purge_interval_secs(&self, secs: u64) {
        self.config.write().purge_interval_secs = secs.max(1);
    }
}

fn nonzero(capacity: usize) -> NonZeroUsize {
    NonZeroUsize::new(capacity.max(1))
        .unwrap_or_else(|| NonZeroUsize::new(1).expect("NonZeroUsize(1) must exist"))
}
