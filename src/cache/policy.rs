use crate::cache::entry::CacheEntry;
use crate::cache::metrics::CacheMetrics;
use lru::LruCache;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::Ordering;

/// Removes expired entries from the cache. Returns number evicted.
pub fn purge_expired<V>(
    store: &Arc<RwLock<LruCache<String, CacheEntry<V>>>>,
    metrics: &Arc<CacheMetrics>,
) -> usize {
    let mut cache = store.write();
    let expired_keys: Vec<String> =
        cache.iter().filter(|(_, e)| e.is_expired()).map(|(k, _)| k.clone()).collect();

    let count = expired_keys.len();
    for key in &expired_keys {
        cache.pop(key);
    }
    if count > 0 {
        metrics.ttl_evictions.fetch_add(count as u64, Ordering::Relaxed);
        log::debug!("ttl purge evicted {count} expired entries");
    }
    count
}
