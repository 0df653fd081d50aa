use std::time::{Duration, Instant};

/// A cached value together with its insertion time and time-to-live.
///
/// TTL is measured from insertion. Reads refresh an entry's recency in the
/// LRU order but never its TTL.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub inserted_at: Instant,
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    pub fn new(value: V, ttl: Duration) -> Self {
        Self { value, inserted_at: Instant::now(), ttl }
    }

    /// An expired entry behaves as absent whether or not it has been purged.
    pub fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() >= self.ttl
    }
}
