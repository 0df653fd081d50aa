use std::time::Duration;

/// Configuration for a cache instance.
#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub capacity: usize,
    /// Applied by `set` and by `get_or_compute` when no TTL is given.
    pub default_ttl: Duration,
    pub purge_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 500,
            default_ttl: Duration::from_secs(5 * 60),
            purge_interval_secs: 5,
        }
    }
}
