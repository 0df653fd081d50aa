pub mod cache;
pub mod errors;
pub mod keys;
pub mod logger;
pub mod perf;
pub mod publish;

use crate::cache::{Cache, CacheConfig};
use serde_json::Value;
use std::time::Duration;

/// Per-category caches for the web tier.
///
/// Separate instances keep listings, profiles, and search results from
/// competing for the same capacity. Handlers compose keys via [`keys`] and
/// write sides call the invalidation helpers, which delete the handful of
/// keys a write plausibly touched. Invalidation is best-effort: anything it
/// misses stays visible until its TTL runs out.
pub struct Caches {
    pub users: Cache<Value>,
    pub posts: Cache<Value>,
    pub search: Cache<Value>,
}

impl Caches {
    pub fn new() -> Self {
        Self {
            users: Cache::with_config(CacheConfig {
                capacity: 1000,
                default_ttl: Duration::from_secs(10 * 60),
                ..Default::default()
            }),
            posts: Cache::with_config(CacheConfig {
                capacity: 500,
                default_ttl: Duration::from_secs(5 * 60),
                ..Default::default()
            }),
            search: Cache::with_config(CacheConfig {
                capacity: 200,
                default_ttl: Duration::from_secs(2 * 60),
                ..Default::default()
            }),
        }
    }

    /// Drops the cached profile, stats, and first ten pages of a user's posts.
    pub fn invalidate_user(&self, user_id: &str) {
        self.users.delete(&keys::user(user_id));
        self.users.delete(&keys::user_stats(user_id));
        for page in 1..=10 {
            self.users.delete(&keys::user_posts(user_id, page));
        }
    }

    /// Drops a post and the first pages of the default listing, and resets
    /// search results that may embed the old version.
    pub fn invalidate_post(&self, post_id: &str) {
        self.posts.delete(&keys::post(post_id));
        for page in 1..=5 {
            self.posts.delete(&keys::post_list(page, 10));
        }
        self.search.clear();
    }

    pub fn clear_all(&self) {
        self.users.clear();
        self.posts.clear();
        self.search.clear();
    }
}

impl Default for Caches {
    fn default() -> Self {
        Self::new()
    }
}

/// Initializes the library's logging.
///
/// Call once before any other operation.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    logger::init()?;
    Ok(())
}
