use presscore::cache::{Cache, CacheConfig};
use serde_json::json;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test]
async fn test_set_and_get() {
    let cache = Cache::new(10);
    cache.set("post:1", json!({"title": "hello"}));

    assert_eq!(cache.get("post:1"), Some(json!({"title": "hello"})));
    let snap = cache.metrics_snapshot();
    assert_eq!(snap.hits, 1);
    assert_eq!(snap.inserts, 1);
}

#[tokio::test]
async fn test_never_set_key_is_absent() {
    let cache: Cache<u64> = Cache::new(10);
    assert!(cache.get("nope").is_none());
    let snap = cache.metrics_snapshot();
    assert_eq!(snap.hits, 0);
    assert_eq!(snap.misses, 1);
}

#[tokio::test]
async fn test_ttl_expiry_reads_as_absent() {
    let cache = Cache::new(10);
    cache.set_with_ttl("k", 1u64, Duration::from_millis(30));
    assert_eq!(cache.get("k"), Some(1));

    sleep(Duration::from_millis(60)).await;

    // Never explicitly deleted, but expired entries behave as absent.
    assert!(cache.get("k").is_none());
    let snap = cache.metrics_snapshot();
    assert!(snap.ttl_evictions >= 1, "lazy expiry should count as ttl eviction");
    assert!(snap.misses >= 1, "lazy expiry should count as miss");
}

#[tokio::test]
async fn test_purge_trigger_without_background_thread() {
    let cfg = CacheConfig { capacity: 8, purge_interval_secs: 60, ..Default::default() };
    let cache = Cache::with_config(cfg);
    cache.set_with_ttl("short", 1u64, Duration::from_millis(10));
    cache.set_with_ttl("long", 2u64, Duration::from_secs(60));
    sleep(Duration::from_millis(30)).await;

    let evicted = cache.purge_expired_now();
    assert_eq!(evicted, 1);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("long"), Some(2));
}

#[tokio::test]
async fn test_capacity_plus_one_evicts_exactly_one() {
    let cache = Cache::new(3);
    cache.set("a", 1u64);
    cache.set("b", 2u64);
    cache.set("c", 3u64);
    cache.set("d", 4u64);

    let snap = cache.metrics_snapshot();
    assert_eq!(snap.lru_evictions, 1);
    // "a" was the least recently accessed
    assert!(cache.get("a").is_none());
    assert_eq!(cache.get("b"), Some(2));
    assert_eq!(cache.get("c"), Some(3));
    assert_eq!(cache.get("d"), Some(4));
}

#[tokio::test]
async fn test_get_refreshes_recency_for_eviction() {
    // capacity 2: set a, set b, get a, set c => b is the LRU victim
    let cache = Cache::new(2);
    cache.set("a", 1u64);
    cache.set("b", 2u64);
    assert_eq!(cache.get("a"), Some(1));
    cache.set("c", 3u64);

    assert_eq!(cache.get("a"), Some(1));
    assert!(cache.get("b").is_none());
    assert_eq!(cache.get("c"), Some(3));
}

#[tokio::test]
async fn test_get_does_not_refresh_ttl() {
    let cache = Cache::new(4);
    cache.set_with_ttl("k", 1u64, Duration::from_millis(80));

    sleep(Duration::from_millis(50)).await;
    assert_eq!(cache.get("k"), Some(1));

    // The read above must not have extended the deadline.
    sleep(Duration::from_millis(50)).await;
    assert!(cache.get("k").is_none());
}

#[tokio::test]
async fn test_replace_resets_ttl() {
    let cache = Cache::new(4);
    cache.set_with_ttl("k", 1u64, Duration::from_millis(60));
    sleep(Duration::from_millis(40)).await;

    cache.set_with_ttl("k", 2u64, Duration::from_millis(60));
    sleep(Duration::from_millis(40)).await;

    // 80ms after the first insert, but only 40ms into the replacement's TTL.
    assert_eq!(cache.get("k"), Some(2));
    // A replace is not an eviction.
    assert_eq!(cache.metrics_snapshot().lru_evictions, 0);
}

#[tokio::test]
async fn test_expired_entries_yield_before_live_ones() {
    let cache = Cache::new(2);
    cache.set_with_ttl("stale", 1u64, Duration::from_millis(10));
    cache.set_with_ttl("fresh", 2u64, Duration::from_secs(60));
    sleep(Duration::from_millis(30)).await;

    // At capacity, the expired entry is purged to make room; the live entry
    // survives even though it is not in the MRU slot.
    cache.set_with_ttl("new", 3u64, Duration::from_secs(60));
    assert_eq!(cache.get("fresh"), Some(2));
    assert_eq!(cache.get("new"), Some(3));
    assert_eq!(cache.metrics_snapshot().lru_evictions, 0);
}

#[tokio::test]
async fn test_delete_and_clear() {
    let cache = Cache::new(10);
    cache.set("a", 1u64);
    cache.set("b", 2u64);

    assert!(cache.delete("a"));
    assert!(!cache.delete("a"));
    assert!(cache.get("a").is_none());
    assert_eq!(cache.metrics_snapshot().removes, 1);

    cache.set("c", 3u64);
    cache.clear();
    assert!(cache.get("b").is_none());
    assert!(cache.get("c").is_none());
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_contains_treats_expired_as_absent() {
    let cache = Cache::new(4);
    cache.set_with_ttl("k", 1u64, Duration::from_millis(20));
    assert!(cache.contains("k"));

    sleep(Duration::from_millis(40)).await;
    assert!(!cache.contains("k"));
    // contains is a peek; it must not have recorded a hit or miss
    let snap = cache.metrics_snapshot();
    assert_eq!(snap.hits + snap.misses, 0);
}

#[tokio::test]
async fn test_background_purge_thread() {
    let cfg = CacheConfig { capacity: 8, purge_interval_secs: 1, ..Default::default() };
    let cache = Cache::with_config(cfg);
    cache.set_with_ttl("k", 1u64, Duration::from_millis(50));
    assert_eq!(cache.len(), 1);

    sleep(Duration::from_millis(2500)).await;

    // Physically removed without any read touching it.
    assert_eq!(cache.len(), 0);
    assert!(cache.metrics_snapshot().ttl_evictions >= 1);
}

#[tokio::test]
async fn test_set_capacity_resize() {
    let cache = Cache::new(10);
    for i in 0..10u64 {
        cache.set(&format!("k{i}"), i);
    }
    cache.set_capacity(2);
    assert!(cache.len() <= 2);
    // The two most recently used survive the shrink.
    assert_eq!(cache.get("k9"), Some(9));
    assert_eq!(cache.get("k8"), Some(8));
}

#[tokio::test]
async fn test_hit_rate() {
    let cache = Cache::new(10);
    cache.set("a", 1u64);
    let _ = cache.get("a");
    let _ = cache.get("a");
    let _ = cache.get("missing");

    let snap = cache.metrics_snapshot();
    assert_eq!(snap.hits, 2);
    assert_eq!(snap.misses, 1);
    assert!((snap.hit_rate() - 2.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_concurrent_writers_stay_consistent() {
    let cache = Cache::new(5);
    let c1 = cache.clone();
    let c2 = cache.clone();
    let t1 = tokio::spawn(async move {
        for i in 100..120u64 {
            c1.set(&format!("k{i}"), i);
        }
    });
    let t2 = tokio::spawn(async move {
        for i in 200..220u64 {
            c2.set(&format!("k{i}"), i);
        }
    });
    let _ = tokio::join!(t1, t2);

    assert!(cache.len() <= 5);
    assert_eq!(cache.metrics_snapshot().inserts, 40);
}
