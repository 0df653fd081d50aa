mod config;
mod core;
mod entry;
mod metrics;
mod policy;

pub use config::CacheConfig;
pub use core::Cache;
pub use entry::CacheEntry;
pub use metrics::{CacheMetrics, CacheMetricsSnapshot};
