//! Request-path performance recording.
//!
//! The recorder is an explicitly constructed sink handed to whatever needs
//! it; there is deliberately no process-wide instance to reach for.

use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

/// Per-metric samples kept; older measurements roll off.
const SAMPLE_WINDOW: usize = 100;

/// Cloneable sink for named duration samples (milliseconds).
#[derive(Clone, Default)]
pub struct PerfRecorder {
    samples: Arc<RwLock<HashMap<String, VecDeque<f64>>>>,
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct MetricSummary {
    pub average: f64,
    pub count: usize,
    pub latest: f64,
}

pub type PerfReport = HashMap<String, MetricSummary>;

impl PerfRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a sample, keeping only the last `SAMPLE_WINDOW` per name.
    pub fn record(&self, name: &str, ms: f64) {
        let mut map = self.samples.write();
        let ring = map.entry(name.to_string()).or_default();
        ring.push_back(ms);
        if ring.len() > SAMPLE_WINDOW {
            ring.pop_front();
        }
    }

    /// Average over the retained window; 0.0 when nothing was recorded.
    pub fn average(&self, name: &str) -> f64 {
        let map = self.samples.read();
        match map.get(name) {
            Some(ring) if !ring.is_empty() => {
                ring.iter().sum::<f64>() / ring.len() as f64
            }
            _ => 0.0,
        }
    }

    pub fn report(&self) -> PerfReport {
        let map = self.samples.read();
        map.iter()
            .map(|(name, ring)| {
                let count = ring.len();
                let average = if count == 0 {
                    0.0
                } else {
                    ring.iter().sum::<f64>() / count as f64
                };
                let latest = ring.back().copied().unwrap_or(0.0);
                (name.clone(), MetricSummary { average, count, latest })
            })
            .collect()
    }

    pub fn clear(&self) {
        self.samples.write().clear();
    }

    /// Times an async operation. Success records under `name`, failure under
    /// `{name}_error`; the error itself propagates unchanged.
    pub async fn measure<T, E, F, Fut>(&self, name: &str, op: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let start = Instant::now();
        let result = op().await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        match &result {
            Ok(_) => self.record(name, elapsed_ms),
            Err(_) => self.record(&format!("{name}_error"), elapsed_ms),
        }
        result
    }

    /// Database query wrapper; samples land under `db_{name}`.
    pub async fn measure_db<T, E, F, Fut>(&self, name: &str, query: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.measure(&format!("db_{name}"), query).await
    }

    /// API handler wrapper; samples land under `api_{endpoint}`.
    pub async fn measure_api<T, E, F, Fut>(&self, endpoint: &str, handler: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.measure(&format!("api_{endpoint}"), handler).await
    }
}

/// Alert thresholds over recorded averages.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub api_response_ms: f64,
    pub db_query_ms: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { api_response_ms: 1000.0, db_query_ms: 500.0 }
    }
}

impl Thresholds {
    /// Human-readable alerts for averages over threshold.
    pub fn check(&self, recorder: &PerfRecorder) -> Vec<String> {
        let mut alerts = Vec::new();

        let api_ms = recorder.average("api_response");
        if api_ms > self.api_response_ms {
            alerts.push(format!("API response time ({api_ms:.2}ms) exceeds threshold"));
        }

        let db_ms = recorder.average("db_query");
        if db_ms > self.db_query_ms {
            alerts.push(format!("Database query time ({db_ms:.2}ms) exceeds threshold"));
        }

        alerts
    }
}
