//! Prometheus metrics for the trader client.
//!
//! All metrics follow the naming convention: `trader_<component>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Gauge, Histogram, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // BATCH LIFECYCLE
    // =========================================================================

    /// Pending batches written (including overwrites)
    pub static ref BATCHES_STAGED: Counter = Counter::new(
        "trader_db_batches_staged_total",
        "Total number of pending batches staged"
    ).expect("metric creation failed");

    /// Pending batches applied
    pub static ref BATCHES_COMMITTED: Counter = Counter::new(
        "trader_db_batches_committed_total",
        "Total number of pending batches committed"
    ).expect("metric creation failed");

    /// Rejected commit attempts by reason
    pub static ref BATCH_COMMIT_FAILURES: CounterVec = CounterVec::new(
        Opts::new("trader_db_batch_commit_failures_total", "Failed batch commits by reason"),
        &["reason"]  // no_pending, id_mismatch, not_found, storage
    ).expect("metric creation failed");

    /// Entities referenced by the currently staged batch
    pub static ref STAGED_ENTITIES: Gauge = Gauge::new(
        "trader_db_staged_entities",
        "Orders and accounts referenced by the pending batch"
    ).expect("metric creation failed");

    /// Commit duration
    pub static ref BATCH_COMMIT_DURATION: Histogram = Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "trader_db_batch_commit_duration_seconds",
            "Time spent applying a pending batch"
        ).buckets(exponential_buckets(0.0001, 2.0, 12).expect("valid buckets"))
    ).expect("metric creation failed");

    // =========================================================================
    // ENTITY STORE
    // =========================================================================

    /// Orders inserted
    pub static ref ORDERS_SUBMITTED: Counter = Counter::new(
        "trader_db_orders_submitted_total",
        "Total number of orders stored"
    ).expect("metric creation failed");

    /// Accounts inserted
    pub static ref ACCOUNTS_ADDED: Counter = Counter::new(
        "trader_db_accounts_added_total",
        "Total number of accounts stored"
    ).expect("metric creation failed");
}

/// Handle for the registered metrics
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(BATCHES_STAGED.clone()),
        Box::new(BATCHES_COMMITTED.clone()),
        Box::new(BATCH_COMMIT_FAILURES.clone()),
        Box::new(STAGED_ENTITIES.clone()),
        Box::new(BATCH_COMMIT_DURATION.clone()),
        Box::new(ORDERS_SUBMITTED.clone()),
        Box::new(ACCOUNTS_ADDED.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}
