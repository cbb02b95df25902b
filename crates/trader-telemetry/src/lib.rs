//! # Trader Telemetry
//!
//! Logging and metrics for the trader client.
//!
//! - **Logs**: `tracing` events rendered by `tracing-subscriber`, either as
//!   human-readable lines or as JSON for log shippers.
//! - **Metrics**: Prometheus counters for the batch lifecycle, gathered from
//!   the process-wide registry.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trader_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TRADER_SERVICE_NAME` | `trader-client` | Service name in log records |
//! | `TRADER_LOG_LEVEL` | `info` | Log filter (falls back to `RUST_LOG`) |
//! | `TRADER_JSON_LOGS` | `false` | Emit JSON log lines |
//! | `TRADER_CONSOLE_OUTPUT` | `true` | Write logs to stdout at all |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{init_logging, LoggingGuard};
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, ACCOUNTS_ADDED, BATCHES_COMMITTED,
    BATCHES_STAGED, BATCH_COMMIT_DURATION, BATCH_COMMIT_FAILURES, ORDERS_SUBMITTED,
    STAGED_ENTITIES,
};

use thiserror::Error;

/// Telemetry initialization errors.
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and register metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics = register_metrics()?;
    let logging = init_logging(&config)?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        _logging: logging,
        _metrics: metrics,
    })
}

/// Keeps telemetry active. Drop to shut down.
pub struct TelemetryGuard {
    _logging: LoggingGuard,
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

/// Increment a counter, optionally with label values.
///
/// ```rust,ignore
/// metric_inc!(BATCHES_STAGED);
/// metric_inc!(BATCH_COMMIT_FAILURES, &["mismatch"]);
/// ```
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}
