//! # Gateway Telemetry
//!
//! Observability for the assistant gateway.
//!
//! This crate provides:
//! - Structured logging setup (pretty or JSON)
//! - Prometheus request and provider-latency metrics

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod logging;
pub mod metrics;

// Re-export main types
pub use logging::{init_logging, LoggingConfig};
pub use metrics::{Metrics, MetricsConfig};

/// Telemetry initialization error
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to install the log subscriber
    #[error("Failed to initialize logging: {0}")]
    Init(String),
    /// Failed to create or register a metric
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}
