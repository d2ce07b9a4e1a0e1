//! Prometheus metrics.
//!
//! Labels are bounded: `endpoint` is a route name and `outcome` is either
//! `success` or a failure classification. Credentials and messages are never
//! used as label values.

use prometheus::{
    HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

/// Metrics configuration
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Prefix for every metric name
    pub namespace: String,
    /// Histogram buckets for provider latency, in seconds
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            namespace: "assistant".to_string(),
            latency_buckets: vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0],
        }
    }
}

/// Gateway metrics registry
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    requests: IntCounterVec,
    provider_duration: HistogramVec,
}

impl Metrics {
    /// Create and register all metrics
    ///
    /// # Errors
    /// Returns error if a metric cannot be created or registered
    pub fn new(config: &MetricsConfig) -> Result<Self, crate::TelemetryError> {
        let registry = Registry::new_custom(Some(config.namespace.clone()), None)?;

        let requests = IntCounterVec::new(
            Opts::new("requests_total", "Requests handled, by endpoint and outcome"),
            &["endpoint", "outcome"],
        )?;
        let provider_duration = HistogramVec::new(
            HistogramOpts::new(
                "provider_duration_seconds",
                "Duration of provider calls, by outcome",
            )
            .buckets(config.latency_buckets.clone()),
            &["outcome"],
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(provider_duration.clone()))?;

        Ok(Self {
            registry,
            requests,
            provider_duration,
        })
    }

    /// Count one handled request
    pub fn record_request(&self, endpoint: &str, outcome: &str) {
        self.requests.with_label_values(&[endpoint, outcome]).inc();
    }

    /// Record the duration of one provider call
    pub fn observe_provider_call(&self, outcome: &str, duration: Duration) {
        self.provider_duration
            .with_label_values(&[outcome])
            .observe(duration.as_secs_f64());
    }

    /// Current request count for a label pair
    #[must_use]
    pub fn request_count(&self, endpoint: &str, outcome: &str) -> u64 {
        self.requests.with_label_values(&[endpoint, outcome]).get()
    }

    /// Render all metrics in the Prometheus text format
    #[must_use]
    pub fn gather(&self) -> String {
        TextEncoder::new()
            .encode_to_string(&self.registry.gather())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics").finish_non_exhaustive()
    }
}
