//! Prometheus metrics for assist-service.
//!
//! Provides dispatch and provider metrics for observability.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

static REGISTRY: OnceLock<Registry> = OnceLock::new();
static ACTION_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
static ACTION_DURATION_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
static PROVIDER_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

fn action_requests_total() -> &'static IntCounterVec {
    ACTION_REQUESTS_TOTAL.get_or_init(|| {
        let counter = IntCounterVec::new(
            Opts::new("action_requests_total", "Total dispatched action requests"),
            &["action", "status"],
        )
        .expect("Failed to create action_requests_total metric");
        registry()
            .register(Box::new(counter.clone()))
            .expect("Failed to register action_requests_total");
        counter
    })
}

fn action_duration_seconds() -> &'static HistogramVec {
    ACTION_DURATION_SECONDS.get_or_init(|| {
        let histogram = HistogramVec::new(
            HistogramOpts::new(
                "action_duration_seconds",
                "Action handling duration in seconds",
            )
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
            &["action"],
        )
        .expect("Failed to create action_duration_seconds metric");
        registry()
            .register(Box::new(histogram.clone()))
            .expect("Failed to register action_duration_seconds");
        histogram
    })
}

fn provider_errors_total() -> &'static IntCounterVec {
    PROVIDER_ERRORS_TOTAL.get_or_init(|| {
        let counter = IntCounterVec::new(
            Opts::new("provider_errors_total", "Total AI provider errors"),
            &["provider", "error_type"],
        )
        .expect("Failed to create provider_errors_total metric");
        registry()
            .register(Box::new(counter.clone()))
            .expect("Failed to register provider_errors_total");
        counter
    })
}

/// Record one dispatched action with its outcome and duration.
pub fn record_action(action: &str, status: &str, seconds: f64) {
    action_requests_total()
        .with_label_values(&[action, status])
        .inc();
    action_duration_seconds()
        .with_label_values(&[action])
        .observe(seconds);
}

/// Record one provider failure.
pub fn record_provider_error(provider: &str, error_type: &str) {
    provider_errors_total()
        .with_label_values(&[provider, error_type])
        .inc();
}

/// Render all registered metrics in Prometheus text format.
pub fn render() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    if let Err(e) = encoder.encode(&registry().gather(), &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
