//! Prometheus metrics for mentor-service.
//!
//! Covers the mentor endpoint and the AI provider call.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static MENTOR_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static PROVIDER_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static TOKENS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Must be called once at startup.
pub fn init_metrics() {
    let registry = Registry::new();

    let mentor_requests = IntCounterVec::new(
        Opts::new(
            "mentor_requests_total",
            "Total career mentor requests by outcome",
        ),
        &["status"], // ok, invalid_json, provider_error
    )
    .expect("Failed to create mentor_requests_total metric");

    let provider_latency = HistogramVec::new(
        HistogramOpts::new(
            "mentor_provider_latency_seconds",
            "AI provider API latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["model"],
    )
    .expect("Failed to create mentor_provider_latency_seconds metric");

    let provider_errors = IntCounterVec::new(
        Opts::new("mentor_provider_errors_total", "Total AI provider errors"),
        &["error_type"],
    )
    .expect("Failed to create mentor_provider_errors_total metric");

    let tokens = IntCounterVec::new(
        Opts::new("mentor_tokens_total", "Total tokens processed"),
        &["model", "type"], // type: input, output
    )
    .expect("Failed to create mentor_tokens_total metric");

    registry
        .register(Box::new(mentor_requests.clone()))
        .expect("Failed to register mentor_requests_total");
    registry
        .register(Box::new(provider_latency.clone()))
        .expect("Failed to register mentor_provider_latency_seconds");
    registry
        .register(Box::new(provider_errors.clone()))
        .expect("Failed to register mentor_provider_errors_total");
    registry
        .register(Box::new(tokens.clone()))
        .expect("Failed to register mentor_tokens_total");

    let _ = REGISTRY.set(registry);
    let _ = MENTOR_REQUESTS_TOTAL.set(mentor_requests);
    let _ = PROVIDER_LATENCY_SECONDS.set(provider_latency);
    let _ = PROVIDER_ERRORS_TOTAL.set(provider_errors);
    let _ = TOKENS_TOTAL.set(tokens);

    tracing::info!("Prometheus metrics initialized");
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let registry = match REGISTRY.get() {
        Some(r) => r,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    let metric_families = registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

// Helper functions for recording metrics

/// Record a completed mentor request by outcome.
pub fn record_mentor_request(status: &str) {
    if let Some(counter) = MENTOR_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[status]).inc();
    }
}

/// Record provider latency.
pub fn record_provider_latency(model: &str, duration_secs: f64) {
    if let Some(histogram) = PROVIDER_LATENCY_SECONDS.get() {
        histogram.with_label_values(&[model]).observe(duration_secs);
    }
}

/// Record a provider error.
pub fn record_provider_error(error_type: &str) {
    if let Some(counter) = PROVIDER_ERRORS_TOTAL.get() {
        counter.with_label_values(&[error_type]).inc();
    }
}

/// Record token usage.
pub fn record_tokens(model: &str, input_tokens: i32, output_tokens: i32) {
    if let Some(counter) = TOKENS_TOTAL.get() {
        counter
            .with_label_values(&[model, "input"])
            .inc_by(input_tokens as u64);
        counter
            .with_label_values(&[model, "output"])
            .inc_by(output_tokens as u64);
    }
}
