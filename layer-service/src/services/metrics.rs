//! Prometheus metrics for layer-service.
//!
//! HTTP traffic plus provider latency and failures, exposed at `/metrics`.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;
use std::time::Duration;

static METRICS: OnceLock<Metrics> = OnceLock::new();

struct Metrics {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    provider_latency_seconds: HistogramVec,
    provider_errors_total: IntCounterVec,
}

impl Metrics {
    fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "path", "status"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            ),
            &["method", "path", "status"],
        )?;

        // Image generation routinely takes tens of seconds.
        let provider_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "genai_provider_latency_seconds",
                "AI provider API latency in seconds",
            )
            .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
            &["provider", "operation"],
        )?;

        let provider_errors_total = IntCounterVec::new(
            Opts::new("genai_provider_errors_total", "Total AI provider errors"),
            &["provider", "operation", "error_type"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(provider_latency_seconds.clone()))?;
        registry.register(Box::new(provider_errors_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            provider_latency_seconds,
            provider_errors_total,
        })
    }
}

/// Initialize all metrics. Safe to call more than once.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    if METRICS.get().is_none() {
        let _ = METRICS.set(Metrics::new()?);
    }
    Ok(())
}

pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    if let Some(metrics) = METRICS.get() {
        let status = status.to_string();
        let labels = [method, path, status.as_str()];
        metrics.http_requests_total.with_label_values(&labels).inc();
        metrics
            .http_request_duration_seconds
            .with_label_values(&labels)
            .observe(duration.as_secs_f64());
    }
}

pub fn record_provider_call(
    provider: &str,
    operation: &str,
    duration: Duration,
    error_type: Option<&str>,
) {
    if let Some(metrics) = METRICS.get() {
        metrics
            .provider_latency_seconds
            .with_label_values(&[provider, operation])
            .observe(duration.as_secs_f64());

        if let Some(error_type) = error_type {
            metrics
                .provider_errors_total
                .with_label_values(&[provider, operation, error_type])
                .inc();
        }
    }
}

/// Render all metrics in the Prometheus text format.
pub fn get_metrics() -> String {
    let Some(metrics) = METRICS.get() else {
        return String::new();
    };

    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    if let Err(e) = encoder.encode(&metrics.registry.gather(), &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_requests_show_up_in_output() {
        init_metrics().unwrap();
        init_metrics().unwrap();

        record_http_request("GET", "/health", 200, Duration::from_millis(3));
        record_provider_call("mock", "generate_image", Duration::from_secs(1), Some("api_error"));

        let output = get_metrics();
        assert!(output.contains("http_requests_total"));
        assert!(output.contains("path=\"/health\""));
        assert!(output.contains("genai_provider_errors_total"));
        assert!(output.contains("error_type=\"api_error\""));
    }
}
