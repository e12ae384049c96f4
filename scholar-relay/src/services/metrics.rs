//! Prometheus metrics for scholar-relay.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;
use std::time::Instant;

static METRICS: OnceLock<RelayMetrics> = OnceLock::new();

struct RelayMetrics {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    upstream_latency_seconds: HistogramVec,
    upstream_errors_total: IntCounterVec,
    scholarship_match_results: Histogram,
}

impl RelayMetrics {
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
            )
            .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 15.0]),
            &["method", "path"],
        )?;

        let upstream_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "relay_upstream_latency_seconds",
                "Generative API latency in seconds",
            )
            .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 15.0]),
            &["provider", "feature", "outcome"],
        )?;

        let upstream_errors_total = IntCounterVec::new(
            Opts::new("relay_upstream_errors_total", "Total generative API errors"),
            &["provider", "error_type"],
        )?;

        let scholarship_match_results = Histogram::with_opts(
            HistogramOpts::new(
                "scholarship_match_results",
                "Number of scholarships returned per search",
            )
            .buckets(vec![0.0, 1.0, 3.0, 5.0, 10.0, 15.0]),
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(upstream_latency_seconds.clone()))?;
        registry.register(Box::new(upstream_errors_total.clone()))?;
        registry.register(Box::new(scholarship_match_results.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            upstream_latency_seconds,
            upstream_errors_total,
            scholarship_match_results,
        })
    }
}

/// Initialize all metrics. Later calls are no-ops.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    if METRICS.get().is_some() {
        return Ok(());
    }

    let metrics = RelayMetrics::new()?;
    if METRICS.set(metrics).is_ok() {
        tracing::info!("Prometheus metrics initialized");
    }
    Ok(())
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let Some(metrics) = METRICS.get() else {
        tracing::error!("Metrics registry not initialized");
        return "# Metrics registry not initialized\n".to_string();
    };

    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    if let Err(e) = encoder.encode(&metrics.registry.gather(), &mut buffer) {
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

/// Record a generative API call, successful or not.
pub fn record_upstream_call(provider: &str, feature: &str, outcome: &str, duration_secs: f64) {
    if let Some(m) = METRICS.get() {
        m.upstream_latency_seconds
            .with_label_values(&[provider, feature, outcome])
            .observe(duration_secs);
    }
}

pub fn record_upstream_error(provider: &str, error_type: &str) {
    if let Some(m) = METRICS.get() {
        m.upstream_errors_total
            .with_label_values(&[provider, error_type])
            .inc();
    }
}

pub fn record_scholarship_matches(count: usize) {
    if let Some(m) = METRICS.get() {
        m.scholarship_match_results.observe(count as f64);
    }
}

/// Counts requests and times them, labelled by route template.
pub async fn http_metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(req).await;

    if let Some(m) = METRICS.get() {
        let status = response.status().as_u16().to_string();
        m.http_requests_total
            .with_label_values(&[method.as_str(), path.as_str(), status.as_str()])
            .inc();
        m.http_request_duration_seconds
            .with_label_values(&[method.as_str(), path.as_str()])
            .observe(start.elapsed().as_secs_f64());
    }

    response
}
