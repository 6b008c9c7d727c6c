//! Prometheus metrics for application observability.
//!
//! Metrics are exposed via a dedicated HTTP listener (default port 9090)
//! when enabled in [`Config`](crate::Config). Without an installed recorder
//! every `record_*` call is a no-op, which keeps tests free of global state.
//!
//! # Available Metrics
//!
//! ## Counters
//! - `users_api_http_requests_total` - Requests seen by the logging stage (labels: method, status)
//! - `users_api_auth_rejections_total` - Requests rejected by the authentication stage
//! - `users_api_unhandled_faults_total` - Panics converted to 500 by the exception stage
//!
//! ## Histograms
//! - `users_api_http_request_duration_seconds` - Request duration (labels: method, status)
//!
//! ## Gauges
//! - `users_api_users_stored` - Current number of users in the store

use std::net::SocketAddr;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;

/// Metric names as constants for consistency.
pub mod names {
    pub const HTTP_REQUESTS_TOTAL: &str = "users_api_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "users_api_http_request_duration_seconds";
    pub const AUTH_REJECTIONS_TOTAL: &str = "users_api_auth_rejections_total";
    pub const UNHANDLED_FAULTS_TOTAL: &str = "users_api_unhandled_faults_total";
    pub const USERS_STORED: &str = "users_api_users_stored";
}

/// Initialize the Prometheus metrics exporter.
///
/// # Errors
///
/// Returns a message if the exporter cannot be installed (e.g. the port is
/// taken or a recorder is already set).
pub fn init_metrics(metrics_addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(metrics_addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {e}"))?;

    describe_counter!(
        names::HTTP_REQUESTS_TOTAL,
        "Total number of HTTP requests that completed the pipeline"
    );
    describe_counter!(
        names::AUTH_REJECTIONS_TOTAL,
        "Total number of requests rejected for a missing or wrong bearer token"
    );
    describe_counter!(
        names::UNHANDLED_FAULTS_TOTAL,
        "Total number of unhandled faults normalized to 500 responses"
    );
    describe_histogram!(
        names::HTTP_REQUEST_DURATION_SECONDS,
        "HTTP request duration in seconds"
    );
    describe_gauge!(names::USERS_STORED, "Number of users currently stored");

    info!(addr = %metrics_addr, "Prometheus metrics endpoint started");
    Ok(())
}

/// Record a completed request.
pub fn record_request(method: &str, status: u16, duration_secs: f64) {
    let status = status.to_string();
    counter!(
        names::HTTP_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "status" => status.clone()
    )
    .increment(1);
    histogram!(
        names::HTTP_REQUEST_DURATION_SECONDS,
        "method" => method.to_string(),
        "status" => status
    )
    .record(duration_secs);
}

/// Record a request turned away by the authentication stage.
pub fn record_auth_rejection() {
    counter!(names::AUTH_REJECTIONS_TOTAL).increment(1);
}

/// Record a panic caught by the exception stage.
pub fn record_unhandled_fault() {
    counter!(names::UNHANDLED_FAULTS_TOTAL).increment(1);
}

/// Update the stored-users gauge.
#[allow(clippy::cast_precision_loss)]
pub fn record_users_stored(count: usize) {
    gauge!(names::USERS_STORED).set(count as f64);
}
