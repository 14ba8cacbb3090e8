//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by method, status, upstream
//! - `proxy_request_duration_seconds` (histogram): end-to-end latency by upstream
//! - `proxy_token_refresh_total` (counter): installation token exchanges by outcome

use std::net::SocketAddr;
use std::time::Instant;

use ::metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a completed proxied request.
pub fn record_request(method: &str, status: u16, upstream: &'static str, start: Instant) {
    counter!(
        "proxy_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "upstream" => upstream
    )
    .increment(1);

    histogram!("proxy_request_duration_seconds", "upstream" => upstream)
        .record(start.elapsed().as_secs_f64());
}

/// Record an installation token exchange.
pub fn record_token_refresh(outcome: &'static str) {
    counter!("proxy_token_refresh_total", "outcome" => outcome).increment(1);
}
