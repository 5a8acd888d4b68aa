//! Metrics collection and exposition.
//!
//! # Metrics
//! - `posts_proxy_requests_total` (counter): requests by operation, method, status
//! - `posts_proxy_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - The Prometheus exporter serves its own listener

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "posts_proxy_requests_total";
pub const REQUEST_DURATION: &str = "posts_proxy_request_duration_seconds";

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished request.
pub fn record_request(operation: &'static str, method: &str, status: u16, start: Instant) {
    let status = status.to_string();
    metrics::counter!(
        REQUESTS_TOTAL,
        "operation" => operation,
        "method" => method.to_string(),
        "status" => status.clone()
    )
    .increment(1);
    metrics::histogram!(
        REQUEST_DURATION,
        "operation" => operation,
        "method" => method.to_string(),
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_exporter_is_noop() {
        record_request("list", "GET", 200, Instant::now());
    }
}
