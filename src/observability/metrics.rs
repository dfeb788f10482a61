//! Metrics collection and exposition.
//!
//! # Metrics
//! - `quicksearch_requests_total` (counter): requests by route, status
//! - `quicksearch_request_duration_seconds` (histogram): latency by route

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "quicksearch_requests_total";
pub const REQUEST_DURATION: &str = "quicksearch_request_duration_seconds";

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one handled request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    metrics::counter!(REQUESTS_TOTAL, "route" => route, "status" => status.to_string()).increment(1);
    metrics::histogram!(REQUEST_DURATION, "route" => route).record(start.elapsed().as_secs_f64());
}
