//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tracker_requests_total` (counter): requests by route, status
//! - `tracker_request_duration_seconds` (histogram): latency by route
//! - `tracker_identifiers_total` (counter): identifier outcomes by role
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::cookies::Reconciliation;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    counter!(
        "tracker_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("tracker_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record what happened to each identifier role.
pub fn record_reconciliation(reconciliation: &Reconciliation) {
    counter!(
        "tracker_identifiers_total",
        "role" => "primary",
        "outcome" => reconciliation.primary_outcome.as_str()
    )
    .increment(1);
    counter!(
        "tracker_identifiers_total",
        "role" => "secondary",
        "outcome" => reconciliation.secondary_outcome.as_str()
    )
    .increment(1);
}
