//! Metrics collection and exposition.
//!
//! # Metrics
//! - `search_requests_total` (counter): requests by HTTP status
//! - `search_request_duration_seconds` (histogram): end-to-end latency
//! - `search_upstream_errors_total` (counter): upstream failures by kind
//! - `search_products_returned` (histogram): products per successful response
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(status: u16, start_time: Instant) {
    metrics::counter!("search_requests_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("search_request_duration_seconds")
        .record(start_time.elapsed().as_secs_f64());
}

pub fn record_upstream_error(kind: &'static str) {
    metrics::counter!("search_upstream_errors_total", "kind" => kind).increment(1);
}

pub fn record_products(count: usize) {
    metrics::histogram!("search_products_returned").record(count as f64);
}
