//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define map server metrics (requests, latency, classifications)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `streets_http_requests_total` (counter): requests by method, status
//! - `streets_http_request_duration_seconds` (histogram): latency distribution
//! - `streets_classifications_total` (counter): classified names by color
//! - `streets_rules_loaded` (gauge): rules in the active classifier
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - The classifier itself stays pure; callers record

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::classify::Color;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];
    counter!("streets_http_requests_total", &labels).increment(1);
    histogram!("streets_http_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}

pub fn record_classification(color: Color) {
    counter!("streets_classifications_total", "color" => color.to_string()).increment(1);
}

pub fn record_rules_loaded(count: usize) {
    gauge!("streets_rules_loaded").set(count as f64);
}
