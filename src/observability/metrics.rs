//! Metrics collection and exposition.
//!
//! # Metrics
//! - `speedtest_requests_total` (counter): requests by method, route, status
//! - `speedtest_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Prometheus-compatible endpoint on its own listener, config-gated
//! - Label cardinality stays bounded: the route set is fixed

use std::net::SocketAddr;
use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    counter!("speedtest_requests_total", &labels).increment(1);
    histogram!("speedtest_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Axum middleware recording every request.
pub async fn track(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request.uri().path().to_string();

    let response = next.run(request).await;
    record_request(&method, response.status().as_u16(), &route, start);
    response
}
