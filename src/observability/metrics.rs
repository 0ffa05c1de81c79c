//! Metrics collection and exposition.
//!
//! # Metrics
//! - `skill_invocations_total` (counter): invocations by request type, outcome
//! - `skill_invocation_duration_seconds` (histogram): latency distribution
//! - `skill_handler_errors_total` (counter): dispatches recovered by an error handler
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A request handler produced the response.
    Ok,
    /// An error handler produced the response.
    Recovered,
    /// The envelope was refused before dispatch.
    Rejected,
    /// No error handler accepted the failure.
    Failed,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::Recovered => "recovered",
            Outcome::Rejected => "rejected",
            Outcome::Failed => "failed",
        }
    }
}

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one skill invocation.
pub fn record_invocation(request_type: &'static str, outcome: Outcome, start: Instant) {
    metrics::counter!(
        "skill_invocations_total",
        "request_type" => request_type,
        "outcome" => outcome.as_str()
    )
    .increment(1);

    metrics::histogram!("skill_invocation_duration_seconds", "request_type" => request_type)
        .record(start.elapsed().as_secs_f64());

    if outcome == Outcome::Recovered {
        metrics::counter!("skill_handler_errors_total", "request_type" => request_type).increment(1);
    }
}
