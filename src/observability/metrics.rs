//! Metrics collection.
//!
//! # Metrics
//! - `novapay_client_requests_total` (counter): outbound calls by operation, outcome
//! - `novapay_client_request_duration_seconds` (histogram): latency by operation
//!
//! Outcomes: `ok`, `rejected`, `transport`, `timeout`, `decode`.

use std::time::Duration;

/// Record one finished outbound call.
pub fn record_request(operation: &'static str, outcome: &'static str, elapsed: Duration) {
    metrics::counter!(
        "novapay_client_requests_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);

    metrics::histogram!(
        "novapay_client_request_duration_seconds",
        "operation" => operation
    )
    .record(elapsed.as_secs_f64());
}
