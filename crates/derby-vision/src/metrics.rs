//! Vision client metrics.
//!
//! Provides standardized metrics for monitoring inference calls:
//! - Request counters by outcome and status
//! - Latency histogram
//! - Simulated response and failure counters

use metrics::{counter, histogram};

// =============================================================================
// Metric Names
// =============================================================================

/// Metric name constants for consistency.
pub mod names {
    /// Total inference requests by outcome and HTTP status.
    pub const REQUESTS_TOTAL: &str = "vision_requests_total";

    /// Inference request latency in seconds.
    pub const LATENCY_SECONDS: &str = "vision_latency_seconds";

    /// Total responses served by the simulator.
    pub const SIMULATED_TOTAL: &str = "vision_simulated_total";

    /// Total failed recognitions by error kind.
    pub const FAILURES_TOTAL: &str = "vision_failures_total";
}

// =============================================================================
// Recording Functions
// =============================================================================

/// Record metrics for a completed inference request.
pub fn record_request(status: u16, latency_ms: f64) {
    let outcome = if (200..300).contains(&status) {
        "success"
    } else {
        "error"
    };

    counter!(
        names::REQUESTS_TOTAL,
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(names::LATENCY_SECONDS).record(latency_ms / 1000.0);
}

/// Record a response served by the simulator.
pub fn record_simulated() {
    counter!(names::SIMULATED_TOTAL).increment(1);
}

/// Record a failed recognition.
pub fn record_failure(kind: &'static str) {
    counter!(names::FAILURES_TOTAL, "kind" => kind).increment(1);
}
