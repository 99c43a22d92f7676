//! Internal pipeline metrics.
//!
//! # Metrics
//! - `logtee_forward_failures_total` (counter): records a child backend
//!   failed to accept, by backend kind
//! - `logtee_transmission_errors_total` (counter): error-backend sends that
//!   failed after construction succeeded
//! - `logtee_sampled_drops_total` (counter): records dropped by the
//!   production sampler
//! - `logtee_queue_drops_total` (counter): events dropped because the
//!   transport queue was full

use metrics::counter;

/// A child backend rejected a record during fan-out.
pub fn record_forward_failure(backend: &'static str) {
    counter!("logtee_forward_failures_total", "backend" => backend).increment(1);
}

/// The error-backend client failed to transmit an event.
pub fn record_transmission_error() {
    counter!("logtee_transmission_errors_total").increment(1);
}

/// The production sampler dropped a record.
pub fn record_sampler_drop() {
    counter!("logtee_sampled_drops_total").increment(1);
}

/// The transport queue was full and an event was discarded.
pub fn record_queue_drop() {
    counter!("logtee_queue_drops_total").increment(1);
}
