//! Prometheus metrics for the relay server.
//!
//! Provides metrics collection and a Prometheus-compatible `/metrics` endpoint.
//! Without an installed recorder every function here is a no-op.

use metrics::{counter, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

// Metric names as constants for consistency
const WS_CONNECTIONS_ACTIVE: &str = "whiteboard_ws_connections_active";
const WS_MESSAGES_TOTAL: &str = "whiteboard_ws_messages_total";
const RELAY_DELIVERIES_TOTAL: &str = "whiteboard_relay_deliveries_total";
const RELAY_DROPS_TOTAL: &str = "whiteboard_relay_drops_total";
const VALIDATION_FAILURES_TOTAL: &str = "whiteboard_validation_failures_total";

/// Initialize metrics and return the Prometheus handle.
///
/// # Errors
///
/// Returns an error if the Prometheus recorder cannot be installed
/// (e.g., if another recorder is already installed).
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Update active WebSocket connection count.
pub fn set_ws_connections(count: usize) {
    #[allow(clippy::cast_precision_loss)]
    gauge!(WS_CONNECTIONS_ACTIVE).set(count as f64);
}

/// Record a WebSocket message.
///
/// # Arguments
///
/// * `direction` - "inbound" or "outbound"
/// * `msg_type` - Message type (e.g., "draw", "clear", "welcome")
pub fn record_ws_message(direction: &'static str, msg_type: &'static str) {
    counter!(
        WS_MESSAGES_TOTAL,
        "direction" => direction,
        "type" => msg_type
    )
    .increment(1);
}

/// Record the outcome of one fan-out.
///
/// # Arguments
///
/// * `delivered` - Peers the event was queued for
/// * `dropped` - Peers whose queue was already closed
pub fn record_relay(delivered: usize, dropped: usize) {
    counter!(RELAY_DELIVERIES_TOTAL).increment(delivered as u64);
    if dropped > 0 {
        counter!(RELAY_DROPS_TOTAL).increment(dropped as u64);
    }
}

/// Record an input validation failure.
///
/// # Arguments
///
/// * `validation_type` - Type of validation that failed (decode, message_size, color, etc.)
pub fn record_validation_failure(validation_type: &'static str) {
    counter!(
        VALIDATION_FAILURES_TOTAL,
        "type" => validation_type
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        set_ws_connections(3);
        record_ws_message("inbound", "draw");
        record_relay(2, 1);
        record_validation_failure("decode");
    }
}
