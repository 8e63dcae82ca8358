//! The sink contract.
//!
//! A sink is whatever makes a trace durable: a database writer, a
//! websocket to a collecting service, a file appender. TERN does not
//! implement durability itself; it defines the seam and guarantees
//! what arrives at it (stamped, in order, one call awaited at a time
//! per forwarder).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tern_event::LifecycleKind;
use tern_types::ErrorCode;
use thiserror::Error;

/// One stamped lifecycle event, ready for durable storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRecord {
    /// What happened.
    #[serde(rename = "type")]
    pub kind: LifecycleKind,
    /// Wall-clock epoch milliseconds with sub-millisecond fraction.
    pub timestamp_ms: f64,
    /// Kind-specific payload.
    pub payload: Value,
}

impl CaptureRecord {
    /// Creates a record.
    #[must_use]
    pub fn new(kind: LifecycleKind, timestamp_ms: f64, payload: Value) -> Self {
        Self {
            kind,
            timestamp_ms,
            payload,
        }
    }
}

/// Failure reported by a sink implementation.
///
/// Sinks reduce their internal failures to a message; the adapter
/// wraps this in [`CaptureError`](crate::CaptureError) for callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sink rejected event: {message}")]
pub struct SinkError {
    /// Human-readable description of what the sink could not do.
    pub message: String,
}

impl SinkError {
    /// Creates a sink error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ErrorCode for SinkError {
    fn code(&self) -> &'static str {
        "CAPTURE_SINK_REJECTED"
    }

    fn is_recoverable(&self) -> bool {
        // The sink may recover (reconnect, flush); the record itself is valid.
        true
    }
}

/// Destination for the durable trace.
///
/// # Contract
///
/// - `send` resolves only once the event is durably recorded (or has
///   durably failed); callers await it before counting the event as
///   stored.
/// - Timestamps arrive monotonically non-decreasing per forwarder.
/// - Implementations must tolerate the first call for any
///   [`LifecycleKind`] arriving without warning — create backing
///   storage lazily (see [`MemorySink`](crate::MemorySink) for the
///   reference behavior).
/// - Retry policy belongs here, not in the caller.
#[async_trait]
pub trait ProtocolSink: Send + Sync {
    /// Records one event.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the event could not be durably
    /// recorded.
    async fn send(&self, record: CaptureRecord) -> Result<(), SinkError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tern_types::assert_error_code;

    #[test]
    fn record_serializes_with_wire_field_names() {
        let record = CaptureRecord::new(
            LifecycleKind::LogAdded,
            1_700_000_000_123.5,
            serde_json::json!({"id": "log-1"}),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "logAdded");
        assert_eq!(json["timestampMs"], 1_700_000_000_123.5);
        assert_eq!(json["payload"]["id"], "log-1");
    }

    #[test]
    fn sink_error_code() {
        let err = SinkError::new("connection reset");
        assert_error_code(&err, "CAPTURE_");
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("connection reset"));
    }
}
