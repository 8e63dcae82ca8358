//! Capture layer errors.
//!
//! # Error Codes
//!
//! | Variant | Code | Recoverable |
//! |---------|------|-------------|
//! | [`CaptureError::Sink`] | `CAPTURE_SINK_FAILURE` | Yes |
//!
//! A sink failure is recoverable from the adapter's point of view —
//! the sink may reconnect or flush — but the adapter itself never
//! retries; retry policy belongs to the sink implementation.

use tern_types::ErrorCode;
use thiserror::Error;

use crate::sink::SinkError;

/// Capture layer error.
///
/// # Example
///
/// ```
/// use tern_capture::{CaptureError, SinkError};
/// use tern_types::ErrorCode;
///
/// let err = CaptureError::Sink(SinkError::new("disk full"));
/// assert_eq!(err.code(), "CAPTURE_SINK_FAILURE");
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// The sink rejected or failed to durably record an event.
    ///
    /// Losing a trace event is a reportable failure, so this reaches
    /// the caller of the triggering send rather than being swallowed.
    /// It must surface as a diagnostic, never as a test failure:
    /// capture is a best-effort side channel of the run.
    #[error("protocol sink failure: {0}")]
    Sink(#[from] SinkError),
}

impl ErrorCode for CaptureError {
    fn code(&self) -> &'static str {
        match self {
            Self::Sink(_) => "CAPTURE_SINK_FAILURE",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Sink(_) => true,
        }
    }
}
