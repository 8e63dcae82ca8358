//! Event layer errors.
//!
//! # Error Codes
//!
//! | Variant | Code | Recoverable |
//! |---------|------|-------------|
//! | [`EventError::EmptyCommand`] | `EVENT_EMPTY_COMMAND` | No |
//! | [`EventError::InvalidPayload`] | `EVENT_INVALID_PAYLOAD` | No |
//!
//! Both are caller bugs: the input will not fix itself on retry.

use serde::{Deserialize, Serialize};
use tern_types::ErrorCode;
use thiserror::Error;

/// Event layer error.
///
/// # Example
///
/// ```
/// use tern_event::{EventError, PauseNotice};
/// use tern_types::ErrorCode;
///
/// let err = PauseNotice::try_new("", None).unwrap_err();
/// assert_eq!(err.code(), "EVENT_EMPTY_COMMAND");
/// assert!(!err.is_recoverable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum EventError {
    /// A pause notice was constructed with an empty command name.
    ///
    /// The command name is shown next to the resume controls; an empty
    /// one is a bug in the emitting runner.
    #[error("pause notice command name cannot be empty")]
    EmptyCommand,

    /// A payload did not match the shape its kind requires.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl ErrorCode for EventError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyCommand => "EVENT_EMPTY_COMMAND",
            Self::InvalidPayload(_) => "EVENT_INVALID_PAYLOAD",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Both variants are caller bugs
        false
    }
}
