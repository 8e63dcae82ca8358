//! Relay layer errors.
//!
//! # Error Codes
//!
//! | Variant | Code | Recoverable |
//! |---------|------|-------------|
//! | [`RelayError::Lagged`] | `RELAY_LAGGED` | Yes |
//! | [`RelayError::BusClosed`] | `RELAY_BUS_CLOSED` | No |
//! | [`RelayError::ForwardRefused`] | `RELAY_FORWARD_REFUSED` | No |
//!
//! Note what is *not* here: a missing run context. A routed command
//! arriving after the run ended is normal shutdown ordering, not a
//! fault — the relay drops it with a debug log and no error value
//! exists for it.

use tern_types::{ErrorCode, OriginId};
use thiserror::Error;

/// Relay layer error.
///
/// These surface in listener logs; routing itself never returns them
/// to emitters (an emitter cannot do anything about a slow subscriber
/// elsewhere).
///
/// # Example
///
/// ```
/// use tern_relay::RelayError;
/// use tern_types::ErrorCode;
///
/// let err = RelayError::Lagged(7);
/// assert_eq!(err.code(), "RELAY_LAGGED");
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// A listener fell behind its bus buffer and missed messages.
    ///
    /// The subscription is still usable; only the oldest messages were
    /// dropped. Raise the bus capacity in
    /// [`RelayConfig`](crate::RelayConfig) if this recurs.
    #[error("listener lagged, {0} messages missed")]
    Lagged(u64),

    /// The bus closed: every sender was dropped.
    ///
    /// The listener loop ends; a new attach against live buses is
    /// required.
    #[error("bus closed")]
    BusClosed,

    /// The bridge transport refused a forwarded command.
    ///
    /// The recorded origin points at a context the transport cannot
    /// reach — a wiring bug in the embedder, not a transient fault.
    #[error("forward to {origin} refused")]
    ForwardRefused {
        /// Origin the forward was addressed to.
        origin: OriginId,
    },
}

impl ErrorCode for RelayError {
    fn code(&self) -> &'static str {
        match self {
            Self::Lagged(_) => "RELAY_LAGGED",
            Self::BusClosed => "RELAY_BUS_CLOSED",
            Self::ForwardRefused { .. } => "RELAY_FORWARD_REFUSED",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Lagged(_))
    }
}
