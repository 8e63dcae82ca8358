//! Core types for TERN.
//!
//! This crate provides the identifier types and the unified error
//! contract shared by every TERN crate. It sits at the bottom of the
//! dependency graph:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Message Layer                           │
//! │  tern-types   : OriginId, RunId, ErrorCode  ◄── HERE        │
//! │  tern-event   : MainMessage, ReporterMessage, PauseNotice   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      Runtime Layer                           │
//! │  tern-capture : CaptureClock, ProtocolSink, CaptureAdapter  │
//! │  tern-relay   : MainBus, ReporterBus, PauseRelay            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Identifiers
//!
//! - [`OriginId`] — the opaque identity of an isolated execution
//!   context (a cross-origin bridge). Origins are URLs in practice, so
//!   this is a string newtype rather than a UUID.
//! - [`RunId`] — a UUID identifying one attach generation of the relay.
//!   Every rerun gets a fresh one, which is what makes stale handler
//!   sets distinguishable in logs.
//!
//! # Error Contract
//!
//! All TERN error types implement [`ErrorCode`]:
//!
//! ```
//! use tern_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum MyError {
//!     Lagged(u64),
//!     Closed,
//! }
//!
//! impl ErrorCode for MyError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Lagged(_) => "MY_LAGGED",
//!             Self::Closed => "MY_CLOSED",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Lagged(_))
//!     }
//! }
//!
//! assert_eq!(MyError::Closed.code(), "MY_CLOSED");
//! assert!(MyError::Lagged(3).is_recoverable());
//! ```

mod error;
mod id;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{OriginId, RunId};
