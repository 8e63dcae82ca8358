//! Message types for the TERN buses.
//!
//! Every signal that crosses a bus in TERN is a variant of one of two
//! closed enums — there is no listen/emit-by-string-name anywhere in
//! the system. A message either exists in the vocabulary or it does
//! not compile.
//!
//! # Two Buses, Two Vocabularies
//!
//! ```text
//! ┌──────────────┐   MainMessage       ┌──────────────┐
//! │ Test runner  │ ──────────────────► │              │
//! │ (main ctx +  │   Paused /          │  PauseRelay  │
//! │  bridges)    │   Lifecycle         │              │
//! └──────────────┘                     │              │
//!        ▲          Control            │              │
//!        └─────────────────────────────│              │
//!                                      └──────────────┘
//!                                        ▲         │
//!                        ReporterMessage │         │ ReporterMessage
//!                        Next / Resume   │         ▼ Paused
//!                                     ┌──────────────┐
//!                                     │ Reporter UI  │
//!                                     └──────────────┘
//! ```
//!
//! # Wire Names
//!
//! The enums keep the original event names on the wire for external
//! tooling:
//!
//! | Variant | Wire name |
//! |---------|-----------|
//! | [`ControlCommand::Next`] | `resume:next` |
//! | [`ControlCommand::ResumeAll`] | `resume:all` |
//! | [`MainMessage::Paused`] | `paused` |
//! | [`ReporterMessage::Next`] | `runner:next` |
//! | [`ReporterMessage::Resume`] | `runner:resume` |
//!
//! # Usage
//!
//! ```
//! use tern_event::{ControlCommand, MainMessage, PauseNotice};
//! use tern_types::OriginId;
//!
//! // A suspend requested from an isolated context:
//! let notice = PauseNotice::isolated("get", OriginId::new("https://sub.example.com"));
//! let msg = MainMessage::Paused(notice);
//!
//! // A resume broadcast into the main context:
//! let cmd = ControlCommand::ResumeAll;
//! assert_eq!(cmd.wire_name(), "resume:all");
//! # let _ = msg;
//! ```

mod control;
mod error;
mod lifecycle;
mod message;

pub use control::{ControlCommand, PauseNotice};
pub use error::EventError;
pub use lifecycle::{LifecycleEvent, LifecycleKind};
pub use message::{MainMessage, ReporterMessage};

// Re-export from tern_types for convenience
pub use tern_types::OriginId;
