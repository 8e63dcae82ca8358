//! Protocol capture for TERN.
//!
//! Capture is the durable recording of fine-grained runner lifecycle
//! events for later inspection and replay. This crate owns the sink
//! boundary: the clock that stamps events, the contract a sink must
//! satisfy, the adapter the rest of the system calls, and an
//! in-memory reference sink.
//!
//! ```text
//! ┌──────────────┐  send(kind, payload)  ┌────────────────┐
//! │  Forwarder / │ ────────────────────► │ CaptureAdapter │
//! │  emitter     │ ◄──────────────────── │                │
//! └──────────────┘   Result<(), _>       │  stamp (clock) │
//!                                        │  probe update  │
//!                                        │  await sink    │
//!                                        └───────┬────────┘
//!                                                │ ProtocolSink::send
//!                                                ▼
//!                                        ┌────────────────┐
//!                                        │ durable trace  │
//!                                        └────────────────┘
//! ```
//!
//! # Guarantees
//!
//! - Timestamps are wall-clock epoch milliseconds with sub-millisecond
//!   fraction, monotonically non-decreasing ([`CaptureClock`]).
//! - The caller of [`CaptureAdapter::send`] awaits sink completion
//!   before the event counts as durably recorded; a sink failure comes
//!   back as [`CaptureError`] — losing a trace event is reportable.
//! - The latest event's `{type, timestamp}` is always discoverable via
//!   the [`InspectionProbe`] side channel (a debugging aid, not part of
//!   the durable trace).
//!
//! # Non-guarantees
//!
//! No retries. Retry policy, if any, belongs to the sink
//! implementation behind [`ProtocolSink`].

mod adapter;
mod clock;
mod error;
mod memory;
mod probe;
mod sink;

pub use adapter::CaptureAdapter;
pub use clock::CaptureClock;
pub use error::CaptureError;
pub use memory::MemorySink;
pub use probe::{InspectionProbe, PROBE_SLOT_ID};
pub use sink::{CaptureRecord, ProtocolSink, SinkError};

// Re-export the event vocabulary the sink speaks
pub use tern_event::LifecycleKind;
