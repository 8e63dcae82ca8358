//! Cross-origin pause/resume routing for TERN.
//!
//! This crate is the runtime layer of TERN: it owns the buses, the
//! relay that routes pause/resume control flow between the main
//! execution context and isolated (cross-origin) contexts, and the
//! forwarder that feeds lifecycle events into protocol capture.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         Test Execution                           │
//! │   main context  ·  isolated context A  ·  isolated context B     │
//! └──────────────────────────────────────────────────────────────────┘
//!        │ MainMessage::Paused / Lifecycle          ▲
//!        ▼                                          │ forward_to_origin /
//! ┌─────────────┐                                   │ broadcast
//! │   MainBus   │                            ┌──────┴──────┐
//! └─────────────┘                            │ RunContext  │
//!        │                                   └──────▲──────┘
//!        ├────────────────┐                         │
//!        ▼                ▼                         │
//! ┌─────────────┐  ┌──────────────────┐      ┌──────┴──────┐
//! │  Capture    │  │    PauseRelay    │─────►│  Context    │
//! │  Forwarder  │  │  (origin token + │      │  Provider   │
//! └──────┬──────┘  │   handler set)   │      └─────────────┘
//!        │         └──────┬───────────┘
//!        ▼                │      ▲
//! ┌─────────────┐         ▼      │
//! │ Capture     │  ┌──────────────────┐
//! │ Adapter     │  │   ReporterBus    │ ◄──► Reporter UI
//! └─────────────┘  └──────────────────┘
//! ```
//!
//! # Control Flow
//!
//! 1. The runner emits `MainMessage::Paused` (with an origin when the
//!    suspend came from an isolated context).
//! 2. [`PauseRelay`] records the origin and tells the reporter:
//!    `ReporterMessage::Paused { next_command }`.
//! 3. The user clicks next/resume; the reporter emits
//!    `ReporterMessage::Next` / `Resume`.
//! 4. The relay routes the command: to the recorded origin if one is
//!    live, otherwise broadcast into the main context. `Resume` then
//!    clears the recorded origin — it is the only thing that does.
//!
//! # Routing Is a Pure Function
//!
//! The decision in steps 2 and 4 is [`router::route`]: a pure function
//! from (origin token, incoming message) to (action, token
//! afterwards). The relay's tasks only apply its output. Unit tests
//! pin the routing table without any live bus.
//!
//! # Handler Lifecycle
//!
//! [`PauseRelay::attach`] spawns a [`HandlerSet`]; attaching again
//! tears the old set down first — sets are replaced, never merged, so
//! reruns cannot leak or double-register listeners.
//! [`PauseRelay::detach`] is safe to call at any time, including when
//! nothing is attached.

pub mod bus;
pub mod capture;
pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod relay;
pub mod router;
pub mod testing;

pub use bus::{MainBus, ReporterBus};
pub use capture::{CaptureForwarder, SinkHealth};
pub use config::RelayConfig;
pub use context::{ContextProvider, ContextSlot, MainOnlyContext, RunContext};
pub use error::RelayError;
pub use handlers::HandlerSet;
pub use relay::PauseRelay;
pub use router::{route, Decision, RelayInput, RouteAction};

// Re-exports for convenience
pub use tern_event::{ControlCommand, MainMessage, PauseNotice, ReporterMessage};
pub use tern_types::{OriginId, RunId};
