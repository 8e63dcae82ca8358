//! Test doubles for relay wiring.
//!
//! Engine-independent stand-ins for the execution-context seam, so
//! routing behavior can be asserted without a browser, a runner, or
//! any live bridge transport. Used by this crate's own tests and
//! available to embedders testing their wiring.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tern_event::ControlCommand;
//! use tern_relay::testing::RecordingContext;
//! use tern_relay::RunContext;
//! use tern_types::OriginId;
//!
//! let ctx = Arc::new(RecordingContext::new());
//! ctx.forward_to_origin(&OriginId::new("https://a.test"), ControlCommand::Next);
//!
//! assert_eq!(ctx.forwards().len(), 1);
//! assert!(ctx.broadcasts().is_empty());
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tern_event::ControlCommand;
use tern_types::OriginId;

use crate::context::{ContextProvider, ContextSlot, RunContext};

/// [`RunContext`] that records every delivery instead of performing it.
///
/// Forwards are accepted (`true`) and broadcasts report one listener
/// reached, so routing proceeds as if a healthy run were live.
#[derive(Debug, Default)]
pub struct RecordingContext {
    forwards: Mutex<Vec<(OriginId, ControlCommand)>>,
    broadcasts: Mutex<Vec<ControlCommand>>,
}

impl RecordingContext {
    /// Creates a context with empty delivery logs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every `(origin, command)` forwarded so far, in order.
    #[must_use]
    pub fn forwards(&self) -> Vec<(OriginId, ControlCommand)> {
        self.forwards.lock().clone()
    }

    /// Returns every command broadcast so far, in order.
    #[must_use]
    pub fn broadcasts(&self) -> Vec<ControlCommand> {
        self.broadcasts.lock().clone()
    }

    /// Returns the total number of deliveries of both kinds.
    #[must_use]
    pub fn delivery_count(&self) -> usize {
        self.forwards.lock().len() + self.broadcasts.lock().len()
    }
}

impl RunContext for RecordingContext {
    fn broadcast(&self, command: ControlCommand) -> usize {
        self.broadcasts.lock().push(command);
        1
    }

    fn forward_to_origin(&self, origin: &OriginId, command: ControlCommand) -> bool {
        self.forwards.lock().push((origin.clone(), command));
        true
    }
}

/// Provider that always reports the given context as live.
#[must_use]
pub fn live_provider(ctx: Arc<dyn RunContext>) -> Arc<dyn ContextProvider> {
    Arc::new(ContextSlot::with(ctx))
}

/// Provider that always reports the run as ended.
#[must_use]
pub fn ended_provider() -> Arc<dyn ContextProvider> {
    Arc::new(ContextSlot::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_context_logs_in_order() {
        let ctx = RecordingContext::new();
        ctx.forward_to_origin(&OriginId::new("https://a.test"), ControlCommand::Next);
        ctx.forward_to_origin(&OriginId::new("https://a.test"), ControlCommand::ResumeAll);
        ctx.broadcast(ControlCommand::Next);

        let forwards = ctx.forwards();
        assert_eq!(forwards.len(), 2);
        assert_eq!(forwards[0].1, ControlCommand::Next);
        assert_eq!(forwards[1].1, ControlCommand::ResumeAll);
        assert_eq!(ctx.broadcasts(), vec![ControlCommand::Next]);
        assert_eq!(ctx.delivery_count(), 3);
    }

    #[test]
    fn live_provider_always_has_context() {
        let provider = live_provider(Arc::new(RecordingContext::new()));
        assert!(provider.current().is_some());
    }

    #[test]
    fn ended_provider_never_has_context() {
        let provider = ended_provider();
        assert!(provider.current().is_none());
    }
}
