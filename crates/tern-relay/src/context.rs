//! The execution-context seam.
//!
//! The relay decides *where* a command goes; these traits are *how* it
//! gets there. A [`RunContext`] is the live run's delivery surface: it
//! can broadcast into the main context or forward to a named isolated
//! context. A [`ContextProvider`] answers whether a run is live at all
//! — once a run ends, the provider returns `None` and the relay drops
//! commands silently instead of erroring.

use std::sync::Arc;

use parking_lot::RwLock;
use tern_event::{ControlCommand, MainMessage};
use tern_types::OriginId;
use tracing::warn;

use crate::bus::MainBus;

/// Delivery surface of a live test run.
pub trait RunContext: Send + Sync {
    /// Broadcasts a control command in the main context.
    ///
    /// Returns the number of listeners reached; 0 is not an error.
    fn broadcast(&self, command: ControlCommand) -> usize;

    /// Forwards a control command to the isolated context with the
    /// given origin.
    ///
    /// Returns `true` if the bridge accepted the command.
    fn forward_to_origin(&self, origin: &OriginId, command: ControlCommand) -> bool;
}

/// Answers "is there a live run right now, and how do I reach it?"
pub trait ContextProvider: Send + Sync {
    /// Returns the current run's context, or `None` once the run has
    /// ended.
    fn current(&self) -> Option<Arc<dyn RunContext>>;
}

/// Settable/clearable [`ContextProvider`].
///
/// The owning session sets the slot when a run starts and clears it
/// when the run ends; the relay sees the change on its next routed
/// command. Cloning shares the slot.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tern_relay::{ContextProvider, ContextSlot, MainBus, MainOnlyContext};
///
/// let slot = ContextSlot::new();
/// assert!(slot.current().is_none());
///
/// let ctx = Arc::new(MainOnlyContext::new(MainBus::new(8)));
/// slot.set(ctx);
/// assert!(slot.current().is_some());
///
/// slot.clear();
/// assert!(slot.current().is_none());
/// ```
#[derive(Clone, Default)]
pub struct ContextSlot {
    inner: Arc<RwLock<Option<Arc<dyn RunContext>>>>,
}

impl ContextSlot {
    /// Creates an empty slot (no live run).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot already holding a context.
    #[must_use]
    pub fn with(ctx: Arc<dyn RunContext>) -> Self {
        let slot = Self::new();
        slot.set(ctx);
        slot
    }

    /// Installs the context of a newly started run, replacing any
    /// previous one.
    pub fn set(&self, ctx: Arc<dyn RunContext>) {
        *self.inner.write() = Some(ctx);
    }

    /// Clears the slot; the run has ended.
    pub fn clear(&self) {
        *self.inner.write() = None;
    }
}

impl ContextProvider for ContextSlot {
    fn current(&self) -> Option<Arc<dyn RunContext>> {
        self.inner.read().clone()
    }
}

impl std::fmt::Debug for ContextSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextSlot")
            .field("occupied", &self.inner.read().is_some())
            .finish()
    }
}

/// [`RunContext`] for runs without isolated contexts.
///
/// Broadcasts go to the main bus as [`MainMessage::Control`]. Forwards
/// have nowhere to go — there are no bridges — so they are refused
/// with a warning; a forward reaching this context means an origin was
/// recorded without a bridge transport existing, which is a wiring
/// bug in the embedder.
#[derive(Debug, Clone)]
pub struct MainOnlyContext {
    main: MainBus,
}

impl MainOnlyContext {
    /// Creates a context that delivers into the given main bus.
    #[must_use]
    pub fn new(main: MainBus) -> Self {
        Self { main }
    }
}

impl RunContext for MainOnlyContext {
    fn broadcast(&self, command: ControlCommand) -> usize {
        self.main.emit(MainMessage::Control(command))
    }

    fn forward_to_origin(&self, origin: &OriginId, command: ControlCommand) -> bool {
        warn!(%origin, %command, "no bridge transport in a main-only run, refusing forward");
        false
    }
}
