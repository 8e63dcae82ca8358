//! The stateful relay.
//!
//! [`PauseRelay`] owns the two pieces of state the routing rules need:
//! the origin token (which isolated context most recently suspended)
//! and the active [`HandlerSet`]. Both are instance state with a
//! constructor/reset lifecycle — there are no process-wide variables,
//! and a session that wants a second relay simply constructs one.
//!
//! # Synchronous Routing
//!
//! Each listener takes its routing decision *and* applies the token
//! transition inside one lock acquisition, with no await inside, so
//! back-to-back `paused`/`resume` on the same listener cannot
//! interleave mid-decision. Delivery (bus emit, context forward)
//! happens after the lock is released; both are synchronous sends.

use std::sync::Arc;

use parking_lot::Mutex;
use tern_event::{ControlCommand, MainMessage, ReporterMessage};
use tern_types::{ErrorCode, OriginId, RunId};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::bus::{MainBus, ReporterBus};
use crate::context::ContextProvider;
use crate::error::RelayError;
use crate::handlers::HandlerSet;
use crate::router::{route, Decision, RelayInput, RouteAction};

/// Routes pause/resume control flow between execution contexts.
///
/// # Lifecycle
///
/// ```text
/// new() ──► attach(provider, main, reporter) ──► routing live
///                  ▲                                  │
///                  │        detach() / re-attach      │
///                  └──────────────────────────────────┘
/// ```
///
/// Re-attaching tears the previous handler set down first; sets are
/// replaced, never merged ("double attach" is defined behavior, not
/// an error). [`detach`](Self::detach) with nothing attached is a
/// no-op.
///
/// The origin token survives detach — it belongs to the relay, not to
/// a handler generation. A session that reruns from scratch calls
/// [`reset`](Self::reset) alongside attach.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tern_relay::{ContextSlot, MainBus, PauseRelay, ReporterBus};
///
/// # tokio::runtime::Builder::new_multi_thread().worker_threads(1).enable_all().build().unwrap().block_on(async {
/// let main = MainBus::new(64);
/// let reporter = ReporterBus::new(64);
/// let slot = ContextSlot::new();
///
/// let mut relay = PauseRelay::new();
/// relay.attach(Arc::new(slot), &main, &reporter);
/// assert!(relay.is_attached());
///
/// relay.detach();
/// assert!(!relay.is_attached());
/// # });
/// ```
pub struct PauseRelay {
    /// Which isolated context most recently requested a suspend.
    token: Arc<Mutex<Option<OriginId>>>,
    /// The active handler set, if attached.
    handlers: Option<HandlerSet>,
}

impl PauseRelay {
    /// Creates a detached relay with no recorded origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: Arc::new(Mutex::new(None)),
            handlers: None,
        }
    }

    /// Installs listeners on the given buses.
    ///
    /// Any previously active handler set is torn down first, so the
    /// net effect is idempotent: after `attach` returns there is
    /// exactly one set of listeners, bound to exactly these buses.
    pub fn attach(
        &mut self,
        provider: Arc<dyn ContextProvider>,
        main: &MainBus,
        reporter: &ReporterBus,
    ) {
        if let Some(old) = self.handlers.take() {
            debug!(old_run = %old.run_id(), "replacing active handler set");
            old.teardown();
        }

        let run_id = RunId::new();
        let mut set = HandlerSet::new(run_id);

        set.push(self.spawn_main_listener(run_id, main, reporter));
        set.push(self.spawn_reporter_listener(run_id, provider, reporter));

        info!(%run_id, "relay attached");
        self.handlers = Some(set);
    }

    /// Removes all listeners owned by the current handler set.
    ///
    /// Safe to call when nothing is attached, and safe to call after
    /// the run context is gone — it touches only relay-owned tasks.
    pub fn detach(&mut self) {
        match self.handlers.take() {
            Some(set) => set.teardown(),
            None => debug!("detach with no active handler set, nothing to do"),
        }
    }

    /// Returns the currently recorded suspend origin, if any.
    #[must_use]
    pub fn origin_token(&self) -> Option<OriginId> {
        self.token.lock().clone()
    }

    /// Clears the recorded suspend origin.
    ///
    /// For sessions that rerun from scratch: pair with
    /// [`attach`](Self::attach) so a stale origin from the previous
    /// run cannot misroute the new one.
    pub fn reset(&self) {
        *self.token.lock() = None;
    }

    /// Returns `true` while a handler set is active.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.handlers.is_some()
    }

    /// Returns the active handler generation, if attached.
    #[must_use]
    pub fn run_id(&self) -> Option<RunId> {
        self.handlers.as_ref().map(HandlerSet::run_id)
    }

    /// Spawns the listener that turns suspend notices into reporter
    /// events.
    fn spawn_main_listener(
        &self,
        run_id: RunId,
        main: &MainBus,
        reporter: &ReporterBus,
    ) -> tokio::task::JoinHandle<()> {
        let mut rx = main.subscribe();
        let token = Arc::clone(&self.token);
        let reporter = reporter.clone();

        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(MainMessage::Paused(notice)) => {
                        let decision = apply(&token, RelayInput::Paused(notice));
                        if let RouteAction::ReportPaused { next_command } = decision.action {
                            let delivered =
                                reporter.emit(ReporterMessage::Paused { next_command });
                            debug!(%run_id, delivered, "suspend reported");
                        }
                    }
                    // Control and Lifecycle traffic belongs to other listeners.
                    Ok(_) => {}
                    Err(RecvError::Lagged(missed)) => {
                        let err = RelayError::Lagged(missed);
                        warn!(%run_id, code = err.code(), missed, "main listener lagged");
                    }
                    Err(RecvError::Closed) => {
                        debug!(%run_id, code = RelayError::BusClosed.code(), "main bus closed");
                        break;
                    }
                }
            }
        })
    }

    /// Spawns the listener that routes user commands back into the
    /// run.
    fn spawn_reporter_listener(
        &self,
        run_id: RunId,
        provider: Arc<dyn ContextProvider>,
        reporter: &ReporterBus,
    ) -> tokio::task::JoinHandle<()> {
        let mut rx = reporter.subscribe();
        let token = Arc::clone(&self.token);

        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(msg) => {
                        let command = match msg {
                            ReporterMessage::Next => ControlCommand::Next,
                            ReporterMessage::Resume => ControlCommand::ResumeAll,
                            // Our own outbound traffic.
                            ReporterMessage::Paused { .. } => continue,
                        };

                        // The token transition is unconditional
                        // (resume clears even with no live context);
                        // only delivery depends on the run being alive.
                        let decision = apply(&token, RelayInput::Command(command));

                        let Some(ctx) = provider.current() else {
                            debug!(%run_id, %command, "run ended, dropping command");
                            continue;
                        };

                        match decision.action {
                            RouteAction::ForwardToOrigin { origin, command } => {
                                if ctx.forward_to_origin(&origin, command) {
                                    debug!(%run_id, %origin, %command, "forwarded to origin");
                                } else {
                                    let err = RelayError::ForwardRefused { origin };
                                    warn!(%run_id, code = err.code(), "{err}");
                                }
                            }
                            RouteAction::BroadcastMain { command } => {
                                let delivered = ctx.broadcast(command);
                                debug!(%run_id, %command, delivered, "broadcast in main context");
                            }
                            // route() never reports a pause for a command input.
                            RouteAction::ReportPaused { .. } => {
                                warn!(%run_id, "unexpected pause report for a user command");
                            }
                        }
                    }
                    Err(RecvError::Lagged(missed)) => {
                        let err = RelayError::Lagged(missed);
                        warn!(%run_id, code = err.code(), missed, "reporter listener lagged");
                    }
                    Err(RecvError::Closed) => {
                        debug!(%run_id, code = RelayError::BusClosed.code(), "reporter bus closed");
                        break;
                    }
                }
            }
        })
    }
}

impl Default for PauseRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PauseRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PauseRelay")
            .field("origin_token", &self.origin_token())
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Routes one input and applies the token transition atomically.
///
/// The guard is held only for the pure decision; no await happens
/// inside.
fn apply(token: &Mutex<Option<OriginId>>, input: RelayInput) -> Decision {
    let mut guard = token.lock();
    let decision = route(guard.as_ref(), input);
    *guard = decision.token_after.clone();
    decision
}
