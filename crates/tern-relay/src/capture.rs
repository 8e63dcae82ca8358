//! Bus-to-sink lifecycle forwarding.
//!
//! [`CaptureForwarder`] is the bridge between the main bus and the
//! capture adapter: one dedicated task that drains a bus subscription
//! and awaits the sink for each lifecycle event before taking the
//! next. That single-consumer loop is the entire ordering guarantee —
//! events reach the sink in exact arrival order, and because the task
//! has its own subscription, awaiting a slow sink never blocks
//! delivery to any other bus listener.
//!
//! Sink failures here have no caller to return to, so they surface the
//! other way the error design allows: an error-level log and a mark in
//! [`SinkHealth`]. Capture is a best-effort side channel; a failed
//! record never fails the run.

use std::sync::Arc;

use parking_lot::Mutex;
use tern_capture::{CaptureAdapter, CaptureError};
use tern_event::MainMessage;
use tern_types::ErrorCode;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::bus::MainBus;
use crate::error::RelayError;

/// Diagnostic surface for sink trouble.
///
/// Cloning shares the underlying counters. Embedders poll this (or
/// read it after a run) to report capture degradation to the user
/// without failing any test.
#[derive(Debug, Clone, Default)]
pub struct SinkHealth {
    inner: Arc<Mutex<HealthInner>>,
}

#[derive(Debug, Default)]
struct HealthInner {
    failures: u64,
    last_error: Option<String>,
}

impl SinkHealth {
    /// Creates a healthy (zero-failure) record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one failed sink call.
    pub fn record_failure(&self, err: &CaptureError) {
        let mut inner = self.inner.lock();
        inner.failures += 1;
        inner.last_error = Some(err.to_string());
    }

    /// Returns the number of events lost to sink failures.
    #[must_use]
    pub fn failures(&self) -> u64 {
        self.inner.lock().failures
    }

    /// Returns the most recent failure message, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.inner.lock().last_error.clone()
    }

    /// Returns `true` if no sink call has failed.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.failures() == 0
    }
}

/// Task forwarding main-bus lifecycle events into a capture adapter.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tern_capture::{CaptureAdapter, MemorySink};
/// use tern_relay::{CaptureForwarder, MainBus};
///
/// # tokio::runtime::Builder::new_multi_thread().worker_threads(1).enable_all().build().unwrap().block_on(async {
/// let main = MainBus::new(64);
/// let sink = Arc::new(MemorySink::new());
/// let adapter = CaptureAdapter::new(sink.clone() as Arc<dyn tern_capture::ProtocolSink>);
///
/// let forwarder = CaptureForwarder::spawn(&main, adapter);
/// assert!(forwarder.health().is_healthy());
/// forwarder.stop();
/// # });
/// ```
#[derive(Debug)]
pub struct CaptureForwarder {
    task: JoinHandle<()>,
    health: SinkHealth,
}

impl CaptureForwarder {
    /// Subscribes to the bus and starts forwarding.
    ///
    /// Only messages emitted after this call are captured; the
    /// forwarder never commits to events it did not observe.
    #[must_use]
    pub fn spawn(main: &MainBus, adapter: CaptureAdapter) -> Self {
        let mut rx = main.subscribe();
        let health = SinkHealth::new();
        let task_health = health.clone();

        let task = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(MainMessage::Lifecycle(event)) => {
                        // Stamp at observation; the sink may be slow
                        // and the trace should reflect when we saw
                        // the event, not when storage caught up.
                        let observed_ms = adapter.now_ms();
                        match adapter.send_at(event.kind, observed_ms, event.payload).await {
                            Ok(()) => {
                                debug!(kind = %event.kind, "lifecycle event captured");
                            }
                            Err(err) => {
                                error!(code = err.code(), kind = %event.kind, "lifecycle event lost: {err}");
                                task_health.record_failure(&err);
                            }
                        }
                    }
                    // Pause/resume traffic is the relay's, not ours.
                    Ok(_) => {}
                    Err(RecvError::Lagged(missed)) => {
                        let err = RelayError::Lagged(missed);
                        warn!(code = err.code(), missed, "capture forwarder lagged, events skipped before commit");
                    }
                    Err(RecvError::Closed) => {
                        debug!(code = RelayError::BusClosed.code(), "main bus closed, capture forwarding ends");
                        break;
                    }
                }
            }
        });

        Self { task, health }
    }

    /// Returns the shared sink health record.
    #[must_use]
    pub fn health(&self) -> &SinkHealth {
        &self.health
    }

    /// Stops forwarding.
    ///
    /// A sink call already issued completes on its own; no further
    /// events are taken from the bus.
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for CaptureForwarder {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tern_capture::SinkError;

    #[test]
    fn health_starts_clean() {
        let health = SinkHealth::new();
        assert!(health.is_healthy());
        assert_eq!(health.failures(), 0);
        assert!(health.last_error().is_none());
    }

    #[test]
    fn health_records_failures() {
        let health = SinkHealth::new();
        health.record_failure(&CaptureError::Sink(SinkError::new("disk full")));
        health.record_failure(&CaptureError::Sink(SinkError::new("still full")));

        assert!(!health.is_healthy());
        assert_eq!(health.failures(), 2);
        assert!(health.last_error().unwrap().contains("still full"));
    }

    #[test]
    fn health_clones_share_counters() {
        let health = SinkHealth::new();
        let clone = health.clone();

        health.record_failure(&CaptureError::Sink(SinkError::new("x")));
        assert_eq!(clone.failures(), 1);
    }
}
