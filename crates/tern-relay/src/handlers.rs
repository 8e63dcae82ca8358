//! Handler set lifecycle.
//!
//! A handler set is one attach generation's listener tasks. The rules
//! that make reruns safe live here: a set is torn down whole and
//! replaced, never merged, and teardown aborts the tasks immediately
//! so a stale bus reference can never reach a new generation's
//! listeners.

use tern_types::RunId;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Listener tasks of one attach generation.
///
/// Owned exclusively by the relay; at most one set is active at a
/// time. Dropping the set aborts any tasks not already torn down, so
/// a panicking caller cannot leak listeners.
#[derive(Debug)]
pub struct HandlerSet {
    run_id: RunId,
    tasks: Vec<JoinHandle<()>>,
}

impl HandlerSet {
    /// Creates an empty set for a new attach generation.
    #[must_use]
    pub fn new(run_id: RunId) -> Self {
        debug!(%run_id, "handler set created");
        Self {
            run_id,
            tasks: Vec::new(),
        }
    }

    /// Adds a listener task to the set.
    pub fn push(&mut self, task: JoinHandle<()>) {
        self.tasks.push(task);
    }

    /// Returns this generation's id.
    #[must_use]
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Returns the number of listener tasks in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if the set holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Aborts every listener task and consumes the set.
    ///
    /// Abort is immediate: tasks stop at their next await point, which
    /// for a listener is the bus recv it is parked on. In-flight work
    /// already past its last await (a sink call already issued)
    /// completes on its own.
    pub fn teardown(mut self) {
        let count = self.tasks.len();
        for task in self.tasks.drain(..) {
            task.abort();
        }
        info!(run_id = %self.run_id, listeners = count, "handler set torn down");
    }
}

impl Drop for HandlerSet {
    fn drop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}
