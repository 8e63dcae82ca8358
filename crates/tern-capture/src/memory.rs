//! In-memory reference sink.
//!
//! [`MemorySink`] is the sink used by tests and the executable
//! reference for one contract detail: backing storage for an event
//! kind is created lazily on first use, so a sink must accept any
//! [`LifecycleKind`] without prior registration.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use tern_event::LifecycleKind;

use crate::sink::{CaptureRecord, ProtocolSink, SinkError};

/// Sink that appends records to per-kind in-memory buffers.
///
/// Buffers are created on the first record of each kind. Querying a
/// kind that was never seen returns an empty vec, not an error.
///
/// # Example
///
/// ```
/// use tern_capture::{CaptureRecord, LifecycleKind, MemorySink, ProtocolSink};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let sink = MemorySink::new();
/// sink.send(CaptureRecord::new(
///     LifecycleKind::Snapshot,
///     1.0,
///     serde_json::json!({}),
/// ))
/// .await
/// .unwrap();
///
/// assert_eq!(sink.records(LifecycleKind::Snapshot).len(), 1);
/// assert!(sink.records(LifecycleKind::UrlChanged).is_empty());
/// # });
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    buffers: Mutex<HashMap<LifecycleKind, Vec<CaptureRecord>>>,
}

impl MemorySink {
    /// Creates an empty sink with no buffers allocated.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the records stored for a kind, in arrival
    /// order. Empty if the kind was never seen.
    #[must_use]
    pub fn records(&self, kind: LifecycleKind) -> Vec<CaptureRecord> {
        self.buffers
            .lock()
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the total number of stored records across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffers.lock().values().map(Vec::len).sum()
    }

    /// Returns `true` if no record has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of kinds that have backing storage.
    ///
    /// Storage is lazy: this is the number of kinds *seen*, not the
    /// number of kinds that exist.
    #[must_use]
    pub fn kinds_seen(&self) -> usize {
        self.buffers.lock().len()
    }
}

#[async_trait]
impl ProtocolSink for MemorySink {
    async fn send(&self, record: CaptureRecord) -> Result<(), SinkError> {
        let mut buffers = self.buffers.lock();
        buffers.entry(record.kind).or_default().push(record);
        Ok(())
    }
}
