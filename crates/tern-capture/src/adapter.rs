//! Capture adapter - the facade the rest of the system calls.
//!
//! The adapter ties the three capture pieces together: it stamps the
//! event with the clock, updates the inspection probe, and awaits the
//! sink. Everything upstream (the bus forwarder, direct emitters)
//! talks to a [`CaptureAdapter`] and never to a sink directly.

use std::sync::Arc;

use serde_json::Value;
use tern_event::LifecycleKind;
use tracing::debug;

use crate::clock::CaptureClock;
use crate::error::CaptureError;
use crate::probe::InspectionProbe;
use crate::sink::{CaptureRecord, ProtocolSink};

/// Facade over clock, probe, and sink.
///
/// Cloning is cheap and shares the underlying sink, clock origin, and
/// probe slot.
///
/// # Ordering
///
/// The adapter sends exactly what it is told, when it is told. Callers
/// that need arrival-order preservation (the bus forwarder does) must
/// await each `send` before issuing the next; the adapter does not
/// queue or reorder.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tern_capture::{CaptureAdapter, LifecycleKind, MemorySink};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let sink = Arc::new(MemorySink::new());
/// let adapter = CaptureAdapter::new(sink.clone() as Arc<dyn tern_capture::ProtocolSink>);
///
/// adapter
///     .send(LifecycleKind::TestBeforeRun, serde_json::json!({"test": "spec.ts"}))
///     .await
///     .unwrap();
///
/// assert_eq!(sink.records(LifecycleKind::TestBeforeRun).len(), 1);
/// assert!(adapter.probe().latest_json().unwrap().contains("testBeforeRun"));
/// # });
/// ```
#[derive(Clone)]
pub struct CaptureAdapter {
    clock: CaptureClock,
    sink: Arc<dyn ProtocolSink>,
    probe: InspectionProbe,
}

impl CaptureAdapter {
    /// Creates an adapter over the given sink with a fresh clock and
    /// probe.
    #[must_use]
    pub fn new(sink: Arc<dyn ProtocolSink>) -> Self {
        Self {
            clock: CaptureClock::new(),
            sink,
            probe: InspectionProbe::new(),
        }
    }

    /// Replaces the clock.
    ///
    /// Tests use this to pin the time origin.
    #[must_use]
    pub fn with_clock(mut self, clock: CaptureClock) -> Self {
        self.clock = clock;
        self
    }

    /// Stamps the event with the current time and records it.
    ///
    /// Resolves once the sink has durably recorded the event. The
    /// probe is updated before the sink is awaited, so the side
    /// channel reflects the event even while the sink is in flight.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Sink`] if the sink fails; the event is
    /// then not durably recorded.
    pub async fn send(&self, kind: LifecycleKind, payload: Value) -> Result<(), CaptureError> {
        let timestamp_ms = self.clock.now_ms();
        self.send_at(kind, timestamp_ms, payload).await
    }

    /// Records an event with a caller-provided timestamp.
    ///
    /// Callers that observed the event earlier than they could forward
    /// it (the bus forwarder stamps on arrival) use this to keep the
    /// trace faithful to observation time.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Sink`] if the sink fails.
    pub async fn send_at(
        &self,
        kind: LifecycleKind,
        timestamp_ms: f64,
        payload: Value,
    ) -> Result<(), CaptureError> {
        self.probe.record(kind, timestamp_ms);
        debug!(kind = %kind, timestamp_ms, "capture send");

        self.sink
            .send(CaptureRecord::new(kind, timestamp_ms, payload))
            .await?;
        Ok(())
    }

    /// Returns the current timestamp from the adapter's clock.
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    /// Returns the inspection probe.
    #[must_use]
    pub fn probe(&self) -> &InspectionProbe {
        &self.probe
    }
}

impl std::fmt::Debug for CaptureAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureAdapter")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySink;
    use crate::sink::SinkError;
    use async_trait::async_trait;
    use tern_types::ErrorCode;

    /// Sink that rejects everything.
    struct FailingSink;

    #[async_trait]
    impl ProtocolSink for FailingSink {
        async fn send(&self, _record: CaptureRecord) -> Result<(), SinkError> {
            Err(SinkError::new("sink offline"))
        }
    }

    fn memory_adapter() -> (CaptureAdapter, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let adapter = CaptureAdapter::new(Arc::clone(&sink) as Arc<dyn ProtocolSink>)
            .with_clock(CaptureClock::with_origin(1_000.0));
        (adapter, sink)
    }

    #[tokio::test]
    async fn send_stamps_and_stores() {
        let (adapter, sink) = memory_adapter();

        adapter
            .send(LifecycleKind::Snapshot, serde_json::json!({"id": 1}))
            .await
            .unwrap();

        let records = sink.records(LifecycleKind::Snapshot);
        assert_eq!(records.len(), 1);
        assert!(records[0].timestamp_ms >= 1_000.0);
        assert_eq!(records[0].payload["id"], 1);
    }

    #[tokio::test]
    async fn send_at_uses_caller_timestamp() {
        let (adapter, sink) = memory_adapter();

        adapter
            .send_at(LifecycleKind::UrlChanged, 42.5, serde_json::json!({}))
            .await
            .unwrap();

        assert_eq!(sink.records(LifecycleKind::UrlChanged)[0].timestamp_ms, 42.5);
    }

    #[tokio::test]
    async fn timestamps_are_non_decreasing_across_sends() {
        let (adapter, sink) = memory_adapter();

        for _ in 0..50 {
            adapter
                .send(LifecycleKind::LogAdded, serde_json::json!({}))
                .await
                .unwrap();
        }

        let records = sink.records(LifecycleKind::LogAdded);
        for pair in records.windows(2) {
            assert!(pair[1].timestamp_ms >= pair[0].timestamp_ms);
        }
    }

    #[tokio::test]
    async fn sink_failure_propagates_to_caller() {
        let adapter = CaptureAdapter::new(Arc::new(FailingSink));

        let err = adapter
            .send(LifecycleKind::TestAfterRun, serde_json::json!({}))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "CAPTURE_SINK_FAILURE");
    }

    #[tokio::test]
    async fn probe_updates_even_when_sink_fails() {
        let adapter = CaptureAdapter::new(Arc::new(FailingSink));

        let _ = adapter
            .send(LifecycleKind::PageLoading, serde_json::json!({}))
            .await;

        // The probe reflects observation, not durability.
        assert!(adapter
            .probe()
            .latest_json()
            .unwrap()
            .contains("pageLoading"));
    }

    #[tokio::test]
    async fn probe_tracks_latest_send() {
        let (adapter, _sink) = memory_adapter();

        adapter
            .send(LifecycleKind::LogAdded, serde_json::json!({}))
            .await
            .unwrap();
        adapter
            .send(LifecycleKind::LogChanged, serde_json::json!({}))
            .await
            .unwrap();

        let json = adapter.probe().latest_json().unwrap();
        assert!(json.contains("logChanged"));
        assert!(!json.contains("logAdded"));
    }
}
