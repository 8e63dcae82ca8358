//! Debug inspection probe.
//!
//! External tooling (a debugger, a test harness poking at a live run)
//! wants one cheap question answered: "what was the last event the
//! capture pipeline saw?" The probe is a single well-known slot
//! holding the latest event's `{type, timestamp}` as JSON, overwritten
//! on every event. It is a debugging aid, not part of the durable
//! trace — nothing accumulates here.

use parking_lot::RwLock;
use std::sync::Arc;
use tern_event::LifecycleKind;

/// Well-known identifier of the probe slot.
///
/// Tooling that polls the probe addresses it by this name.
pub const PROBE_SLOT_ID: &str = "__tern-latest-capture-event";

/// Shared slot exposing the most recent capture event.
///
/// Cloning shares the slot; all clones observe the same latest value.
///
/// # Example
///
/// ```
/// use tern_capture::{InspectionProbe, LifecycleKind};
///
/// let probe = InspectionProbe::new();
/// assert!(probe.latest_json().is_none());
///
/// probe.record(LifecycleKind::UrlChanged, 123.5);
/// let json = probe.latest_json().unwrap();
/// assert!(json.contains("urlChanged"));
///
/// probe.record(LifecycleKind::Snapshot, 124.0);
/// // Overwritten, not appended.
/// assert!(!probe.latest_json().unwrap().contains("urlChanged"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InspectionProbe {
    latest: Arc<RwLock<Option<String>>>,
}

impl InspectionProbe {
    /// Creates an empty probe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the slot with the given event's type and timestamp.
    pub fn record(&self, kind: LifecycleKind, timestamp_ms: f64) {
        let json = serde_json::json!({
            "type": kind.wire_name(),
            "timestamp": timestamp_ms,
        })
        .to_string();
        *self.latest.write() = Some(json);
    }

    /// Returns the latest `{type, timestamp}` JSON, if any event has
    /// been recorded yet.
    #[must_use]
    pub fn latest_json(&self) -> Option<String> {
        self.latest.read().clone()
    }

    /// Returns the slot identifier tooling should poll.
    #[must_use]
    pub fn slot_id(&self) -> &'static str {
        PROBE_SLOT_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_until_first_record() {
        let probe = InspectionProbe::new();
        assert!(probe.latest_json().is_none());
    }

    #[test]
    fn record_stores_type_and_timestamp() {
        let probe = InspectionProbe::new();
        probe.record(LifecycleKind::TestBeforeRun, 1_000.25);

        let json: serde_json::Value =
            serde_json::from_str(&probe.latest_json().unwrap()).unwrap();
        assert_eq!(json["type"], "testBeforeRun");
        assert_eq!(json["timestamp"], 1_000.25);
    }

    #[test]
    fn record_overwrites_previous() {
        let probe = InspectionProbe::new();
        probe.record(LifecycleKind::LogAdded, 1.0);
        probe.record(LifecycleKind::LogChanged, 2.0);

        let json: serde_json::Value =
            serde_json::from_str(&probe.latest_json().unwrap()).unwrap();
        assert_eq!(json["type"], "logChanged");
        assert_eq!(json["timestamp"], 2.0);
    }

    #[test]
    fn clones_share_the_slot() {
        let probe = InspectionProbe::new();
        let clone = probe.clone();

        probe.record(LifecycleKind::PageLoading, 5.0);
        assert!(clone.latest_json().unwrap().contains("pageLoading"));
    }

    #[test]
    fn slot_id_is_well_known() {
        let probe = InspectionProbe::new();
        assert_eq!(probe.slot_id(), PROBE_SLOT_ID);
    }
}
