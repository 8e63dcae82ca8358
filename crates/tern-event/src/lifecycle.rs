//! Runner lifecycle events destined for protocol capture.
//!
//! Lifecycle events are the data-plane traffic of the main bus: the
//! runner narrates what it is doing (tests starting and finishing,
//! logs appearing, the page navigating) and the capture pipeline
//! appends the narration to a durable trace. The relay's control
//! plane never inspects these.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The closed set of lifecycle event kinds the capture sink accepts.
///
/// Wire names are camelCase, matching the original protocol
/// vocabulary.
///
/// | Kind | Emitted when |
/// |------|--------------|
/// | `Snapshot` | a DOM snapshot is taken |
/// | `LogAdded` | a command log entry is created |
/// | `LogChanged` | an existing log entry mutates |
/// | `ViewportChanged` | the viewport is resized |
/// | `TestBeforeRun` | a test is about to run |
/// | `TestAfterRun` | a test has finished |
/// | `UrlChanged` | the page URL changes |
/// | `PageLoading` | a page load begins |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LifecycleKind {
    /// A DOM snapshot was taken.
    Snapshot,
    /// A command log entry was created.
    LogAdded,
    /// An existing command log entry changed.
    LogChanged,
    /// The viewport was resized.
    ViewportChanged,
    /// A test is about to run.
    TestBeforeRun,
    /// A test finished running.
    TestAfterRun,
    /// The page URL changed.
    UrlChanged,
    /// A page load began.
    PageLoading,
}

impl LifecycleKind {
    /// All kinds, for exhaustive tests and sink initialization checks.
    pub const ALL: [LifecycleKind; 8] = [
        Self::Snapshot,
        Self::LogAdded,
        Self::LogChanged,
        Self::ViewportChanged,
        Self::TestBeforeRun,
        Self::TestAfterRun,
        Self::UrlChanged,
        Self::PageLoading,
    ];

    /// Returns the camelCase wire name of this kind.
    ///
    /// # Example
    ///
    /// ```
    /// use tern_event::LifecycleKind;
    ///
    /// assert_eq!(LifecycleKind::TestBeforeRun.wire_name(), "testBeforeRun");
    /// assert_eq!(LifecycleKind::Snapshot.wire_name(), "snapshot");
    /// ```
    #[must_use]
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Snapshot => "snapshot",
            Self::LogAdded => "logAdded",
            Self::LogChanged => "logChanged",
            Self::ViewportChanged => "viewportChanged",
            Self::TestBeforeRun => "testBeforeRun",
            Self::TestAfterRun => "testAfterRun",
            Self::UrlChanged => "urlChanged",
            Self::PageLoading => "pageLoading",
        }
    }
}

impl std::fmt::Display for LifecycleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// A lifecycle event as observed on the main bus.
///
/// The payload shape is kind-specific and opaque to everything except
/// the sink that ultimately stores it; the bus and the forwarder treat
/// it as a black box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    /// What happened.
    pub kind: LifecycleKind,
    /// Kind-specific payload.
    pub payload: Value,
}

impl LifecycleEvent {
    /// Creates a lifecycle event.
    #[must_use]
    pub fn new(kind: LifecycleKind, payload: Value) -> Self {
        Self { kind, payload }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_camel_case() {
        assert_eq!(LifecycleKind::Snapshot.wire_name(), "snapshot");
        assert_eq!(LifecycleKind::LogAdded.wire_name(), "logAdded");
        assert_eq!(LifecycleKind::LogChanged.wire_name(), "logChanged");
        assert_eq!(LifecycleKind::ViewportChanged.wire_name(), "viewportChanged");
        assert_eq!(LifecycleKind::TestBeforeRun.wire_name(), "testBeforeRun");
        assert_eq!(LifecycleKind::TestAfterRun.wire_name(), "testAfterRun");
        assert_eq!(LifecycleKind::UrlChanged.wire_name(), "urlChanged");
        assert_eq!(LifecycleKind::PageLoading.wire_name(), "pageLoading");
    }

    #[test]
    fn serde_matches_wire_name() {
        for kind in LifecycleKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.wire_name()));

            let back: LifecycleKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn all_contains_every_kind_once() {
        use std::collections::HashSet;
        let set: HashSet<_> = LifecycleKind::ALL.into_iter().collect();
        assert_eq!(set.len(), 8);
    }

    #[test]
    fn event_round_trip() {
        let event = LifecycleEvent::new(
            LifecycleKind::UrlChanged,
            serde_json::json!({"url": "https://a.test/page"}),
        );
        let json = serde_json::to_string(&event).unwrap();
        let back: LifecycleEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn display_uses_wire_name() {
        assert_eq!(LifecycleKind::PageLoading.to_string(), "pageLoading");
    }
}
