//! Per-bus message enums.
//!
//! One closed enum per bus. The relay routes on variants, never on
//! string names, so the full signal set of each bus is visible in one
//! place and the compiler enforces exhaustive handling.

use serde::{Deserialize, Serialize};

use crate::{ControlCommand, LifecycleEvent, PauseNotice};

/// Everything that flows on the main bus.
///
/// The main bus connects the test-execution internals: the runner and
/// any isolated contexts emit here, and the relay both listens here
/// (for suspends) and emits here (to broadcast resume commands into a
/// main-context pause).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MainMessage {
    /// Execution suspended, from the main context or an isolated one.
    Paused(PauseNotice),
    /// A resume command broadcast into the main context.
    Control(ControlCommand),
    /// Runner narration destined for protocol capture.
    Lifecycle(LifecycleEvent),
}

impl MainMessage {
    /// Returns `true` if this is a suspend notice.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused(_))
    }

    /// Returns `true` if this is a lifecycle event.
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::Lifecycle(_))
    }
}

/// Everything that flows on the reporter bus.
///
/// The reporter bus connects test-execution internals to the
/// user-facing results UI. `Paused` travels relay → UI; `Next` and
/// `Resume` travel UI → relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReporterMessage {
    /// Outbound: execution is paused in front of the named command.
    Paused {
        /// Name of the command execution stopped in front of.
        next_command: String,
    },
    /// Inbound: the user asked to advance one step (wire `runner:next`).
    Next,
    /// Inbound: the user asked to resume entirely (wire `runner:resume`).
    Resume,
}

impl ReporterMessage {
    /// Returns the original wire name of this message.
    #[must_use]
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Paused { .. } => "paused",
            Self::Next => "runner:next",
            Self::Resume => "runner:resume",
        }
    }

    /// Returns `true` for messages the UI sends to the relay.
    #[must_use]
    pub fn is_user_command(&self) -> bool {
        matches!(self, Self::Next | Self::Resume)
    }
}

impl std::fmt::Display for ReporterMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LifecycleKind;
    use tern_types::OriginId;

    #[test]
    fn main_message_predicates() {
        let paused = MainMessage::Paused(PauseNotice::main("get"));
        assert!(paused.is_paused());
        assert!(!paused.is_lifecycle());

        let lifecycle = MainMessage::Lifecycle(LifecycleEvent::new(
            LifecycleKind::Snapshot,
            serde_json::json!({}),
        ));
        assert!(lifecycle.is_lifecycle());

        let control = MainMessage::Control(ControlCommand::Next);
        assert!(!control.is_paused());
        assert!(!control.is_lifecycle());
    }

    #[test]
    fn reporter_wire_names() {
        assert_eq!(
            ReporterMessage::Paused {
                next_command: "get".into()
            }
            .wire_name(),
            "paused"
        );
        assert_eq!(ReporterMessage::Next.wire_name(), "runner:next");
        assert_eq!(ReporterMessage::Resume.wire_name(), "runner:resume");
    }

    #[test]
    fn user_command_direction() {
        assert!(ReporterMessage::Next.is_user_command());
        assert!(ReporterMessage::Resume.is_user_command());
        assert!(!ReporterMessage::Paused {
            next_command: "get".into()
        }
        .is_user_command());
    }

    #[test]
    fn main_message_round_trip() {
        let msg = MainMessage::Paused(PauseNotice::isolated(
            "get",
            OriginId::new("https://sub.example.com"),
        ));
        let json = serde_json::to_string(&msg).unwrap();
        let back: MainMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
