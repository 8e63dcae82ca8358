//! Pause/resume control vocabulary.
//!
//! Two things flow in the control plane: a notice that execution has
//! suspended ([`PauseNotice`]) and a command to move it again
//! ([`ControlCommand`]). The notice travels runner → relay → reporter;
//! the command travels reporter → relay → whichever context the relay
//! decides on.

use serde::{Deserialize, Serialize};
use tern_types::OriginId;

use crate::EventError;

/// A command that moves suspended test execution.
///
/// | Command | Wire name | Effect |
/// |---------|-----------|--------|
/// | `Next` | `resume:next` | Advance one step; the pause continues |
/// | `ResumeAll` | `resume:all` | End the pause entirely |
///
/// The routing difference between the two lives in the relay, not
/// here: `ResumeAll` is the only command that clears the recorded
/// suspend origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlCommand {
    /// Advance to the next step while remaining paused.
    Next,
    /// Resume execution entirely.
    ResumeAll,
}

impl ControlCommand {
    /// Returns the original wire name of this command.
    ///
    /// # Example
    ///
    /// ```
    /// use tern_event::ControlCommand;
    ///
    /// assert_eq!(ControlCommand::Next.wire_name(), "resume:next");
    /// assert_eq!(ControlCommand::ResumeAll.wire_name(), "resume:all");
    /// ```
    #[must_use]
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Next => "resume:next",
            Self::ResumeAll => "resume:all",
        }
    }

    /// Returns `true` if this is the `Next` command.
    #[must_use]
    pub fn is_next(&self) -> bool {
        matches!(self, Self::Next)
    }

    /// Returns `true` if this is the `ResumeAll` command.
    #[must_use]
    pub fn is_resume_all(&self) -> bool {
        matches!(self, Self::ResumeAll)
    }
}

impl std::fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// Notice that test execution has suspended.
///
/// Carries the name of the command execution stopped in front of, and
/// the origin of the isolated context that requested the suspend — or
/// `None` when the suspend came from the main context itself.
///
/// # Payload Shape
///
/// Serialized in the original wire shape:
///
/// ```json
/// { "nextCommandName": "get", "origin": "https://sub.example.com" }
/// ```
///
/// `origin` is omitted for a main-context suspend.
///
/// # Example
///
/// ```
/// use tern_event::PauseNotice;
/// use tern_types::OriginId;
///
/// let main = PauseNotice::main("click");
/// assert!(main.origin.is_none());
///
/// let bridged = PauseNotice::isolated("get", OriginId::new("https://sub.example.com"));
/// assert_eq!(bridged.origin.as_ref().unwrap().as_str(), "https://sub.example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseNotice {
    /// Name of the command execution is paused in front of.
    #[serde(rename = "nextCommandName")]
    pub next_command: String,
    /// Origin of the isolated context that requested the suspend,
    /// or `None` for a main-context suspend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<OriginId>,
}

impl PauseNotice {
    /// Creates a notice for a suspend requested from the main context.
    #[must_use]
    pub fn main(next_command: impl Into<String>) -> Self {
        Self {
            next_command: next_command.into(),
            origin: None,
        }
    }

    /// Creates a notice for a suspend requested from an isolated context.
    #[must_use]
    pub fn isolated(next_command: impl Into<String>, origin: OriginId) -> Self {
        Self {
            next_command: next_command.into(),
            origin: Some(origin),
        }
    }

    /// Creates a notice, rejecting an empty command name.
    ///
    /// The command name is what the reporter shows the user next to the
    /// resume controls; an empty one indicates a bug in the emitter.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::EmptyCommand`] if `next_command` is empty.
    pub fn try_new(
        next_command: impl Into<String>,
        origin: Option<OriginId>,
    ) -> Result<Self, EventError> {
        let next_command = next_command.into();
        if next_command.is_empty() {
            return Err(EventError::EmptyCommand);
        }
        Ok(Self {
            next_command,
            origin,
        })
    }

    /// Returns `true` if the suspend came from an isolated context.
    #[must_use]
    pub fn is_cross_origin(&self) -> bool {
        self.origin.is_some()
    }
}
