//! Pure routing core.
//!
//! Everything the relay decides is decided here, in a pure function:
//! no bus, no task, no lock. [`route`] maps (current origin token,
//! incoming message) to (routing action, token afterwards); the
//! relay's listener tasks only apply the result. This keeps the whole
//! routing table unit-testable and keeps the token transition next to
//! the rule that causes it.
//!
//! # Routing Table
//!
//! | Input | Token before | Action | Token after |
//! |-------|--------------|--------|-------------|
//! | `Paused` (no origin) | t | report paused | t |
//! | `Paused` (origin A) | any | report paused | A |
//! | `Next` | `Some(A)` | forward Next to A | `Some(A)` |
//! | `Next` | `None` | broadcast Next | `None` |
//! | `ResumeAll` | `Some(A)` | forward ResumeAll to A | `None` |
//! | `ResumeAll` | `None` | broadcast ResumeAll | `None` |
//!
//! Two rules carry the whole invariant:
//!
//! - Only a `Paused` carrying an origin writes the token, and it
//!   overwrites (last-write-wins — a second isolated context pausing
//!   before the first resumes replaces it; there is no queue).
//! - Only `ResumeAll` clears the token, and it clears unconditionally.
//!   Advancing one step does not end the pause.

use tern_event::{ControlCommand, PauseNotice};
use tern_types::OriginId;

/// A message the relay must route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayInput {
    /// A suspend notice observed on the main bus.
    Paused(PauseNotice),
    /// A user command observed on the reporter bus.
    Command(ControlCommand),
}

/// Where a routed message must go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAction {
    /// Tell the reporter the run is paused in front of a command.
    ReportPaused {
        /// Command name to show next to the resume controls.
        next_command: String,
    },
    /// Deliver the command to the named isolated context only.
    ForwardToOrigin {
        /// The recorded suspend origin.
        origin: OriginId,
        /// The command to deliver.
        command: ControlCommand,
    },
    /// Broadcast the command in the main context.
    BroadcastMain {
        /// The command to broadcast.
        command: ControlCommand,
    },
}

/// Result of routing one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// What to do with the message.
    pub action: RouteAction,
    /// The origin token after this message is processed.
    pub token_after: Option<OriginId>,
}

/// Routes one incoming message against the current origin token.
///
/// Pure: same inputs, same decision, no side effects. The caller is
/// responsible for applying `token_after` and executing `action`
/// atomically with respect to other routed messages (the relay does
/// both inside one lock acquisition).
///
/// # Example
///
/// ```
/// use tern_event::{ControlCommand, PauseNotice};
/// use tern_relay::{route, RelayInput, RouteAction};
/// use tern_types::OriginId;
///
/// let origin = OriginId::new("https://sub.example.com");
///
/// // An isolated context suspends: the token records it.
/// let d = route(
///     None,
///     RelayInput::Paused(PauseNotice::isolated("get", origin.clone())),
/// );
/// assert_eq!(d.token_after, Some(origin.clone()));
///
/// // Resume routes back to exactly that context, then clears.
/// let d = route(
///     d.token_after.as_ref(),
///     RelayInput::Command(ControlCommand::ResumeAll),
/// );
/// assert_eq!(
///     d.action,
///     RouteAction::ForwardToOrigin { origin, command: ControlCommand::ResumeAll }
/// );
/// assert_eq!(d.token_after, None);
/// ```
#[must_use]
pub fn route(token: Option<&OriginId>, input: RelayInput) -> Decision {
    match input {
        RelayInput::Paused(notice) => {
            // A cross-origin suspend overwrites the token
            // (last-write-wins); a main-context suspend leaves it
            // untouched.
            let token_after = match notice.origin {
                Some(origin) => Some(origin),
                None => token.cloned(),
            };
            Decision {
                action: RouteAction::ReportPaused {
                    next_command: notice.next_command,
                },
                token_after,
            }
        }
        RelayInput::Command(command) => {
            let action = match token {
                Some(origin) => RouteAction::ForwardToOrigin {
                    origin: origin.clone(),
                    command,
                },
                None => RouteAction::BroadcastMain { command },
            };
            // ResumeAll is the only clearing operation, and it clears
            // unconditionally.
            let token_after = if command.is_resume_all() {
                None
            } else {
                token.cloned()
            };
            Decision { action, token_after }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin(s: &str) -> OriginId {
        OriginId::new(s)
    }

    #[test]
    fn main_pause_reports_and_leaves_token_none() {
        let d = route(None, RelayInput::Paused(PauseNotice::main("click")));

        assert_eq!(
            d.action,
            RouteAction::ReportPaused {
                next_command: "click".into()
            }
        );
        assert_eq!(d.token_after, None);
    }

    #[test]
    fn isolated_pause_records_origin() {
        let a = origin("https://a.test");
        let d = route(
            None,
            RelayInput::Paused(PauseNotice::isolated("get", a.clone())),
        );

        assert_eq!(
            d.action,
            RouteAction::ReportPaused {
                next_command: "get".into()
            }
        );
        assert_eq!(d.token_after, Some(a));
    }

    #[test]
    fn second_isolated_pause_overwrites_first() {
        let a = origin("https://a.test");
        let b = origin("https://b.test");

        let d = route(
            Some(&a),
            RelayInput::Paused(PauseNotice::isolated("type", b.clone())),
        );

        // Last-write-wins, not a queue.
        assert_eq!(d.token_after, Some(b));
    }

    #[test]
    fn main_pause_does_not_disturb_recorded_origin() {
        let a = origin("https://a.test");
        let d = route(Some(&a), RelayInput::Paused(PauseNotice::main("click")));

        assert_eq!(d.token_after, Some(a));
    }

    #[test]
    fn next_with_no_token_broadcasts() {
        let d = route(None, RelayInput::Command(ControlCommand::Next));

        assert_eq!(
            d.action,
            RouteAction::BroadcastMain {
                command: ControlCommand::Next
            }
        );
        assert_eq!(d.token_after, None);
    }

    #[test]
    fn next_with_token_forwards_and_keeps_token() {
        let a = origin("https://a.test");
        let d = route(Some(&a), RelayInput::Command(ControlCommand::Next));

        assert_eq!(
            d.action,
            RouteAction::ForwardToOrigin {
                origin: a.clone(),
                command: ControlCommand::Next
            }
        );
        // Advancing one step does not end the pause.
        assert_eq!(d.token_after, Some(a));
    }

    #[test]
    fn two_consecutive_next_both_route_to_same_origin() {
        let a = origin("https://a.test");

        let first = route(Some(&a), RelayInput::Command(ControlCommand::Next));
        let second = route(
            first.token_after.as_ref(),
            RelayInput::Command(ControlCommand::Next),
        );

        for d in [first, second] {
            assert_eq!(
                d.action,
                RouteAction::ForwardToOrigin {
                    origin: a.clone(),
                    command: ControlCommand::Next
                }
            );
        }
    }

    #[test]
    fn resume_all_with_token_forwards_then_clears() {
        let a = origin("https://a.test");
        let d = route(Some(&a), RelayInput::Command(ControlCommand::ResumeAll));

        assert_eq!(
            d.action,
            RouteAction::ForwardToOrigin {
                origin: a,
                command: ControlCommand::ResumeAll
            }
        );
        assert_eq!(d.token_after, None);
    }

    #[test]
    fn resume_all_with_no_token_broadcasts() {
        let d = route(None, RelayInput::Command(ControlCommand::ResumeAll));

        assert_eq!(
            d.action,
            RouteAction::BroadcastMain {
                command: ControlCommand::ResumeAll
            }
        );
        assert_eq!(d.token_after, None);
    }

    #[test]
    fn overlapping_pause_sequence_routes_to_latest_only() {
        // paused(A), paused(B), resume:all -> only B is targeted.
        let a = origin("https://a.test");
        let b = origin("https://b.test");

        let d1 = route(
            None,
            RelayInput::Paused(PauseNotice::isolated("get", a)),
        );
        let d2 = route(
            d1.token_after.as_ref(),
            RelayInput::Paused(PauseNotice::isolated("type", b.clone())),
        );
        let d3 = route(
            d2.token_after.as_ref(),
            RelayInput::Command(ControlCommand::ResumeAll),
        );

        assert_eq!(
            d3.action,
            RouteAction::ForwardToOrigin {
                origin: b,
                command: ControlCommand::ResumeAll
            }
        );
        assert_eq!(d3.token_after, None);
    }

    #[test]
    fn pause_resume_pause_cycle_is_reusable() {
        // After a full cycle the router behaves like new.
        let a = origin("https://a.test");

        let d1 = route(
            None,
            RelayInput::Paused(PauseNotice::isolated("get", a.clone())),
        );
        let d2 = route(
            d1.token_after.as_ref(),
            RelayInput::Command(ControlCommand::ResumeAll),
        );
        assert_eq!(d2.token_after, None);

        let d3 = route(
            d2.token_after.as_ref(),
            RelayInput::Paused(PauseNotice::isolated("click", a.clone())),
        );
        assert_eq!(d3.token_after, Some(a));
    }
}
