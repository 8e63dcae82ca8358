//! Identifier types for TERN.
//!
//! Two identities matter in this system: *which isolated context* a
//! signal came from ([`OriginId`]) and *which attach generation* a
//! handler set belongs to ([`RunId`]).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of an isolated execution context.
///
/// An isolated context is a separate browsing context running test code
/// against a different origin than the main runner page. It talks to
/// the main context only via message passing, and it is addressed by
/// its origin string (e.g. `https://sub.example.com`).
///
/// The value is opaque to the relay: it is recorded when a suspend
/// arrives and handed back verbatim when a resume must be routed. The
/// relay never parses it.
///
/// # Why Not a UUID?
///
/// Origins are externally assigned (they are URLs owned by the page
/// under test), so minting them locally would be meaningless. Compare
/// [`RunId`], which *is* locally minted.
///
/// # Why No Default?
///
/// **DO NOT implement `Default` for OriginId.** A made-up origin
/// routes nowhere; an `OriginId` only ever enters the system from a
/// `paused` signal that carried one.
///
/// # Example
///
/// ```
/// use tern_types::OriginId;
///
/// let origin = OriginId::new("https://sub.example.com");
/// assert_eq!(origin.as_str(), "https://sub.example.com");
/// assert_eq!(origin.to_string(), "origin:https://sub.example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OriginId(String);

impl OriginId {
    /// Creates an [`OriginId`] from an origin string.
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        Self(origin.into())
    }

    /// Returns the origin string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OriginId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for OriginId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for OriginId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "origin:{}", self.0)
    }
}

/// Identifier for one attach generation of the relay.
///
/// Every [`attach`] creates a new handler set tagged with a fresh
/// `RunId`; the previous set is torn down, never merged. The id exists
/// so teardown and stale-delivery problems are attributable in logs:
/// two generations with the same name are indistinguishable, two
/// generations with different `RunId`s are not.
///
/// [`attach`]: https://docs.rs/tern-relay
///
/// # Example
///
/// ```
/// use tern_types::RunId;
///
/// let a = RunId::new();
/// let b = RunId::new();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

#[allow(clippy::new_without_default)] // Default intentionally not implemented - a RunId marks a real attach, not a placeholder
impl RunId {
    /// Creates a new [`RunId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "run:{}", self.0)
    }
}
