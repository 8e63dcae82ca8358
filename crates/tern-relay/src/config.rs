//! Relay configuration.
//!
//! Capacities are per-subscriber broadcast buffers: a subscriber that
//! falls further behind than the capacity starts losing the oldest
//! messages (surfaced as `RELAY_LAGGED` in logs). The defaults are
//! generous for interactive pause/resume traffic; raise
//! `main_capacity` if lifecycle narration is dense and the capture
//! sink is slow.

use serde::{Deserialize, Serialize};

/// Default per-subscriber buffer size for both buses.
pub const DEFAULT_BUS_CAPACITY: usize = 64;

/// Configuration for the buses a relay session runs on.
///
/// # Example
///
/// ```
/// use tern_relay::RelayConfig;
///
/// let config = RelayConfig::default().with_main_capacity(256);
/// assert_eq!(config.main_capacity(), 256);
/// assert_eq!(config.reporter_capacity(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Main bus buffer per subscriber.
    main_capacity: usize,
    /// Reporter bus buffer per subscriber.
    reporter_capacity: usize,
}

impl RelayConfig {
    /// Returns the main bus capacity.
    #[must_use]
    pub fn main_capacity(&self) -> usize {
        self.main_capacity
    }

    /// Returns the reporter bus capacity.
    #[must_use]
    pub fn reporter_capacity(&self) -> usize {
        self.reporter_capacity
    }

    /// Sets the main bus capacity.
    #[must_use]
    pub fn with_main_capacity(mut self, capacity: usize) -> Self {
        self.main_capacity = capacity;
        self
    }

    /// Sets the reporter bus capacity.
    #[must_use]
    pub fn with_reporter_capacity(mut self, capacity: usize) -> Self {
        self.reporter_capacity = capacity;
        self
    }

    /// Builds the bus pair described by this config.
    #[must_use]
    pub fn build_buses(&self) -> (crate::MainBus, crate::ReporterBus) {
        (
            crate::MainBus::new(self.main_capacity),
            crate::ReporterBus::new(self.reporter_capacity),
        )
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            main_capacity: DEFAULT_BUS_CAPACITY,
            reporter_capacity: DEFAULT_BUS_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.main_capacity(), DEFAULT_BUS_CAPACITY);
        assert_eq!(config.reporter_capacity(), DEFAULT_BUS_CAPACITY);
    }

    #[test]
    fn builders_override_independently() {
        let config = RelayConfig::default()
            .with_main_capacity(128)
            .with_reporter_capacity(16);
        assert_eq!(config.main_capacity(), 128);
        assert_eq!(config.reporter_capacity(), 16);
    }

    #[tokio::test]
    async fn build_buses_produces_working_pair() {
        let (main, reporter) = RelayConfig::default().build_buses();
        assert_eq!(main.receiver_count(), 0);
        assert_eq!(reporter.receiver_count(), 0);
    }
}
