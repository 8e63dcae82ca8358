//! Monotonic capture clock.
//!
//! Trace consumers need two properties from a timestamp that no single
//! OS clock provides: it must read as wall-clock time (so events line
//! up with external logs) and it must never go backwards (so replay
//! order is trustworthy). The wall clock can step backwards under NTP;
//! the monotonic clock has no epoch.
//!
//! [`CaptureClock`] composes both: the wall clock is read exactly once
//! at construction as a fixed time origin, and every subsequent read is
//! that origin plus a high-resolution monotonic offset.

use std::time::Instant;

/// Clock producing monotonically non-decreasing epoch timestamps.
///
/// Timestamps are wall-clock epoch milliseconds with sub-millisecond
/// fraction, as an `f64`.
///
/// # Example
///
/// ```
/// use tern_capture::CaptureClock;
///
/// let clock = CaptureClock::new();
/// let a = clock.now_ms();
/// let b = clock.now_ms();
/// assert!(b >= a);
/// ```
#[derive(Debug, Clone)]
pub struct CaptureClock {
    /// Wall-clock epoch milliseconds at construction.
    origin_epoch_ms: f64,
    /// Monotonic reference point taken at the same moment.
    started: Instant,
}

impl CaptureClock {
    /// Creates a clock with its time origin fixed at the current
    /// wall-clock time.
    #[must_use]
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        // timestamp_micros keeps the sub-millisecond fraction that
        // timestamp_millis would truncate.
        let origin_epoch_ms = now.timestamp_micros() as f64 / 1_000.0;
        Self {
            origin_epoch_ms,
            started: Instant::now(),
        }
    }

    /// Creates a clock with an explicit time origin.
    ///
    /// Useful in tests that need deterministic absolute values; the
    /// monotonic offset still advances normally.
    #[must_use]
    pub fn with_origin(origin_epoch_ms: f64) -> Self {
        Self {
            origin_epoch_ms,
            started: Instant::now(),
        }
    }

    /// Returns the current timestamp in epoch milliseconds.
    ///
    /// Non-decreasing across calls on the same clock, regardless of
    /// wall-clock steps, because only the monotonic offset advances.
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        let elapsed = self.started.elapsed();
        self.origin_epoch_ms + elapsed.as_secs_f64() * 1_000.0
    }

    /// Returns the fixed time origin in epoch milliseconds.
    #[must_use]
    pub fn origin_ms(&self) -> f64 {
        self.origin_epoch_ms
    }
}

impl Default for CaptureClock {
    fn default() -> Self {
        Self::new()
    }
}
