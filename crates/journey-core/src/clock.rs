//! Simulated clock for a journey.
//!
//! Simulated time runs independently of wall-clock time. Every tick the
//! clock jumps forward by a random whole number of seconds, so consecutive
//! readings are strictly increasing but irregularly spaced.

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;

/// Smallest per-tick advance, in seconds.
pub const MIN_STEP_SECONDS: i64 = 30;

/// Largest per-tick advance, in seconds.
pub const MAX_STEP_SECONDS: i64 = 60;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// The timestamp would leave the representable range.
    #[error("simulated time overflow: cannot advance {current} by {seconds}s")]
    Overflow {
        /// Time before the failed advance.
        current: DateTime<Utc>,
        /// Requested advance in seconds.
        seconds: i64,
    },
}

/// Monotonic simulated time source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedClock {
    current: DateTime<Utc>,
}

impl SimulatedClock {
    /// Create a clock reading `start`.
    pub const fn new(start: DateTime<Utc>) -> Self {
        Self { current: start }
    }

    /// Current simulated time.
    pub const fn current(&self) -> DateTime<Utc> {
        self.current
    }

    /// Advance by a uniform random `[30, 60]` seconds and return the new
    /// time.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::Overflow`] if the new time is out of range.
    pub fn next(&mut self, rng: &mut impl Rng) -> Result<DateTime<Utc>, ClockError> {
        let seconds = rng.random_range(MIN_STEP_SECONDS..=MAX_STEP_SECONDS);
        self.advance_by(seconds)
    }

    fn advance_by(&mut self, seconds: i64) -> Result<DateTime<Utc>, ClockError> {
        let current = self.current;
        let overflow = || ClockError::Overflow { current, seconds };
        let delta = TimeDelta::try_seconds(seconds).ok_or_else(overflow)?;
        self.current = current.checked_add_signed(delta).ok_or_else(overflow)?;
        Ok(self.current)
    }
}
