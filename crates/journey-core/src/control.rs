//! Shared stop control for a running journey.
//!
//! The journey loop and whatever watches for an interrupt (the Ctrl-C
//! handler in the binary, a test) share one [`JourneyControl`] behind an
//! [`Arc`](std::sync::Arc). A stop is only ever observed between ticks: the
//! loop checks the flag before each tick and races it against the pacing
//! delay, never while a tick's events are being emitted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Notify;

/// Stop flag plus wake-up for the pacing delay.
#[derive(Debug, Default)]
pub struct JourneyControl {
    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Wakes a loop that is sleeping between ticks.
    stop_notify: Notify,
}

impl JourneyControl {
    /// Create a control with no stop requested.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a clean stop. Idempotent.
    ///
    /// If the loop is mid-tick, the permit stored by `notify_one` makes the
    /// next pacing delay return immediately.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
        self.stop_notify.notify_one();
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Sleep for `interval` unless a stop arrives first.
    ///
    /// Returns `true` if the full interval elapsed and the loop should
    /// continue, `false` if a stop was requested.
    pub async fn pace(&self, interval: Duration) -> bool {
        if self.is_stop_requested() {
            return false;
        }
        tokio::select! {
            () = tokio::time::sleep(interval) => !self.is_stop_requested(),
            () = self.stop_notify.notified() => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn pace_runs_full_interval_without_stop() {
        let control = JourneyControl::new();
        let started = tokio::time::Instant::now();
        assert!(control.pace(Duration::from_secs(5)).await);
        assert!(started.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_before_pace_returns_immediately() {
        let control = JourneyControl::new();
        control.request_stop();
        let started = tokio::time::Instant::now();
        assert!(!control.pace(Duration::from_secs(5)).await);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_during_pace_wakes_sleeper() {
        let control = Arc::new(JourneyControl::new());
        let stopper = Arc::clone(&control);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(2)).await;
            stopper.request_stop();
        });

        let started = tokio::time::Instant::now();
        assert!(!control.pace(Duration::from_secs(5)).await);
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(handle.await.is_ok());
    }

    #[test]
    fn request_stop_is_idempotent() {
        let control = JourneyControl::new();
        assert!(!control.is_stop_requested());
        control.request_stop();
        control.request_stop();
        assert!(control.is_stop_requested());
    }
}
