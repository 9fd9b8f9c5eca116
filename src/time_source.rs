//! Monotonic clock abstraction for real and simulated time.
//!
//! The ramp engine reads time and sleeps only through [`Clock`], so tests can
//! drive a full countdown on simulated time without waiting for it.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Source of monotonic time and sleeping.
pub trait Clock {
    /// Current monotonic instant.
    fn now(&self) -> Instant;

    /// Suspend the calling thread for `duration` (or simulate it).
    fn sleep(&self, duration: Duration);
}

/// Real monotonic clock backed by [`Instant`] and [`std::thread::sleep`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Simulated clock where sleeping advances time instantly.
///
/// Clones share the same timeline, so a test can hand one clone to the ramp
/// and keep another to advance or inspect time from a mocked backend.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    base: Instant,
    elapsed: Arc<Mutex<Duration>>,
    /// Extra time added on every sleep, to model a slow scheduler
    oversleep: Duration,
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            elapsed: Arc::new(Mutex::new(Duration::ZERO)),
            oversleep: Duration::ZERO,
        }
    }

    /// Make every sleep last `extra` longer than requested.
    pub fn with_oversleep(mut self, extra: Duration) -> Self {
        self.oversleep = extra;
        self
    }

    /// Move simulated time forward without sleeping.
    pub fn advance(&self, duration: Duration) {
        let mut elapsed = self.elapsed.lock().unwrap_or_else(|e| e.into_inner());
        *elapsed += duration;
    }

    /// Total simulated time since the clock was created.
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for SimulatedClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> Instant {
        self.base + self.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration + self.oversleep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_sleep_advances_time() {
        let clock = SimulatedClock::new();
        let start = clock.now();
        clock.sleep(Duration::from_millis(100));
        assert_eq!(clock.now() - start, Duration::from_millis(100));
    }

    #[test]
    fn test_simulated_clones_share_timeline() {
        let clock = SimulatedClock::new().with_oversleep(Duration::from_millis(5));
        let other = clock.clone();
        clock.sleep(Duration::from_millis(10));
        other.advance(Duration::from_millis(1));
        assert_eq!(clock.elapsed(), Duration::from_millis(16));
        assert_eq!(other.elapsed(), Duration::from_millis(16));
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        clock.sleep(Duration::from_millis(1));
        assert!(clock.now() >= a);
    }
}
