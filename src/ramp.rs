//! Time-stepped brightness ramp with cancellation-safe rollback.
//!
//! A ramp walks a device from its original brightness toward a resolved
//! target over a countdown. Every poll interval it computes the next value as
//! a linear decay of the original brightness over the elapsed time and
//! submits it when it differs from what the device already shows. When the
//! countdown expires the device is set to the target exactly; when the ramp is
//! cancelled by a termination signal the device is set back to its original
//! brightness instead.
//!
//! # Intermediate Values
//!
//! The per-step value decays from the original brightness toward zero rather
//! than interpolating toward the target, so for targets far from zero the
//! intermediate steps move away from the target and the final submission makes
//! the jump. With short countdowns this is barely visible.
//!
//! # Failure Behavior
//!
//! A failed submission aborts the ramp immediately and leaves the device at
//! the last value that was applied. Nothing is retried and nothing is rolled
//! back; rollback only happens on cancellation.

use std::time::{Duration, Instant};

use crate::backend::BrightnessBackend;
use crate::brightness::DeviceBrightnessState;
use crate::constants::DEFAULT_POLL_INTERVAL_MS;
use crate::error::BrightnessError;
use crate::logger::Log;
use crate::signals::{CancellationToken, critical};
use crate::time_source::Clock;
use crate::utils::{decay_step, duration_millis};

/// Lifecycle of a [`BrightnessRamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampState {
    Idle,
    Running,
    /// Countdown expired and the device was set to the target
    Completed,
    /// A termination signal arrived and the device was restored
    Cancelled,
    /// A submission failed
    Failed,
}

/// How a ramp ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampOutcome {
    /// The device is at `target`.
    Completed { target: u32 },
    /// The device is back at `original`.
    Cancelled { original: u32 },
}

/// Countdown measured on a monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    duration: Duration,
    start: Instant,
    /// `None` when the deadline lies beyond what `Instant` can represent
    deadline: Option<Instant>,
}

impl Countdown {
    pub fn start(duration: Duration, now: Instant) -> Self {
        Self {
            duration,
            start: now,
            deadline: now.checked_add(duration),
        }
    }

    pub fn duration_ms(&self) -> u64 {
        duration_millis(self.duration)
    }

    pub fn elapsed_ms(&self, now: Instant) -> u64 {
        duration_millis(now.saturating_duration_since(self.start))
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }
}

/// A single brightness transition on one device.
#[derive(Debug)]
pub struct BrightnessRamp {
    device: String,
    state: DeviceBrightnessState,
    target: u32,
    duration: Duration,
    poll_interval: Duration,
    ramp_state: RampState,
}

impl BrightnessRamp {
    /// Create a ramp from the device's captured state to `target` over `duration`.
    ///
    /// `target` must already be resolved against `state`, i.e. lie in `[0, max]`.
    pub fn new(
        device: impl Into<String>,
        state: DeviceBrightnessState,
        target: u32,
        duration: Duration,
    ) -> Self {
        debug_assert!(target <= state.max());
        Self {
            device: device.into(),
            state,
            target,
            duration,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            ramp_state: RampState::Idle,
        }
    }

    /// Set the delay between ramp steps (at least one millisecond).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn state(&self) -> RampState {
        self.ramp_state
    }

    /// Device brightness as last applied by this ramp.
    pub fn device_state(&self) -> &DeviceBrightnessState {
        &self.state
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Run the ramp to completion or cancellation.
    ///
    /// # Arguments
    /// * `backend` - Backend receiving every brightness submission
    /// * `clock` - Monotonic time source used for sleeping and the countdown
    /// * `cancel` - Token polled between steps
    ///
    /// # Returns
    /// - `Ok(RampOutcome::Completed)` when the device ends at the target
    /// - `Ok(RampOutcome::Cancelled)` when the device was restored to its original value
    /// - `Err(BrightnessError::Backend)` when a submission failed, including the restore
    pub fn execute(
        &mut self,
        backend: &mut dyn BrightnessBackend,
        clock: &dyn Clock,
        cancel: &CancellationToken,
    ) -> Result<RampOutcome, BrightnessError> {
        if self.ramp_state != RampState::Idle {
            return Err(BrightnessError::Backend(format!(
                "ramp on {} has already run",
                self.device
            )));
        }
        self.ramp_state = RampState::Running;

        let result = self.run(backend, clock, cancel);
        self.ramp_state = match result {
            Ok(RampOutcome::Completed { .. }) => RampState::Completed,
            Ok(RampOutcome::Cancelled { .. }) => RampState::Cancelled,
            Err(_) => RampState::Failed,
        };
        result
    }

    fn run(
        &mut self,
        backend: &mut dyn BrightnessBackend,
        clock: &dyn Clock,
        cancel: &CancellationToken,
    ) -> Result<RampOutcome, BrightnessError> {
        let countdown = Countdown::start(self.duration, clock.now());
        let original = self.state.original();
        let duration_ms = countdown.duration_ms();

        Log::log_debug(&format!(
            "Ramping {} from {} to {} over {} ms via {}",
            self.device,
            original,
            self.target,
            duration_ms,
            backend.backend_name()
        ));

        if duration_ms > 0 {
            while !cancel.is_cancelled() && !countdown.is_expired(clock.now()) {
                clock.sleep(self.poll_interval);
                if cancel.is_cancelled() {
                    break;
                }

                let elapsed_ms = countdown.elapsed_ms(clock.now());
                if elapsed_ms >= duration_ms {
                    break;
                }

                let next = decay_step(original, elapsed_ms, duration_ms);
                if next != self.state.current() {
                    Log::log_debug(&format!("Step at {} ms: brightness {}", elapsed_ms, next));
                    self.submit(backend, next)?;
                }
            }
        }

        if cancel.is_cancelled() {
            if self.state.current() != original {
                Log::log_info("Received signal, restoring original brightness");
                self.submit(backend, original).map_err(|e| {
                    BrightnessError::Backend(format!(
                        "failed to restore original brightness {} on {}: {}",
                        original, self.device, e
                    ))
                })?;
            }
            return Ok(RampOutcome::Cancelled { original });
        }

        if self.state.current() != self.target {
            self.submit(backend, self.target)?;
        }
        Ok(RampOutcome::Completed {
            target: self.target,
        })
    }

    fn submit(
        &mut self,
        backend: &mut dyn BrightnessBackend,
        value: u32,
    ) -> Result<(), BrightnessError> {
        critical(|| backend.apply_brightness(&self.device, value))??;
        self.state.record_applied(value);
        Ok(())
    }
}
