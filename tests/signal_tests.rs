//! Signal delivery against the real process signal mask.
//!
//! Handlers registered here stay installed for the rest of the test binary,
//! so every test runs serially.

use backlightr::backend::BrightnessBackend;
use backlightr::brightness::DeviceBrightnessState;
use backlightr::error::BrightnessError;
use backlightr::ramp::{BrightnessRamp, RampOutcome};
use backlightr::signals::{CancellationToken, critical, setup_signal_handler};
use backlightr::time_source::SimulatedClock;
use serial_test::serial;
use signal_hook::consts::signal::{SIGINT, SIGTERM};
use signal_hook::low_level::raise;
use std::time::Duration;

#[test]
#[serial]
fn test_signal_sets_token() {
    let token = CancellationToken::new();
    setup_signal_handler(&token).unwrap();
    raise(SIGINT).unwrap();
    assert!(token.is_cancelled());
}

#[test]
#[serial]
fn test_signal_inside_critical_section_is_deferred() {
    let token = CancellationToken::new();
    setup_signal_handler(&token).unwrap();

    let seen_inside = critical(|| {
        raise(SIGTERM).unwrap();
        token.is_cancelled()
    })
    .unwrap();

    assert!(!seen_inside);
    assert!(token.is_cancelled());
}

/// Backend that raises a signal in the middle of the n-th submission.
struct InterruptingBackend {
    applied: Vec<u32>,
    interrupt_on: usize,
    token: CancellationToken,
    cancelled_during_call: bool,
}

impl BrightnessBackend for InterruptingBackend {
    fn apply_brightness(&mut self, _device: &str, value: u32) -> Result<(), BrightnessError> {
        if self.applied.len() + 1 == self.interrupt_on {
            raise(SIGTERM).map_err(|e| BrightnessError::Backend(e.to_string()))?;
            self.cancelled_during_call |= self.token.is_cancelled();
        }
        self.applied.push(value);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "interrupting"
    }
}

#[test]
#[serial]
fn test_interrupted_ramp_completes_call_then_restores() {
    let token = CancellationToken::new();
    setup_signal_handler(&token).unwrap();

    let mut backend = InterruptingBackend {
        applied: Vec::new(),
        interrupt_on: 3,
        token: token.clone(),
        cancelled_during_call: false,
    };
    let state = DeviceBrightnessState::new(40, 100).unwrap();
    let mut ramp = BrightnessRamp::new("intel_backlight", state, 80, Duration::from_secs(1))
        .with_poll_interval(Duration::from_millis(100));

    let outcome = ramp.execute(&mut backend, &SimulatedClock::new(), &token).unwrap();

    assert!(!backend.cancelled_during_call);
    assert_eq!(outcome, RampOutcome::Cancelled { original: 40 });
    assert_eq!(backend.applied, vec![36, 32, 28, 40]);
}
