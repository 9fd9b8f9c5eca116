//! Change the brightness of a device, optionally over a countdown.
//!
//! Everything that can fail without touching the device happens first:
//! device selection, the sysfs read, parsing and range checks. Only then is
//! the logind session resolved and the ramp started.

use anyhow::{Context, Result};

use super::Settings;
use crate::backend::{BrightnessBackend, LogindBackend, read_brightness};
use crate::brightness::{BrightnessSpec, DeviceBrightnessState};
use crate::logger::Log;
use crate::ramp::{BrightnessRamp, RampOutcome};
use crate::signals::{CancellationToken, setup_signal_handler};
use crate::terminal::TerminalGuard;
use crate::time_source::{Clock, SystemClock};

/// Read the device and resolve `brightness` into a ramp that is ready to run.
pub fn prepare_ramp(settings: &Settings, brightness: &str) -> Result<BrightnessRamp> {
    let device = settings.select_device()?;
    let (current, max) = read_brightness(&settings.sysfs_dir, &device)?;
    let state = DeviceBrightnessState::new(current, max)?;

    let spec = BrightnessSpec::parse(brightness)?;
    let target = state.resolve(&spec)?;

    Log::log_decorated(&format!(
        "{}: {} -> {} (max {})",
        device, current, target, max
    ));

    Ok(
        BrightnessRamp::new(device, state, target, settings.countdown)
            .with_poll_interval(settings.poll_interval),
    )
}

/// Run a prepared ramp and report how it ended.
pub fn run_ramp(
    ramp: &mut BrightnessRamp,
    backend: &mut dyn BrightnessBackend,
    clock: &dyn Clock,
    cancel: &CancellationToken,
) -> Result<RampOutcome> {
    let outcome = ramp.execute(backend, clock, cancel)?;
    match outcome {
        RampOutcome::Completed { target } => {
            Log::log_decorated(&format!("Brightness set to {}", target));
        }
        RampOutcome::Cancelled { original } => {
            Log::log_decorated(&format!("Cancelled, brightness restored to {}", original));
        }
    }
    Ok(outcome)
}

/// Handle a brightness change request end to end.
pub fn handle_set_command(settings: &Settings, brightness: &str) -> Result<()> {
    let mut ramp = prepare_ramp(settings, brightness)?;

    let mut backend = LogindBackend::connect(settings.session_id.as_deref())
        .context("Failed to open logind session")?;

    let cancel = CancellationToken::new();
    setup_signal_handler(&cancel)?;

    let _term = match TerminalGuard::new() {
        Ok(guard) => guard,
        Err(e) => {
            Log::log_debug(&format!("Leaving terminal settings alone: {}", e));
            None
        }
    };

    run_ramp(&mut ramp, &mut backend, &SystemClock, &cancel)?;
    Ok(())
}
