//! # Backlightr
//!
//! Change the brightness of a backlight device without root privileges,
//! optionally over a countdown, and restore the original brightness if
//! interrupted.
//!
//! Brightness is read from sysfs and written through systemd-logind's
//! `Session.SetBrightness` D-Bus method.
//!
//! ## Architecture
//!
//! - **args**: Command-line parsing
//! - **backend**: sysfs reads, logind submission and the backend trait
//! - **brightness**: Brightness expressions and their resolution against a device
//! - **commands**: The `get` and `set` command handlers
//! - **config**: Optional TOML configuration
//! - **constants**: Application-wide constants and defaults
//! - **error**: Typed errors for the core
//! - **logger**: Structured logging with visual formatting
//! - **ramp**: The time-stepped transition engine
//! - **signals**: Cancellation token and signal masking around submissions
//! - **terminal**: `^C` echo suppression during a ramp
//! - **time_source**: Real and simulated clocks
//! - **utils**: Countdown parsing and decay arithmetic

pub mod args;
pub mod backend;
pub mod brightness;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod logger;
pub mod ramp;
pub mod signals;
pub mod terminal;
pub mod time_source;
pub mod utils;

// Re-export important types for easier access
pub use backend::BrightnessBackend;
pub use brightness::{BrightnessSpec, DeviceBrightnessState, resolve};
pub use config::Config;
pub use error::BrightnessError;
pub use logger::{Log, LogLevel};
pub use ramp::{BrightnessRamp, RampOutcome, RampState};
pub use signals::{CancellationToken, CriticalSection, critical};
