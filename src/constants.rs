//! Application constants and default values for backlightr.
//!
//! This module contains the configuration defaults, validation limits,
//! D-Bus names and operational constants used throughout the application.

// ═══ Application Configuration Defaults ═══
// These values are used when config options are not specified by the user

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100; // milliseconds between ramp steps
pub const DEFAULT_COUNTDOWN_SECS: f64 = 0.0; // immediate change
pub const DEFAULT_VERBOSE: bool = false;
pub const DEFAULT_SYSFS_DIR: &str = "/sys/class/backlight";

// ═══ Validation Limits ═══

pub const MINIMUM_POLL_INTERVAL_MS: u64 = 10; // below this logind gets flooded
pub const MAXIMUM_POLL_INTERVAL_MS: u64 = 1000; // above this the ramp visibly stutters

// ═══ Device Files ═══

pub const BRIGHTNESS_FILE: &str = "brightness";
pub const MAX_BRIGHTNESS_FILE: &str = "max_brightness";

// ═══ logind D-Bus Interface ═══

pub const BACKLIGHT_SUBSYSTEM: &str = "backlight"; // first argument of Session.SetBrightness
pub const SESSION_ID_ENV: &str = "XDG_SESSION_ID";

// ═══ Configuration File ═══

pub const CONFIG_DIR_NAME: &str = "backlightr";
pub const CONFIG_FILE_NAME: &str = "backlightr.toml";

// ═══ Exit Codes ═══

pub const EXIT_FAILURE: i32 = 1; // General failure
