//! Backend abstraction for reading and changing backlight brightness.
//!
//! Brightness is read directly from the kernel's backlight class in sysfs,
//! which is world-readable. Writing requires privileges, so it is mediated by
//! systemd-logind's `Session.SetBrightness` method, which lets the user owning
//! an active session change the backlight without root.
//!
//! ## Architecture
//!
//! - **sysfs**: device discovery and `(current, max)` reads
//! - **logind**: session resolution and brightness submission over D-Bus
//!
//! The ramp engine only depends on the [`BrightnessBackend`] trait, so tests
//! substitute a mock and never touch the system bus.

use crate::error::BrightnessError;

pub mod logind;
pub mod sysfs;

pub use logind::{LogindBackend, resolve_session};
pub use sysfs::{find_device, read_brightness};

/// Trait for backends that can apply a brightness value to a backlight device.
#[cfg_attr(any(test, feature = "testing-support"), mockall::automock)]
pub trait BrightnessBackend {
    /// Set the raw brightness of `device` to `value`.
    ///
    /// # Returns
    /// - `Ok(())` once the device has accepted the value
    /// - `Err(BrightnessError::Backend)` if the submission failed
    fn apply_brightness(&mut self, device: &str, value: u32) -> Result<(), BrightnessError>;

    /// Get a human-readable name for this backend.
    fn backend_name(&self) -> &'static str;
}
