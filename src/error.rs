//! Error taxonomy for brightness resolution, device access and submission.
//!
//! Parse, range and I/O errors are raised before the device is touched.
//! Backend errors come from logind and may occur in the middle of a ramp, in
//! which case the device stays at the last value that was applied.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrightnessError {
    /// Malformed brightness or countdown expression
    #[error("invalid format for {0}")]
    Parse(String),
    /// Resolved target outside `[0, max]`
    #[error("brightness is out of range: {0}")]
    Range(String),
    /// Device state could not be read
    #[error("{0}")]
    Io(String),
    /// Submission or session RPC failure
    #[error("{0}")]
    Backend(String),
}

impl BrightnessError {
    pub fn is_backend(&self) -> bool {
        matches!(self, BrightnessError::Backend(_))
    }
}

impl From<zbus::Error> for BrightnessError {
    fn from(e: zbus::Error) -> Self {
        BrightnessError::Backend(format!("failed to issue method call: {}", e))
    }
}
