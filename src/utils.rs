//! Utility functions shared across the codebase.
//!
//! This module provides countdown parsing and the integer arithmetic used by
//! the ramp engine to compute intermediate brightness values.

use std::time::Duration;

use crate::error::BrightnessError;

/// Parse a countdown given in (possibly fractional) seconds.
///
/// An absent or empty countdown means zero. Negative, non-finite or otherwise
/// malformed values are rejected.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use backlightr::utils::parse_countdown;
/// assert_eq!(parse_countdown(Some("1.5")).unwrap(), Duration::from_millis(1500));
/// assert_eq!(parse_countdown(None).unwrap(), Duration::ZERO);
/// ```
pub fn parse_countdown(text: Option<&str>) -> Result<Duration, BrightnessError> {
    let text = match text {
        None => return Ok(Duration::ZERO),
        Some(t) if t.is_empty() => return Ok(Duration::ZERO),
        Some(t) => t,
    };

    let invalid = || BrightnessError::Parse(format!("countdown '{}'", text));

    // f64's parser accepts "inf" and "nan", both of which are rejected below
    let seconds: f64 = text.parse().map_err(|_| invalid())?;
    seconds_to_duration(seconds).ok_or_else(invalid)
}

/// Convert seconds to a duration rounded up to whole milliseconds.
///
/// Returns `None` for negative, non-finite or unrepresentable values.
pub fn seconds_to_duration(seconds: f64) -> Option<Duration> {
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    let millis = (seconds * 1000.0).ceil();
    if millis > u64::MAX as f64 {
        return None;
    }
    Some(Duration::from_millis(millis as u64))
}

/// Whole milliseconds in a duration, saturating at `u64::MAX`.
pub fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Brightness after `elapsed_ms` of a linear decay from `original` to zero
/// spread over `duration_ms`.
///
/// Computes `original - floor(elapsed_ms * original / duration_ms)` in 128-bit
/// arithmetic. `elapsed_ms` is clamped to `duration_ms`, and a zero duration
/// yields zero.
///
/// # Examples
/// ```
/// use backlightr::utils::decay_step;
/// assert_eq!(decay_step(40, 0, 1000), 40);
/// assert_eq!(decay_step(40, 100, 1000), 36);
/// assert_eq!(decay_step(40, 1000, 1000), 0);
/// ```
pub fn decay_step(original: u32, elapsed_ms: u64, duration_ms: u64) -> u32 {
    if duration_ms == 0 {
        return 0;
    }
    let elapsed = u128::from(elapsed_ms.min(duration_ms));
    let decayed = elapsed * u128::from(original) / u128::from(duration_ms);
    // decayed <= original, so the subtraction cannot underflow
    original - decayed as u32
}
