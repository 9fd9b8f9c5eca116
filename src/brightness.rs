//! Brightness expressions and device brightness state.
//!
//! A brightness expression is an optional `+`/`-` sign (relative mode), a run
//! of decimal digits and an optional trailing `%` (percent of the device
//! maximum). Expressions resolve to an absolute target in `[0, max]`; results
//! outside that range are rejected, never clamped.

use std::fmt;
use std::str::FromStr;

use crate::error::BrightnessError;

/// Sign of a brightness expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Absolute value
    None,
    /// Increase relative to the current brightness
    Plus,
    /// Decrease relative to the current brightness
    Minus,
}

/// A parsed brightness expression such as `50`, `+10`, `-5%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessSpec {
    pub sign: Sign,
    pub is_percent: bool,
    pub magnitude: u64,
}

impl BrightnessSpec {
    /// Parse a brightness expression.
    ///
    /// Rejects an empty numeric body, whitespace anywhere, and anything other
    /// than digits between the optional sign and the optional `%`.
    pub fn parse(text: &str) -> Result<Self, BrightnessError> {
        let invalid = || BrightnessError::Parse(format!("brightness '{}'", text));

        let (sign, rest) = match text.as_bytes().first() {
            Some(b'+') => (Sign::Plus, &text[1..]),
            Some(b'-') => (Sign::Minus, &text[1..]),
            _ => (Sign::None, text),
        };
        let (is_percent, body) = match rest.strip_suffix('%') {
            Some(body) => (true, body),
            None => (false, rest),
        };

        if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        // Only digits remain, so the sole failure mode is overflow.
        let magnitude = body.parse::<u64>().map_err(|_| {
            BrightnessError::Range(format!("'{}' exceeds any device maximum", text))
        })?;

        Ok(Self {
            sign,
            is_percent,
            magnitude,
        })
    }

    /// Whether the expression is relative to the current brightness.
    pub fn is_relative(&self) -> bool {
        self.sign != Sign::None
    }

    /// Compute the absolute target for a device at `current` out of `max`.
    pub fn resolve(&self, current: u32, max: u32) -> Result<u32, BrightnessError> {
        let mut magnitude = i128::from(self.magnitude);
        if self.is_percent {
            // Multiply before dividing to keep the precision of small maxima.
            magnitude = i128::from(max) * magnitude / 100;
        }

        let target = match self.sign {
            Sign::None => magnitude,
            Sign::Plus => i128::from(current) + magnitude,
            Sign::Minus => i128::from(current) - magnitude,
        };

        if target < 0 || target > i128::from(max) {
            return Err(BrightnessError::Range(format!(
                "{} resolves to {} (valid range 0-{})",
                self, target, max
            )));
        }
        Ok(target as u32)
    }
}

impl FromStr for BrightnessSpec {
    type Err = BrightnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BrightnessSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.sign {
            Sign::None => "",
            Sign::Plus => "+",
            Sign::Minus => "-",
        };
        let percent = if self.is_percent { "%" } else { "" };
        write!(f, "{}{}{}", sign, self.magnitude, percent)
    }
}

/// Parse `spec_text` and resolve it against the device's current and maximum values.
pub fn resolve(spec_text: &str, current: u32, max: u32) -> Result<u32, BrightnessError> {
    BrightnessSpec::parse(spec_text)?.resolve(current, max)
}

/// Brightness of one backlight device over the lifetime of a ramp.
///
/// `original` is captured on construction and never changes; it is the value
/// restored when a ramp is cancelled. `current` mirrors the last value that
/// was successfully applied to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceBrightnessState {
    original: u32,
    current: u32,
    max: u32,
}

impl DeviceBrightnessState {
    pub fn new(current: u32, max: u32) -> Result<Self, BrightnessError> {
        if max == 0 {
            return Err(BrightnessError::Io(
                "device reports a maximum brightness of 0".to_string(),
            ));
        }
        if current > max {
            return Err(BrightnessError::Io(format!(
                "device reports brightness {} above its maximum {}",
                current, max
            )));
        }
        Ok(Self {
            original: current,
            current,
            max,
        })
    }

    pub fn original(&self) -> u32 {
        self.original
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Resolve a brightness expression against this device.
    pub fn resolve(&self, spec: &BrightnessSpec) -> Result<u32, BrightnessError> {
        spec.resolve(self.current, self.max)
    }

    pub(crate) fn record_applied(&mut self, value: u32) {
        self.current = value;
    }
}
