//! Command handlers for backlightr.
//!
//! Without a brightness expression the tool reports the device state
//! ([`get`]); with one it ramps the device to the resolved target ([`set`]).
//! Both share the [`Settings`] merged from the command line and the config file.

use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

use crate::backend::find_device;
use crate::config::Config;
use crate::utils::parse_countdown;

pub mod get;
pub mod set;

/// Effective settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub device: Option<String>,
    pub session_id: Option<String>,
    pub countdown: Duration,
    pub poll_interval: Duration,
    pub sysfs_dir: PathBuf,
}

impl Settings {
    /// Merge command-line values over `config`.
    ///
    /// `countdown` is the raw `-t` text; when absent the config value applies.
    pub fn from_sources(
        config: &Config,
        device: Option<String>,
        session_id: Option<String>,
        countdown: Option<&str>,
    ) -> Result<Self> {
        let countdown = match countdown {
            Some(text) => parse_countdown(Some(text))?,
            None => config.countdown_duration(),
        };

        Ok(Self {
            device: device.or_else(|| config.device.clone()),
            session_id: session_id.or_else(|| config.session_id.clone()),
            countdown,
            poll_interval: config.poll_interval(),
            sysfs_dir: config.sysfs_dir(),
        })
    }

    /// The configured device, or the first one found under `sysfs_dir`.
    pub fn select_device(&self) -> Result<String> {
        match &self.device {
            Some(device) => Ok(device.clone()),
            None => Ok(find_device(&self.sysfs_dir)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn config() -> Config {
        Config {
            device: Some("acpi_video0".to_string()),
            session_id: Some("4".to_string()),
            countdown: Some(2.0),
            poll_interval_ms: Some(50),
            verbose: Some(false),
            sysfs_dir: Some(PathBuf::from("/tmp/backlight")),
        }
    }

    #[test]
    fn test_command_line_overrides_config() {
        let settings = Settings::from_sources(
            &config(),
            Some("intel_backlight".to_string()),
            Some("c1".to_string()),
            Some("0.25"),
        )
        .unwrap();
        assert_eq!(settings.device.as_deref(), Some("intel_backlight"));
        assert_eq!(settings.session_id.as_deref(), Some("c1"));
        assert_eq!(settings.countdown, Duration::from_millis(250));
        assert_eq!(settings.poll_interval, Duration::from_millis(50));
    }

    #[test]
    fn test_config_fills_missing_values() {
        let settings = Settings::from_sources(&config(), None, None, None).unwrap();
        assert_eq!(settings.device.as_deref(), Some("acpi_video0"));
        assert_eq!(settings.session_id.as_deref(), Some("4"));
        assert_eq!(settings.countdown, Duration::from_secs(2));
    }

    #[test]
    fn test_invalid_countdown_is_rejected() {
        for text in ["-1", "abc", "1s", "inf"] {
            assert!(Settings::from_sources(&config(), None, None, Some(text)).is_err());
        }
    }

    #[test]
    fn test_select_device_falls_back_to_sysfs() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("intel_backlight")).unwrap();
        let settings = Settings {
            device: None,
            session_id: None,
            countdown: Duration::ZERO,
            poll_interval: Duration::from_millis(100),
            sysfs_dir: dir.path().to_path_buf(),
        };
        assert_eq!(settings.select_device().unwrap(), "intel_backlight");
    }
}
