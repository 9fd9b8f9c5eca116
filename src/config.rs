//! Configuration file support for backlightr.
//!
//! Settings are read from `$XDG_CONFIG_HOME/backlightr/backlightr.toml`. The
//! file is optional; when it does not exist every setting takes its default.
//! Values given on the command line always win over values from the file.
//!
//! ```toml
//! device = "intel_backlight"        # Backlight device under sysfs_dir
//! session_id = "2"                  # logind session to act through
//! countdown = 0.5                   # Seconds, used when -t is absent
//! poll_interval_ms = 100            # Delay between ramp steps (10-1000)
//! verbose = false                   # Same as -v
//! sysfs_dir = "/sys/class/backlight"
//! ```
//!
//! A file that cannot be read, does not parse, or holds an out-of-range value
//! is an error. It is reported before any device is touched.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::*;
use crate::logger::Log;
use crate::utils::seconds_to_duration;

/// Settings loaded from `backlightr.toml`.
///
/// Every field is optional in the file. After loading through
/// [`Config::load`] or [`Config::load_from_path`] the fields that have
/// defaults are always `Some`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Device to use when `-d` is absent. `None` picks the first device in `sysfs_dir`.
    pub device: Option<String>,
    /// Session to use when `-x` is absent. `None` falls back to `$XDG_SESSION_ID`.
    pub session_id: Option<String>,
    pub countdown: Option<f64>, // seconds
    pub poll_interval_ms: Option<u64>,
    pub verbose: Option<bool>,
    pub sysfs_dir: Option<PathBuf>,
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the configuration from the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            let mut config = Config::default();
            Self::apply_defaults_and_validate_fields(&mut config)?;
            return Ok(config);
        }

        Self::load_from_path(&config_path).with_context(|| {
            format!(
                "Failed to load configuration from {}",
                config_path.display()
            )
        })
    }

    /// Load the configuration from a specific file, which must exist.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Configuration file not found at specified path: {}",
                path.display()
            );
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        Self::apply_defaults_and_validate_fields(&mut config)?;

        Ok(config)
    }

    fn apply_defaults_and_validate_fields(config: &mut Config) -> Result<()> {
        // Validate poll interval if specified
        if let Some(interval) = config.poll_interval_ms {
            if !(MINIMUM_POLL_INTERVAL_MS..=MAXIMUM_POLL_INTERVAL_MS).contains(&interval) {
                anyhow::bail!(
                    "poll_interval_ms must be between {} and {} milliseconds",
                    MINIMUM_POLL_INTERVAL_MS,
                    MAXIMUM_POLL_INTERVAL_MS
                );
            }
        } else {
            config.poll_interval_ms = Some(DEFAULT_POLL_INTERVAL_MS);
        }

        // Validate countdown if specified
        if let Some(seconds) = config.countdown {
            if seconds_to_duration(seconds).is_none() {
                anyhow::bail!("countdown must be a non-negative number of seconds");
            }
        } else {
            config.countdown = Some(DEFAULT_COUNTDOWN_SECS);
        }

        if let Some(device) = &config.device {
            if device.is_empty() || device.contains('/') {
                anyhow::bail!("device must be a plain device name, got '{}'", device);
            }
        }

        if config.session_id.as_deref() == Some("") {
            config.session_id = None;
        }

        if config.verbose.is_none() {
            config.verbose = Some(DEFAULT_VERBOSE);
        }

        if config.sysfs_dir.is_none() {
            config.sysfs_dir = Some(PathBuf::from(DEFAULT_SYSFS_DIR));
        }

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS))
    }

    /// Countdown used when none is given on the command line.
    pub fn countdown_duration(&self) -> Duration {
        self.countdown
            .and_then(seconds_to_duration)
            .unwrap_or(Duration::ZERO)
    }

    pub fn verbose(&self) -> bool {
        self.verbose.unwrap_or(DEFAULT_VERBOSE)
    }

    pub fn sysfs_dir(&self) -> PathBuf {
        self.sysfs_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SYSFS_DIR))
    }

    /// Print the effective settings in verbose mode.
    pub fn log_config(&self) {
        let config_path = Self::get_config_path()
            .unwrap_or_else(|_| PathBuf::from("~/.config/backlightr/backlightr.toml"));

        if config_path.exists() {
            Log::log_block_start(&format!(
                "Loaded configuration from {}",
                config_path.display()
            ));
        } else {
            Log::log_block_start("No configuration file, using defaults");
        }

        Log::log_indented(&format!(
            "Device: {}",
            self.device.as_deref().unwrap_or("first available")
        ));
        Log::log_indented(&format!(
            "Session: {}",
            self.session_id.as_deref().unwrap_or("from environment")
        ));
        Log::log_indented(&format!(
            "Countdown: {} ms",
            self.countdown_duration().as_millis()
        ));
        Log::log_indented(&format!(
            "Poll interval: {} ms",
            self.poll_interval().as_millis()
        ));
        Log::log_indented(&format!("Sysfs directory: {}", self.sysfs_dir().display()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn load_str(content: &str) -> Result<Config> {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, content).unwrap();
        Config::load_from_path(&path)
    }

    #[test]
    fn test_empty_file_gets_defaults() {
        let config = load_str("").unwrap();
        assert_eq!(config.poll_interval_ms, Some(DEFAULT_POLL_INTERVAL_MS));
        assert_eq!(config.countdown, Some(DEFAULT_COUNTDOWN_SECS));
        assert_eq!(config.verbose, Some(false));
        assert_eq!(config.sysfs_dir(), PathBuf::from(DEFAULT_SYSFS_DIR));
        assert_eq!(config.device, None);
        assert_eq!(config.session_id, None);
    }

    #[test]
    fn test_full_file() {
        let config = load_str(
            r#"
device = "acpi_video0"
session_id = "c2"
countdown = 1.5
poll_interval_ms = 50
verbose = true
sysfs_dir = "/tmp/backlight"
"#,
        )
        .unwrap();
        assert_eq!(config.device.as_deref(), Some("acpi_video0"));
        assert_eq!(config.session_id.as_deref(), Some("c2"));
        assert_eq!(config.countdown_duration(), Duration::from_millis(1500));
        assert_eq!(config.poll_interval(), Duration::from_millis(50));
        assert!(config.verbose());
        assert_eq!(config.sysfs_dir(), PathBuf::from("/tmp/backlight"));
    }

    #[test]
    fn test_poll_interval_limits() {
        assert!(load_str("poll_interval_ms = 10").is_ok());
        assert!(load_str("poll_interval_ms = 1000").is_ok());
        assert!(load_str("poll_interval_ms = 9").is_err());
        assert!(load_str("poll_interval_ms = 1001").is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(load_str("countdown = -1.0").is_err());
        assert!(load_str("countdown = nan").is_err());
        assert!(load_str("device = \"../etc\"").is_err());
        assert!(load_str("device = \"\"").is_err());
        assert!(load_str("poll_interval_ms = \"fast\"").is_err());
        assert!(load_str("this is not toml").is_err());
    }

    #[test]
    fn test_empty_session_id_means_unset() {
        let config = load_str("session_id = \"\"").unwrap();
        assert_eq!(config.session_id, None);
    }

    #[test]
    fn test_missing_file_is_error_for_explicit_path() {
        let dir = tempdir().unwrap();
        let err = Config::load_from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = load_str("verbose = maybe").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config"));
    }
}
