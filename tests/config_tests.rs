use backlightr::config::Config;
use backlightr::constants::*;
use serial_test::serial;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;

/// Point `XDG_CONFIG_HOME` at `dir` for the duration of `f`.
fn with_config_home<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
    let previous = std::env::var_os("XDG_CONFIG_HOME");
    // SAFETY: tests touching the environment are serialized
    unsafe { std::env::set_var("XDG_CONFIG_HOME", dir) };
    let result = f();
    match previous {
        Some(value) => unsafe { std::env::set_var("XDG_CONFIG_HOME", value) },
        None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
    }
    result
}

#[test]
#[serial]
fn test_config_path_follows_xdg_config_home() {
    let dir = tempdir().unwrap();
    let path = with_config_home(dir.path(), Config::get_config_path).unwrap();
    assert_eq!(
        path,
        dir.path().join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
    );
}

#[test]
#[serial]
fn test_missing_config_yields_defaults() {
    let dir = tempdir().unwrap();
    let config = with_config_home(dir.path(), Config::load).unwrap();
    assert_eq!(config.poll_interval(), Duration::from_millis(DEFAULT_POLL_INTERVAL_MS));
    assert_eq!(config.countdown_duration(), Duration::ZERO);
    assert!(!config.verbose());
    assert_eq!(config.sysfs_dir(), PathBuf::from(DEFAULT_SYSFS_DIR));
    assert!(!dir.path().join(CONFIG_DIR_NAME).exists());
}

#[test]
#[serial]
fn test_config_is_loaded_from_xdg_config_home() {
    let dir = tempdir().unwrap();
    let config_dir = dir.path().join(CONFIG_DIR_NAME);
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join(CONFIG_FILE_NAME),
        "device = \"acpi_video0\"\ncountdown = 0.3\n",
    )
    .unwrap();

    let config = with_config_home(dir.path(), Config::load).unwrap();
    assert_eq!(config.device.as_deref(), Some("acpi_video0"));
    assert_eq!(config.countdown_duration(), Duration::from_millis(300));
}

#[test]
#[serial]
fn test_malformed_config_names_the_file() {
    let dir = tempdir().unwrap();
    let config_dir = dir.path().join(CONFIG_DIR_NAME);
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join(CONFIG_FILE_NAME), "poll_interval_ms = 5\n").unwrap();

    let err = with_config_home(dir.path(), Config::load).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains(CONFIG_FILE_NAME), "{}", message);
    assert!(message.contains("poll_interval_ms"), "{}", message);
}
