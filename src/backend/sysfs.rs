//! Backlight device discovery and brightness reads from sysfs.

use std::fs;
use std::path::Path;

use crate::constants::{BRIGHTNESS_FILE, MAX_BRIGHTNESS_FILE};
use crate::error::BrightnessError;
use crate::logger::Log;

/// Pick the first backlight device in `dir`.
///
/// Hidden entries are skipped and names are compared in sorted order so the
/// choice is stable across reboots.
pub fn find_device(dir: &Path) -> Result<String, BrightnessError> {
    let entries = fs::read_dir(dir).map_err(|e| {
        BrightnessError::Io(format!("error opening directory {}: {}", dir.display(), e))
    })?;

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| !name.starts_with('.'))
        .collect();
    names.sort();

    match names.into_iter().next() {
        Some(name) => {
            Log::log_debug(&format!("Using device {}", name));
            Ok(name)
        }
        None => Err(BrightnessError::Io(format!(
            "found no device names in {}",
            dir.display()
        ))),
    }
}

fn read_value(path: &Path) -> Result<u32, BrightnessError> {
    let content = fs::read_to_string(path).map_err(|e| {
        BrightnessError::Io(format!("could not open file {}: {}", path.display(), e))
    })?;
    content.trim().parse::<u32>().map_err(|_| {
        BrightnessError::Io(format!("error reading value from file {}", path.display()))
    })
}

/// Read `(current, max)` brightness of `device` under `dir`.
pub fn read_brightness(dir: &Path, device: &str) -> Result<(u32, u32), BrightnessError> {
    let device_dir = dir.join(device);
    let current = read_value(&device_dir.join(BRIGHTNESS_FILE))?;
    let max = read_value(&device_dir.join(MAX_BRIGHTNESS_FILE))?;
    if max == 0 {
        return Err(BrightnessError::Io(format!(
            "device {} reports a maximum brightness of 0",
            device
        )));
    }
    Ok((current, max))
}
