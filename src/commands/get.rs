//! Report the current and maximum brightness of a device.

use anyhow::Result;
use std::io::Write;

use super::Settings;
use crate::backend::read_brightness;

/// Write `current max` for the selected device to `out`.
pub fn handle_get_command(settings: &Settings, out: &mut dyn Write) -> Result<()> {
    let device = settings.select_device()?;
    let (current, max) = read_brightness(&settings.sysfs_dir, &device)?;
    writeln!(out, "{} {}", current, max)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BRIGHTNESS_FILE, MAX_BRIGHTNESS_FILE};
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_prints_current_and_max() {
        let dir = tempdir().unwrap();
        let device = dir.path().join("intel_backlight");
        fs::create_dir(&device).unwrap();
        fs::write(device.join(BRIGHTNESS_FILE), "7500\n").unwrap();
        fs::write(device.join(MAX_BRIGHTNESS_FILE), "96000\n").unwrap();

        let settings = Settings {
            device: None,
            session_id: None,
            countdown: Duration::ZERO,
            poll_interval: Duration::from_millis(100),
            sysfs_dir: dir.path().to_path_buf(),
        };
        let mut out = Vec::new();
        handle_get_command(&settings, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "7500 96000\n");
    }
}
