//! Terminal attribute handling while a ramp is running.

use std::fs::File;
use std::io;
use std::os::unix::io::AsRawFd;

use termios::os::linux::ECHOCTL;
use termios::{TCSANOW, Termios, tcsetattr};

/// Suppresses the `^C` echo on the controlling terminal and restores the
/// original attributes when dropped.
///
/// Interrupting a ramp with Ctrl+C then leaves a clean line behind.
pub struct TerminalGuard {
    original_termios: Termios,
}

impl TerminalGuard {
    /// Create a new terminal guard and modify terminal settings.
    ///
    /// # Returns
    /// - `Ok(Some(guard))` if a terminal is available and settings were applied
    /// - `Ok(None)` if there is no controlling terminal (scripts, services)
    /// - `Err` only for unexpected errors
    pub fn new() -> io::Result<Option<Self>> {
        let tty = match File::open("/dev/tty") {
            Ok(tty) => tty,
            // ENXIO: no controlling terminal
            Err(e) if e.kind() == io::ErrorKind::NotFound || e.raw_os_error() == Some(6) => {
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let fd = tty.as_raw_fd();
        let mut term = match Termios::from_fd(fd) {
            Ok(term) => term,
            // ENOTTY
            Err(e) if e.raw_os_error() == Some(25) => return Ok(None),
            Err(e) => return Err(e),
        };
        let original = term;

        term.c_lflag &= !ECHOCTL;
        tcsetattr(fd, TCSANOW, &term)?;

        Ok(Some(Self {
            original_termios: original,
        }))
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Ok(tty) = File::open("/dev/tty") {
            let _ = tcsetattr(tty.as_raw_fd(), TCSANOW, &self.original_termios);
        }
    }
}
