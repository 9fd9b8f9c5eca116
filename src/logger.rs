//! Structured logging system with visual formatting.
//!
//! backlightr writes all diagnostics to stderr so that stdout stays reserved for
//! the `current max` report. Errors and warnings are always shown; operational
//! and informational lines only appear once verbose output has been enabled
//! with `-v` or `verbose = true` in the configuration.
//!
//! The logger also supports a global enable/disable switch for quiet operation
//! during tests.

use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
static VERBOSE_ENABLED: AtomicBool = AtomicBool::new(false);

/// Log level enumeration for categorizing message importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Log,  // Operational logs (verbose only)
    Warn, // Warning messages (non-fatal issues)
    Err,  // Error messages
    Info, // Informational messages (verbose only)
}

impl LogLevel {
    fn prefix(self) -> &'static str {
        match self {
            LogLevel::Log => "[LOG]",
            LogLevel::Warn => "[WARN]",
            LogLevel::Err => "[ERR]",
            LogLevel::Info => "[INFO]",
        }
    }

    fn requires_verbose(self) -> bool {
        matches!(self, LogLevel::Log | LogLevel::Info)
    }
}

/// Main logging interface providing structured output formatting.
pub struct Log;

impl Log {
    /// Enable or disable logging entirely.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if logging is currently enabled.
    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Enable or disable verbose (debug and informational) output.
    pub fn set_verbose(verbose: bool) {
        VERBOSE_ENABLED.store(verbose, Ordering::SeqCst);
    }

    /// Check if verbose output is enabled.
    pub fn is_verbose() -> bool {
        VERBOSE_ENABLED.load(Ordering::SeqCst)
    }

    /// Format a message with its level prefix.
    pub fn format(level: LogLevel, message: &str) -> String {
        format!("{} {}", level.prefix(), message)
    }

    /// Main log function with level-based prefixes.
    ///
    /// # Arguments
    /// * `level` - LogLevel indicating message importance
    /// * `message` - Text content to log
    pub fn log(level: LogLevel, message: &str) {
        if !Self::is_enabled() || (level.requires_verbose() && !Self::is_verbose()) {
            return;
        }
        eprintln!("{}", Self::format(level, message));
    }

    // ═══ Convenience Methods for Common Log Levels ═══

    /// Log an error message.
    pub fn log_error(message: &str) {
        Self::log(LogLevel::Err, message);
    }

    /// Log a warning message.
    pub fn log_warning(message: &str) {
        Self::log(LogLevel::Warn, message);
    }

    /// Log an informational message.
    pub fn log_info(message: &str) {
        Self::log(LogLevel::Info, message);
    }

    /// Log a debug/operational message.
    pub fn log_debug(message: &str) {
        Self::log(LogLevel::Log, message);
    }

    // ═══ Visual Formatting Functions ═══
    // Decorated output is part of the verbose trace.

    fn decorated_visible() -> bool {
        Self::is_enabled() && Self::is_verbose()
    }

    /// Log a decorated message with visual branching indicator.
    pub fn log_decorated(message: &str) {
        if Self::decorated_visible() {
            eprintln!("┣ {}", message);
        }
    }

    /// Log an indented message for sub-items or details.
    pub fn log_indented(message: &str) {
        if Self::decorated_visible() {
            eprintln!("┃   {}", message);
        }
    }

    /// Log a visual pipe separator.
    pub fn log_pipe() {
        if Self::decorated_visible() {
            eprintln!("┃");
        }
    }

    /// Log a block start message with visual separation.
    pub fn log_block_start(message: &str) {
        if Self::decorated_visible() {
            eprintln!("┃");
            eprintln!("┣ {}", message);
        }
    }

    /// Log the application version header.
    pub fn log_version() {
        if Self::decorated_visible() {
            eprintln!("┏ backlightr v{} ━━╸", env!("CARGO_PKG_VERSION"));
            eprintln!("┃");
        }
    }

    /// Log the final termination marker.
    pub fn log_end() {
        if Self::decorated_visible() {
            eprintln!("╹");
        }
    }
}
