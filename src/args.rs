//! Command-line argument parsing and processing.
//!
//! Arguments are parsed by hand because the brightness expression may itself
//! look like an option: `-10` and `-10%` are relative decrements, not flags.
//! Any token starting with `-` and a digit is taken as the brightness as long
//! as no brightness has been given yet.

use crate::logger::Log;

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Print or change the brightness with these settings
    Run {
        /// Brightness expression; `None` prints `current max`
        brightness: Option<String>,
        /// Raw `-t` value in seconds
        countdown: Option<String>,
        device: Option<String>,
        session_id: Option<String>,
        verbose: bool,
    },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to invalid arguments and exit with failure
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

/// Whether `arg` is a negative brightness expression such as `-10` or `-5%`.
fn looks_like_decrement(arg: &str) -> bool {
    arg.strip_prefix('-')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_digit())
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments including the program name
    ///
    /// # Returns
    /// ParsedArgs containing the determined action
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut verbose = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut brightness: Option<String> = None;
        let mut countdown: Option<String> = None;
        let mut device: Option<String> = None;
        let mut session_id: Option<String> = None;
        let mut invalid_arg_found = false;

        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut i = 0;
        while i < args_vec.len() {
            let arg_str = &args_vec[i];
            match arg_str.as_str() {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" => display_version = true,
                "-v" => verbose = true,
                "-d" | "-x" | "-t" => {
                    let Some(value) = args_vec.get(i + 1) else {
                        Log::log_warning(&format!("Missing value for {}", arg_str));
                        invalid_arg_found = true;
                        break;
                    };
                    let slot = match arg_str.as_str() {
                        "-d" => &mut device,
                        "-x" => &mut session_id,
                        _ => &mut countdown,
                    };
                    *slot = Some(value.clone());
                    i += 1;
                }
                _ if brightness.is_none()
                    && (!arg_str.starts_with('-') || looks_like_decrement(arg_str)) =>
                {
                    brightness = Some(arg_str.clone());
                }
                _ => {
                    if arg_str.starts_with('-') {
                        Log::log_warning(&format!("Unknown option: {}", arg_str));
                    } else {
                        Log::log_warning(&format!("Unexpected argument: {}", arg_str));
                    }
                    invalid_arg_found = true;
                }
            }
            i += 1;
        }

        let action = if display_version {
            CliAction::ShowVersion
        } else if invalid_arg_found {
            CliAction::ShowHelpDueToError
        } else if display_help {
            CliAction::ShowHelp
        } else {
            CliAction::Run {
                brightness,
                countdown,
                device,
                session_id,
                verbose,
            }
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Usage text shown by `-h` and after invalid arguments.
pub fn usage() -> String {
    format!(
        "Usage: {} [options] [brightness]\n\
         \n\
         Brightness: N, +N, -N, N%, +N%, -N% (omit to print 'current max')\n\
         \n\
         \x20 -d DEVICE_NAME     e.g. 'intel_backlight'\n\
         \x20 -x XDG_SESSION_ID  session ID for current user\n\
         \x20 -t COUNTDOWN       countdown in seconds\n\
         \x20 -v                 enable debug output\n\
         \x20 -h                 show help message and quit\n\
         \x20 -V, --version      print version information\n",
        env!("CARGO_PKG_NAME")
    )
}

/// Displays version information.
pub fn display_version_info() {
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    Log::log_version();
    Log::log_decorated(env!("CARGO_PKG_DESCRIPTION"));
    Log::log_end();
}

/// Displays the usage message on stderr.
pub fn display_help() {
    eprint!("{}", usage());
}
