use anyhow::Result;
use std::io;

use backlightr::args::{CliAction, ParsedArgs, display_help, display_version_info};
use backlightr::commands::{Settings, get, set};
use backlightr::config::Config;
use backlightr::constants::EXIT_FAILURE;
use backlightr::logger::Log;

fn main() {
    if let Err(e) = run() {
        Log::log_error(&format!("{:#}", e));
        std::process::exit(EXIT_FAILURE);
    }
}

fn run() -> Result<()> {
    let parsed = ParsedArgs::from_env();

    match parsed.action {
        CliAction::ShowVersion => {
            display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Run {
            brightness,
            countdown,
            device,
            session_id,
            verbose,
        } => {
            // Verbose from the command line applies even if the config fails to load
            Log::set_verbose(verbose);
            let config = Config::load()?;
            Log::set_verbose(verbose || config.verbose());

            Log::log_version();
            config.log_config();

            let settings = Settings::from_sources(&config, device, session_id, countdown.as_deref())?;

            let result = match brightness {
                None => get::handle_get_command(&settings, &mut io::stdout().lock()),
                Some(brightness) => set::handle_set_command(&settings, &brightness),
            };
            Log::log_end();
            result
        }
    }
}
