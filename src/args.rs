//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a clean
//! interface for the main application logic. It supports the standard help,
//! version, and debug flags plus the options that pick a configuration file,
//! a date, and JSON output.

use chrono::NaiveDate;

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Calculate and print one day's schedule
    Run {
        debug_enabled: bool,
        config_path: Option<String>,
        date: Option<NaiveDate>,
        json: bool,
    },
    /// Show help information and exit
    ShowHelp,
    /// Show version information and exit
    ShowVersion,
    /// Show help due to unknown or malformed arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// The first item is treated as the program name and skipped. Version wins
    /// over help, and help wins over any parse error.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut debug_enabled = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut json = false;
        let mut config_path: Option<String> = None;
        let mut date: Option<NaiveDate> = None;
        let mut unknown_arg_found = false;

        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut idx = 0;
        while idx < args_vec.len() {
            match args_vec[idx].as_str() {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => debug_enabled = true,
                "--json" | "-j" => json = true,
                "--config" | "-c" => match args_vec.get(idx + 1) {
                    Some(path) if !path.starts_with('-') => {
                        config_path = Some(path.clone());
                        idx += 1;
                    }
                    _ => {
                        log_warning!("--config requires a file path");
                        unknown_arg_found = true;
                    }
                },
                "--date" | "-D" => {
                    match args_vec
                        .get(idx + 1)
                        .map(|value| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
                    {
                        Some(Ok(parsed)) => {
                            date = Some(parsed);
                            idx += 1;
                        }
                        Some(Err(_)) => {
                            log_warning!("Invalid date '{}', expected YYYY-MM-DD", args_vec[idx + 1]);
                            unknown_arg_found = true;
                            idx += 1;
                        }
                        None => {
                            log_warning!("--date requires a value in YYYY-MM-DD form");
                            unknown_arg_found = true;
                        }
                    }
                }
                other => {
                    log_warning!("Unknown argument: {}", other);
                    unknown_arg_found = true;
                }
            }
            idx += 1;
        }

        let action = if display_version {
            CliAction::ShowVersion
        } else if display_help {
            CliAction::ShowHelp
        } else if unknown_arg_found {
            CliAction::ShowHelpDueToError
        } else {
            CliAction::Run {
                debug_enabled,
                config_path,
                date,
                json,
            }
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("prayertimes [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("-c, --config <file>    Use a specific configuration file");
    log_indented!("-D, --date <date>      Calculate for YYYY-MM-DD instead of today");
    log_indented!("-d, --debug            Show solar values and refinement passes");
    log_indented!("-j, --json             Print the schedule as JSON");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_end!();
}
