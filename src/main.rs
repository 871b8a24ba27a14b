//! Main application entry point and high-level flow coordination.
//!
//! This module orchestrates one run of the calculator after command-line
//! argument parsing is complete:
//!
//! 1. Argument parsing and early exit for help/version
//! 2. Configuration loading and validation
//! 3. Time zone resolution (configured IANA zone or the system zone)
//! 4. Calculator construction and per-date snapshot
//! 5. Output as a logged schedule or as JSON
//!
//! All calculation logic lives in the library; this file only wires it together
//! and maps failures to exit codes.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, TimeZone, Utc};
use std::fmt::Display;
use std::path::Path;

use prayertimes::args::{self, CliAction, ParsedArgs};
use prayertimes::common::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use prayertimes::config::Config;
use prayertimes::logger::Log;
use prayertimes::prayer::{Calculator, ScheduleReport, Target, log_day_debug_info, log_schedule};
use prayertimes::{log_block_start, log_end, log_error_exit, log_indented, log_version};

fn main() {
    let parsed_args = ParsedArgs::from_env();

    let code = match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            EXIT_SUCCESS
        }
        CliAction::ShowHelp => {
            args::display_help();
            EXIT_SUCCESS
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            EXIT_FAILURE
        }
        CliAction::Run {
            debug_enabled,
            config_path,
            date,
            json,
        } => {
            Log::set_debug(debug_enabled);
            // Keep stdout clean for machine-readable output
            Log::set_enabled(!json);

            match run(config_path.as_deref(), date, json, debug_enabled) {
                Ok(()) => EXIT_SUCCESS,
                Err(e) => {
                    Log::set_enabled(true);
                    log_error_exit!("{:#}", e);
                    EXIT_FAILURE
                }
            }
        }
    };

    std::process::exit(code);
}

fn run(
    config_path: Option<&str>,
    date: Option<NaiveDate>,
    json: bool,
    debug_enabled: bool,
) -> Result<()> {
    log_version!();

    let config = match config_path {
        Some(path) => Config::load_from_path(Path::new(path))?,
        None => Config::load()?,
    };
    config.log_config();

    let calculator = config.calculation.finalize();

    match config.timezone()? {
        Some(tz) => {
            let date = date.unwrap_or_else(|| Utc::now().with_timezone(&tz).date_naive());
            print_schedule(&calculator, date, &tz, json, debug_enabled)
        }
        None => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            print_schedule(&calculator, date, &Local, json, debug_enabled)
        }
    }
}

fn print_schedule<Tz: TimeZone>(
    calculator: &Calculator,
    date: NaiveDate,
    tz: &Tz,
    json: bool,
    debug_enabled: bool,
) -> Result<()>
where
    Tz::Offset: Display,
{
    let dated = calculator.set_date(date, tz);

    if json {
        let report = ScheduleReport::from_dated(&dated);
        let output =
            serde_json::to_string_pretty(&report).context("Failed to serialize schedule")?;
        println!("{output}");
        return Ok(());
    }

    if debug_enabled {
        log_day_debug_info(&dated);
    }
    log_schedule(&dated);

    let missing = Target::ALL.len() - dated.calculate_all().len();
    if missing > 0 {
        log_block_start!("{} of {} times are unavailable on this date", missing, Target::ALL.len());
        log_indented!("The sun never reaches the required altitude at this latitude");
    }

    log_end!();
    Ok(())
}
