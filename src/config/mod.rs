//! Configuration system for prayertimes.
//!
//! This module handles the TOML configuration file: locating it, writing a
//! commented default when none exists, parsing it into [`Config`], and
//! validating the values before they reach the calculator.
//!
//! ## Configuration Sources
//!
//! 1. An explicit path passed with `--config <file>`
//! 2. **XDG_CONFIG_HOME**/prayertimes/prayertimes.toml (created on first run)
//!
//! ## Configuration Structure
//!
//! ```toml
//! #[Location]
//! latitude = 21.4225          # Degrees, north positive
//! longitude = 39.8262         # Degrees, east positive
//! elevation = 0.0             # Meters above the surrounding terrain
//! timezone = "Asia/Riyadh"    # IANA time zone (omit to use the system zone)
//!
//! #[Method]
//! method = "mwl"              # Regional calculation method
//! asr_convention = "shafii"   # "shafii" or "hanafi"
//! fajr_angle = 18.0           # Optional override of the method's dawn angle
//! isha_angle = 17.0           # Optional override of the method's night angle
//! maghrib_duration = 90       # Optional minutes from sunset to Isha
//!
//! #[Output]
//! precise_to_seconds = false  # Keep seconds instead of rounding to minutes
//! ignore_elevation = false    # Skip the horizon dip correction
//!
//! [time_correction]           # Minutes added per prayer
//! fajr = 2
//!
//! [angle_correction]          # Degrees of hour angle added per prayer
//! maghrib = 1.5
//! ```
//!
//! Latitude and longitude are passed through as given; everything else is
//! range-checked in [`validation`].

pub mod builder;
pub mod loading;
pub mod validation;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::Path;

use crate::prayer::PrayerConfig;

pub use builder::create_default_config;
pub use loading::{get_config_path, load, load_from_path};


/// Contents of `prayertimes.toml`.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Everything the calculator itself consumes.
    #[serde(flatten)]
    pub calculation: PrayerConfig,

    /// IANA time zone the dates are anchored to. `None` uses the system zone.
    pub timezone: Option<String>,
}

impl Config {
    /// Load the configuration from the default location, creating it if needed.
    pub fn load() -> Result<Self> {
        load()
    }

    /// Load the configuration from a specific file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        load_from_path(path)
    }

    /// Parse the configured time zone, if any.
    pub fn timezone(&self) -> Result<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|e| anyhow::anyhow!("{e}"))
                    .with_context(|| format!("Invalid timezone '{name}'"))
            })
            .transpose()
    }

    /// Log the active configuration in the block style.
    pub fn log_config(&self) {
        let calc = &self.calculation;
        log_block_start!("Loaded configuration");
        log_indented!("Location: {:.4}°, {:.4}° at {:.0} m", calc.latitude, calc.longitude, calc.elevation);
        log_indented!("Timezone: {}", self.timezone.as_deref().unwrap_or("system local"));
        log_indented!("Method: {}", calc.method);
        log_indented!("Asr convention: {}", calc.asr_convention.as_str());
        if let Some(angle) = calc.fajr_angle {
            log_indented!("Fajr angle override: {angle}°");
        }
        if let Some(angle) = calc.isha_angle {
            log_indented!("Isha angle override: {angle}°");
        }
        if let Some(minutes) = calc.maghrib_duration {
            log_indented!("Isha after sunset: {minutes} min");
        }
        if calc.ignore_elevation {
            log_indented!("Elevation correction: disabled");
        }
        for (target, minutes) in &calc.time_correction {
            log_indented!("Time correction: {target} {minutes:+} min");
        }
        for (target, degrees) in &calc.angle_correction {
            log_indented!("Angle correction: {target} {degrees:+}°");
        }
    }
}
