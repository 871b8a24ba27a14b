//! Default configuration file creation.
//!
//! Builds a commented, column-aligned `prayertimes.toml` for first-time users.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::common::constants::*;
use crate::prayer::{AsrConvention, CalculationMethod};

/// Create a default config file at `path`, creating parent directories as needed.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let config_content = ConfigBuilder::new()
        .add_section("Location")
        .add_setting(
            "latitude",
            &format!("{DEFAULT_LATITUDE:.4}"),
            "Degrees, north positive",
        )
        .add_setting(
            "longitude",
            &format!("{DEFAULT_LONGITUDE:.4}"),
            "Degrees, east positive",
        )
        .add_setting(
            "elevation",
            &format!("{DEFAULT_ELEVATION:.1}"),
            "Meters above the surrounding terrain",
        )
        .add_setting(
            "#timezone",
            "\"Asia/Riyadh\"",
            "IANA time zone (commented out = system zone)",
        )
        .add_section("Method")
        .add_setting(
            "method",
            &format!("\"{}\"", CalculationMethod::default()),
            "default, mwl, isna, umm_al_qura, gulf, karachi, egypt, kemenag, jakim, tehran, jafari, ...",
        )
        .add_setting(
            "asr_convention",
            &format!("\"{}\"", AsrConvention::default().as_str()),
            "\"shafii\" (one shadow length) or \"hanafi\" (two)",
        )
        .add_setting(
            "#fajr_angle",
            "18.0",
            &format!("Override the method's dawn angle ({MINIMUM_TWILIGHT_ANGLE}-{MAXIMUM_TWILIGHT_ANGLE})°"),
        )
        .add_setting(
            "#isha_angle",
            "17.0",
            &format!("Override the method's night angle ({MINIMUM_TWILIGHT_ANGLE}-{MAXIMUM_TWILIGHT_ANGLE})°"),
        )
        .add_setting(
            "#maghrib_duration",
            "90",
            "Fixed minutes from sunset to Isha instead of an angle",
        )
        .add_section("Output")
        .add_setting(
            "precise_to_seconds",
            "false",
            "Keep seconds instead of rounding to the nearest minute",
        )
        .add_setting(
            "ignore_elevation",
            "false",
            "Skip the horizon dip correction for elevated locations",
        )
        .build();

    let corrections = "\n\n# Minutes added to each prayer after calculation\n[time_correction]\n#fajr = 2\n\n# Degrees of hour angle added to each prayer (15° = 1 hour)\n[angle_correction]\n#maghrib = 1.5\n";

    fs::write(path, format!("{config_content}{corrections}"))
        .with_context(|| format!("Failed to write default config to {}", path.display()))?;

    log_block_start!("Created default configuration");
    log_indented!("{}", path.display());

    Ok(())
}

struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    fn build(self) -> String {
        // Align all comments one space past the longest setting line
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.len()),
                ConfigEntry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut result = Vec::new();
        let mut first_section = true;

        for entry in self.entries {
            match entry {
                ConfigEntry::Section(title) => {
                    if !first_section {
                        result.push(String::new());
                    }
                    result.push(title);
                    first_section = false;
                }
                ConfigEntry::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.len());
                    result.push(format!("{line}{padding}{comment}"));
                }
            }
        }

        result.join("\n")
    }
}
