//! Configuration validation functionality.
//!
//! Rejects values the calculator would accept but that are almost certainly
//! mistakes. Latitude and longitude are intentionally left alone.

use anyhow::Result;

use super::Config;
use crate::common::constants::{
    MAXIMUM_ANGLE_CORRECTION_DEGREES, MAXIMUM_MAGHRIB_DURATION_MINUTES,
    MAXIMUM_TIME_CORRECTION_MINUTES, MAXIMUM_TWILIGHT_ANGLE, MINIMUM_TWILIGHT_ANGLE,
};

/// Validate a parsed configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    let calc = &config.calculation;

    if !calc.elevation.is_finite() || calc.elevation < 0.0 {
        anyhow::bail!(
            "elevation must be zero or a positive number of meters (got {})",
            calc.elevation
        );
    }

    for (field, angle) in [("fajr_angle", calc.fajr_angle), ("isha_angle", calc.isha_angle)] {
        if let Some(angle) = angle
            && !(MINIMUM_TWILIGHT_ANGLE..=MAXIMUM_TWILIGHT_ANGLE).contains(&angle)
        {
            anyhow::bail!(
                "{} ({}) must be between {} and {} degrees",
                field,
                angle,
                MINIMUM_TWILIGHT_ANGLE,
                MAXIMUM_TWILIGHT_ANGLE
            );
        }
    }

    if let Some(minutes) = calc.maghrib_duration
        && !(0.0..=MAXIMUM_MAGHRIB_DURATION_MINUTES).contains(&minutes)
    {
        anyhow::bail!(
            "maghrib_duration ({} minutes) must be between 0 and {} minutes",
            minutes,
            MAXIMUM_MAGHRIB_DURATION_MINUTES
        );
    }

    if let Some((target, minutes)) = calc
        .time_correction
        .iter()
        .find(|(_, minutes)| !(0.0..=MAXIMUM_TIME_CORRECTION_MINUTES).contains(&minutes.abs()))
    {
        anyhow::bail!(
            "time_correction for {} ({} minutes) must be between -{} and {} minutes",
            target.as_str(),
            minutes,
            MAXIMUM_TIME_CORRECTION_MINUTES,
            MAXIMUM_TIME_CORRECTION_MINUTES
        );
    }

    if let Some((target, degrees)) = calc
        .angle_correction
        .iter()
        .find(|(_, degrees)| !(0.0..=MAXIMUM_ANGLE_CORRECTION_DEGREES).contains(&degrees.abs()))
    {
        anyhow::bail!(
            "angle_correction for {} ({} degrees) must be between -{} and {} degrees",
            target.as_str(),
            degrees,
            MAXIMUM_ANGLE_CORRECTION_DEGREES,
            MAXIMUM_ANGLE_CORRECTION_DEGREES
        );
    }

    config.timezone()?;

    Ok(())
}
