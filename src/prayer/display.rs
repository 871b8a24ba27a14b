//! Display and formatting utilities for calculated prayer times.
//!
//! This module handles the visual output of a dated calculator: the box-drawing
//! schedule printed by the binary, the debug dump of the per-date snapshot, and
//! the serializable report used for JSON output.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;

use super::calculator::DatedCalculator;
use super::{PrayerTime, Target};
use crate::logger::Log;

/// Format a fractional clock hour as `HH:MM:SS`, keeping the sign for negative hours.
pub fn format_hours(hours: f64) -> String {
    let total = (hours * 3600.0).round() as i64;
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    format!(
        "{sign}{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

fn format_offset(hours: f64) -> String {
    let minutes = (hours * 60.0).round() as i64;
    let sign = if minutes < 0 { '-' } else { '+' };
    format!("{sign}{:02}:{:02}", minutes.abs() / 60, minutes.abs() % 60)
}

/// Log the per-date snapshot and the resolved settings behind it.
///
/// Prints nothing unless debug output is enabled.
pub fn log_day_debug_info<Tz: TimeZone>(dated: &DatedCalculator<'_, Tz>) {
    if !Log::is_debug_enabled() {
        return;
    }

    let day = dated.day();
    let settings = dated.settings();

    log_pipe!();
    log_debug!("Solar calculation details:");
    log_indented!("        Coordinates: {:.4}°, {:.4}°", settings.latitude, settings.longitude);
    log_indented!("          Elevation: {:.1} m", settings.elevation);
    log_indented!("         UTC offset: {}", format_offset(day.timezone_hours));
    log_indented!("   Local noon (UTC): {}", day.noon.format("%Y-%m-%d %H:%M:%S"));
    log_indented!("         Julian day: {:.5}", day.julian_day);
    log_indented!("            Transit: {}", format_hours(day.transit));
    log_indented!("        Declination: {:.4}°", day.declination);
    log_indented!("  Fajr / Isha angle: {}° / {}°", settings.fajr_angle, settings.isha_angle);
    if let Some(duration) = settings.maghrib_duration {
        log_indented!("   Isha after sunset: {} min", duration.num_minutes());
    }
    log_indented!("    Asr coefficient: {}", settings.asr_coefficient);
    log_indented!(
        "  Elevation applied: {}",
        if settings.correct_for_elevation { "yes" } else { "no" }
    );
}

/// Log the day's schedule as a block, one line per target.
pub fn log_schedule<Tz: TimeZone>(dated: &DatedCalculator<'_, Tz>)
where
    Tz::Offset: Display,
{
    let format = if dated.settings().precise_to_seconds {
        "%H:%M:%S"
    } else {
        "%H:%M"
    };

    log_block_start!("Prayer times for {}", dated.day().date.format("%A, %d %B %Y"));
    for target in Target::ALL {
        match dated.calculate(target) {
            PrayerTime::At(time) => log_indented!("{:>8}  {}", target.label(), time.format(format)),
            PrayerTime::Unavailable => {
                log_indented!("{:>8}  unavailable (sun does not reach the required altitude)", target.label())
            }
        }
    }
}

/// Serializable view of one day's schedule. Unavailable targets are `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleReport {
    pub date: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset: String,
    pub times: BTreeMap<Target, Option<String>>,
}

impl ScheduleReport {
    pub fn from_dated<Tz: TimeZone>(dated: &DatedCalculator<'_, Tz>) -> Self
    where
        Tz::Offset: Display,
    {
        let times = Target::ALL
            .into_iter()
            .map(|target| {
                let time = dated
                    .calculate(target)
                    .into_time()
                    .map(|time: DateTime<Tz>| time.to_rfc3339());
                (target, time)
            })
            .collect();

        Self {
            date: dated.day().date,
            latitude: dated.settings().latitude,
            longitude: dated.settings().longitude,
            utc_offset: format_offset(dated.day().timezone_hours),
            times,
        }
    }
}
