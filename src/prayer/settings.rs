//! Caller configuration and the convention layer that resolves it.
//!
//! [`PrayerConfig`] is what a caller (or the TOML config file) supplies. It is
//! resolved exactly once into [`Settings`]: method defaults first, then any
//! explicit non-zero override, field by field. Per-target corrections are carried
//! through and applied on every calculation.

use chrono::TimeDelta;
use serde::Deserialize;
use std::collections::BTreeMap;

use super::calculator::Calculator;
use super::method::{AsrConvention, CalculationMethod};
use super::{DayPhase, Target};
use crate::astro::{horizon_altitude, shadow_altitude};
use crate::common::constants::{DEGREES_PER_HOUR, SECONDS_PER_HOUR};

/// Per-target hour angle correction in degrees (15° shifts the time by one hour).
pub type AngleCorrection = BTreeMap<Target, f64>;

/// Per-target clock correction.
pub type TimeCorrection = BTreeMap<Target, TimeDelta>;

/// Unresolved calculator configuration.
///
/// Zero or absent overrides mean "use the method's default". Latitude and
/// longitude are used as given; no range checking happens here.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PrayerConfig {
    /// Degrees, north positive.
    pub latitude: f64,
    /// Degrees, east positive.
    pub longitude: f64,
    /// Meters above the surrounding terrain.
    pub elevation: f64,
    pub method: CalculationMethod,
    pub asr_convention: AsrConvention,
    /// Overrides the method's dawn angle when non-zero.
    pub fajr_angle: Option<f64>,
    /// Overrides the method's night angle when non-zero.
    pub isha_angle: Option<f64>,
    /// Minutes from sunset to the night prayer; overrides the method when non-zero.
    pub maghrib_duration: Option<f64>,
    /// Keep seconds instead of rounding every time to the nearest minute.
    pub precise_to_seconds: bool,
    /// Skip the horizon dip correction for elevated observers.
    pub ignore_elevation: bool,
    /// Minutes added to each target after solving.
    pub time_correction: BTreeMap<Target, f64>,
    /// Degrees of hour angle added to each target after solving.
    pub angle_correction: BTreeMap<Target, f64>,
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

fn minutes_to_delta(minutes: f64) -> TimeDelta {
    // The float cast saturates, so only a huge negative value can fall outside the range
    TimeDelta::try_milliseconds((minutes * 60_000.0).round() as i64).unwrap_or(TimeDelta::MIN)
}

impl PrayerConfig {
    /// Resolve method and convention defaults into a ready calculator.
    pub fn finalize(&self) -> Calculator {
        Calculator::new(self.resolve())
    }

    /// Resolve method and convention defaults into numeric settings.
    pub fn resolve(&self) -> Settings {
        let profile = self.method.profile();

        let maghrib_duration = match non_zero(self.maghrib_duration) {
            Some(minutes) => Some(minutes_to_delta(minutes)),
            None => profile.maghrib_duration,
        };

        Settings {
            latitude: self.latitude,
            longitude: self.longitude,
            elevation: self.elevation,
            fajr_angle: non_zero(self.fajr_angle).unwrap_or(profile.fajr_angle),
            isha_angle: non_zero(self.isha_angle).unwrap_or(profile.isha_angle),
            maghrib_duration,
            asr_coefficient: self.asr_convention.coefficient(),
            precise_to_seconds: self.precise_to_seconds,
            correct_for_elevation: !self.ignore_elevation,
            time_correction: self
                .time_correction
                .iter()
                .map(|(target, minutes)| (*target, minutes_to_delta(*minutes)))
                .collect(),
            angle_correction: self.angle_correction.clone(),
        }
    }
}

/// Fully resolved, immutable calculator settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub fajr_angle: f64,
    pub isha_angle: f64,
    pub maghrib_duration: Option<TimeDelta>,
    pub asr_coefficient: f64,
    pub precise_to_seconds: bool,
    pub correct_for_elevation: bool,
    pub time_correction: TimeCorrection,
    pub angle_correction: AngleCorrection,
}

impl Settings {
    /// Sun altitude in degrees that defines `target`, or `None` for midday,
    /// which is pinned to transit instead.
    pub fn sun_altitude(&self, target: Target, declination: f64) -> Option<f64> {
        match target {
            Target::Fajr => Some(-self.fajr_angle),
            Target::Isha => Some(-self.isha_angle),
            Target::Sunrise | Target::Maghrib => Some(horizon_altitude(
                self.elevation,
                self.correct_for_elevation,
            )),
            Target::Asr => Some(shadow_altitude(
                self.asr_coefficient,
                self.latitude,
                declination,
            )),
            Target::Zuhr => None,
        }
    }

    /// Clock hour for `target` from transit and a solved hour angle, with the
    /// target's corrections applied.
    pub fn target_hours(&self, target: Target, transit: f64, hour_angle: f64) -> f64 {
        let offset = hour_angle / DEGREES_PER_HOUR;
        let hours = match target.phase() {
            DayPhase::BeforeMidday => transit - offset,
            DayPhase::Midday => transit,
            DayPhase::AfterMidday => transit + offset,
        };
        self.apply_corrections(target, hours)
    }

    fn apply_corrections(&self, target: Target, mut hours: f64) -> f64 {
        if let Some(degrees) = self.angle_correction.get(&target) {
            hours += degrees / DEGREES_PER_HOUR;
        }
        if let Some(delta) = self.time_correction.get(&target) {
            hours += delta.num_milliseconds() as f64 / (SECONDS_PER_HOUR * 1000.0);
        }
        hours
    }
}
