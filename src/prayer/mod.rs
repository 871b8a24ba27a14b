//! Prayer time calculation on top of the solar geometry in [`crate::astro`].
//!
//! ## Module Structure
//!
//! - [`method`]: Regional calculation methods and afternoon shadow conventions
//! - [`settings`]: Caller configuration and its one-time resolution into numeric settings
//! - [`refine`]: Fixed-point refinement of a single target time
//! - [`calculator`]: The staged facade (`Calculator` → `DatedCalculator`)
//! - [`display`]: Debug output and serializable reports
//!
//! ## Lifecycle
//!
//! A [`PrayerConfig`] is plain data. [`PrayerConfig::finalize`] resolves method and
//! convention defaults into a [`Calculator`]. [`Calculator::set_date`] derives an
//! immutable per-date snapshot and returns a [`DatedCalculator`], the only type that
//! can calculate times. Calling `set_date` again yields a fresh snapshot, so state
//! from one date can never leak into another.

pub mod calculator;
pub mod display;
pub mod method;
pub(crate) mod refine;
pub mod settings;

pub use calculator::{Calculator, DatedCalculator, DayState};
pub use display::{ScheduleReport, log_day_debug_info, log_schedule};
pub use method::{AsrConvention, CalculationMethod, MethodProfile};
pub use settings::{AngleCorrection, PrayerConfig, Settings, TimeCorrection};

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(test)]
mod tests;

/// Which side of solar transit a target falls on.
///
/// Decides whether the solved hour angle is subtracted from or added to transit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    BeforeMidday,
    Midday,
    AfterMidday,
}

/// The six daily observances, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Dawn, when the sun reaches the method's dawn depression angle.
    Fajr,
    Sunrise,
    /// Midday, at solar transit.
    Zuhr,
    /// Afternoon, when shadows reach the convention's length.
    Asr,
    /// Sunset.
    Maghrib,
    /// Night, at the method's night depression angle or a fixed time after sunset.
    Isha,
}

impl Target {
    /// All targets in chronological order.
    pub const ALL: [Target; 6] = [
        Target::Fajr,
        Target::Sunrise,
        Target::Zuhr,
        Target::Asr,
        Target::Maghrib,
        Target::Isha,
    ];

    pub fn phase(self) -> DayPhase {
        match self {
            Target::Fajr | Target::Sunrise => DayPhase::BeforeMidday,
            Target::Zuhr => DayPhase::Midday,
            Target::Asr | Target::Maghrib | Target::Isha => DayPhase::AfterMidday,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Target::Fajr => "fajr",
            Target::Sunrise => "sunrise",
            Target::Zuhr => "zuhr",
            Target::Asr => "asr",
            Target::Maghrib => "maghrib",
            Target::Isha => "isha",
        }
    }

    /// Human readable name used in log output.
    pub fn label(self) -> &'static str {
        match self {
            Target::Fajr => "Fajr",
            Target::Sunrise => "Sunrise",
            Target::Zuhr => "Zuhr",
            Target::Asr => "Asr",
            Target::Maghrib => "Maghrib",
            Target::Isha => "Isha",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Target {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::ALL
            .into_iter()
            .find(|target| target.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("unknown prayer '{}'", s))
    }
}

/// Outcome of calculating one target.
///
/// `Unavailable` is a legitimate answer, not an error: the sun simply never
/// reaches the required altitude at this location on this date.
#[derive(Debug, Clone, PartialEq)]
pub enum PrayerTime<Tz: TimeZone> {
    At(DateTime<Tz>),
    Unavailable,
}

impl<Tz: TimeZone> PrayerTime<Tz> {
    pub fn is_available(&self) -> bool {
        matches!(self, PrayerTime::At(_))
    }

    pub fn time(&self) -> Option<&DateTime<Tz>> {
        match self {
            PrayerTime::At(time) => Some(time),
            PrayerTime::Unavailable => None,
        }
    }

    pub fn into_time(self) -> Option<DateTime<Tz>> {
        match self {
            PrayerTime::At(time) => Some(time),
            PrayerTime::Unavailable => None,
        }
    }
}
