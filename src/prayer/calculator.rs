//! The calculator facade.
//!
//! The lifecycle is enforced by types: a [`Calculator`] only exists once its
//! configuration has been resolved, and times can only be requested from a
//! [`DatedCalculator`], which carries the per-date snapshot.

use chrono::{DateTime, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::refine::refine;
use super::settings::Settings;
use super::{PrayerTime, Target};
use crate::astro::{DayNumber, JulianDay, solar_position, transit_hour};
use crate::common::constants::{MAXIMUM_NOON_OFFSET_HOURS, SECONDS_PER_HOUR};

/// A calculator with resolved settings, ready to be given a date.
pub struct Calculator {
    settings: Settings,
    day_number: Arc<dyn DayNumber + Send + Sync>,
}

impl fmt::Debug for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calculator")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Calculator {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            day_number: Arc::new(JulianDay),
        }
    }

    /// Replace the day-number converter (julian day by default).
    pub fn with_day_number(mut self, day_number: impl DayNumber + Send + Sync + 'static) -> Self {
        self.day_number = Arc::new(day_number);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Derive the per-date snapshot for `date` in the civil time zone `tz`.
    ///
    /// Each call computes a fresh snapshot; nothing is shared between dates.
    pub fn set_date<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> DatedCalculator<'_, Tz> {
        let day = DayState::new(date, tz, self.settings.longitude, self.day_number.as_ref());
        DatedCalculator {
            calculator: self,
            tz: tz.clone(),
            day,
        }
    }
}

/// Values derived once per date, anchored at local noon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayState {
    pub date: NaiveDate,
    /// Local noon of `date`, as an instant.
    pub noon: DateTime<Utc>,
    /// Civil UTC offset at local noon, in hours.
    pub timezone_hours: f64,
    /// Continuous day count at local noon.
    pub julian_day: f64,
    /// Clock hour of solar transit, from local midnight.
    pub transit: f64,
    /// Sun declination at local noon, in degrees.
    pub declination: f64,
}

impl DayState {
    fn new<Tz: TimeZone>(date: NaiveDate, tz: &Tz, longitude: f64, day_number: &dyn DayNumber) -> Self {
        let local_noon = date.and_time(NaiveTime::MIN) + TimeDelta::hours(12);

        let (noon, offset_secs) = match tz.from_local_datetime(&local_noon).earliest() {
            Some(noon) => (
                noon.with_timezone(&Utc),
                noon.offset().fix().local_minus_utc(),
            ),
            None => {
                // Local noon falls in a gap; use the offset in force at UTC noon
                let offset = tz.offset_from_utc_datetime(&local_noon).fix().local_minus_utc();
                (
                    (local_noon - TimeDelta::seconds(i64::from(offset))).and_utc(),
                    offset,
                )
            }
        };

        let timezone_hours = f64::from(offset_secs) / SECONDS_PER_HOUR;
        let julian_day = day_number.continuous_day(noon);
        let position = solar_position(julian_day);

        Self {
            date,
            noon,
            timezone_hours,
            julian_day,
            transit: transit_hour(position, longitude, timezone_hours),
            declination: position.declination,
        }
    }

    /// Seconds from local noon for a clock hour, rounded to the nearest second,
    /// or to the nearest whole minute unless `precise_to_seconds`.
    ///
    /// `None` when the hour is not finite or lies further than
    /// [`MAXIMUM_NOON_OFFSET_HOURS`] from noon.
    pub fn offset_from_noon(hours: f64, precise_to_seconds: bool) -> Option<i64> {
        let offset_hours = hours - 12.0;
        if !offset_hours.is_finite() || offset_hours.abs() > MAXIMUM_NOON_OFFSET_HOURS {
            return None;
        }
        if precise_to_seconds {
            Some((offset_hours * SECONDS_PER_HOUR).round() as i64)
        } else {
            Some((offset_hours * 60.0).round() as i64 * 60)
        }
    }

    /// The instant `offset_secs` away from local noon, if representable.
    pub fn instant(&self, offset_secs: i64) -> Option<DateTime<Utc>> {
        TimeDelta::try_seconds(offset_secs).and_then(|delta| self.noon.checked_add_signed(delta))
    }
}

/// A calculator bound to one date. Safe to share across threads for reading.
pub struct DatedCalculator<'a, Tz: TimeZone> {
    calculator: &'a Calculator,
    tz: Tz,
    day: DayState,
}

impl<Tz: TimeZone> DatedCalculator<'_, Tz> {
    pub fn day(&self) -> &DayState {
        &self.day
    }

    pub fn settings(&self) -> &Settings {
        &self.calculator.settings
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// Time of `target` on this date, or [`PrayerTime::Unavailable`] when the sun
    /// never reaches the required altitude.
    pub fn calculate(&self, target: Target) -> PrayerTime<Tz> {
        let settings = &self.calculator.settings;

        if target == Target::Isha
            && let Some(duration) = settings.maghrib_duration
        {
            return self.fixed_interval_isha(duration);
        }

        let instant = refine(settings, &self.day, target, self.calculator.day_number.as_ref())
            .and_then(|refinement| {
                if !refinement.converged {
                    log_debug!(
                        "{target} not converged after {} passes, keeping last candidate",
                        refinement.iterations
                    );
                }
                self.day.instant(refinement.offset_secs)
            });

        match instant {
            Some(instant) => PrayerTime::At(instant.with_timezone(&self.tz)),
            None => PrayerTime::Unavailable,
        }
    }

    /// Maghrib plus a fixed duration, rounded the same way as solved targets.
    fn fixed_interval_isha(&self, duration: TimeDelta) -> PrayerTime<Tz> {
        let settings = &self.calculator.settings;
        let day_number = self.calculator.day_number.as_ref();
        let Some(maghrib) = refine(settings, &self.day, Target::Maghrib, day_number) else {
            return PrayerTime::Unavailable;
        };

        let seconds = maghrib.offset_secs as f64 + duration.num_milliseconds() as f64 / 1000.0;
        DayState::offset_from_noon(12.0 + seconds / SECONDS_PER_HOUR, settings.precise_to_seconds)
            .and_then(|offset_secs| self.day.instant(offset_secs))
            .map_or(PrayerTime::Unavailable, |instant| {
                PrayerTime::At(instant.with_timezone(&self.tz))
            })
    }

    /// Times of every available target, in chronological order. Unavailable
    /// targets are omitted.
    pub fn calculate_all(&self) -> BTreeMap<Target, DateTime<Tz>> {
        Target::ALL
            .into_iter()
            .filter_map(|target| self.calculate(target).into_time().map(|time| (target, time)))
            .collect()
    }
}
