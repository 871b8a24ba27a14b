//! Continuous astronomical day count.

use chrono::{DateTime, Utc};

use crate::common::constants::{SECONDS_PER_DAY, UNIX_EPOCH_JULIAN_DAY};

/// Converts an instant into a fractional, continuous day count.
///
/// Implementations must be pure: the same instant always yields the same value.
/// The solver calls this once when a date is set and again for every refinement
/// iteration, so it should also be cheap.
#[cfg_attr(test, mockall::automock)]
pub trait DayNumber {
    fn continuous_day(&self, instant: DateTime<Utc>) -> f64;
}

/// Julian day numbering (days since noon UT, 4713 BC January 1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JulianDay;

impl DayNumber for JulianDay {
    fn continuous_day(&self, instant: DateTime<Utc>) -> f64 {
        let seconds = instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_millis()) / 1000.0;
        seconds / SECONDS_PER_DAY + UNIX_EPOCH_JULIAN_DAY
    }
}
