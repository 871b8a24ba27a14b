//! Apparent solar position and the altitudes the solver aims for.
//!
//! The low-precision solar coordinates below are accurate to roughly a minute of
//! arc between 1950 and 2050, which is far below the one-second resolution of the
//! times the calculator produces.

use crate::common::constants::{
    DEGREES_PER_HOUR, ELEVATION_DIP_COEFFICIENT, HORIZON_ALTITUDE_DEG, J2000_JULIAN_DAY,
};

/// Sun coordinates needed by the solver for one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Declination in degrees, north positive.
    pub declination: f64,
    /// Equation of time in hours (apparent minus mean solar time), within ±12h.
    pub equation_of_time: f64,
}

fn normalize(value: f64, period: f64) -> f64 {
    value - period * (value / period).floor()
}

/// Compute the sun's declination and equation of time for a julian day.
pub fn solar_position(julian_day: f64) -> SolarPosition {
    let d = julian_day - J2000_JULIAN_DAY;

    let mean_anomaly = normalize(357.529 + 0.985_600_28 * d, 360.0).to_radians();
    let mean_longitude = normalize(280.459 + 0.985_647_36 * d, 360.0);
    let ecliptic_longitude = (mean_longitude
        + 1.915 * mean_anomaly.sin()
        + 0.020 * (2.0 * mean_anomaly).sin())
    .to_radians();
    let obliquity = (23.439 - 0.000_000_36 * d).to_radians();

    let right_ascension = (obliquity.cos() * ecliptic_longitude.sin())
        .atan2(ecliptic_longitude.cos())
        .to_degrees()
        / DEGREES_PER_HOUR;
    let right_ascension = normalize(right_ascension, 24.0);

    let equation_of_time =
        normalize(mean_longitude / DEGREES_PER_HOUR - right_ascension + 12.0, 24.0) - 12.0;
    let declination = (obliquity.sin() * ecliptic_longitude.sin())
        .asin()
        .to_degrees();

    SolarPosition {
        declination,
        equation_of_time,
    }
}

/// Local clock hour of solar transit, counted from local midnight.
///
/// `timezone_hours` is the civil offset from UTC in force on the date.
pub fn transit_hour(position: SolarPosition, longitude: f64, timezone_hours: f64) -> f64 {
    12.0 + timezone_hours - longitude / DEGREES_PER_HOUR - position.equation_of_time
}

/// Altitude of the sun's center at sunrise/sunset.
///
/// With elevation correction the visible horizon drops by the dip of an observer
/// standing `elevation` meters above the surrounding terrain.
pub fn horizon_altitude(elevation: f64, correct_for_elevation: bool) -> f64 {
    if correct_for_elevation {
        HORIZON_ALTITUDE_DEG - ELEVATION_DIP_COEFFICIENT * elevation.max(0.0).sqrt()
    } else {
        HORIZON_ALTITUDE_DEG
    }
}

/// Altitude at which an object's shadow equals `coefficient` times its length
/// plus its noon shadow.
pub fn shadow_altitude(coefficient: f64, latitude: f64, declination: f64) -> f64 {
    let noon_shadow = (latitude - declination).abs().to_radians().tan();
    (1.0 / (coefficient + noon_shadow)).atan().to_degrees()
}
