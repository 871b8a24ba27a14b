//! Application-wide constants.
//!
//! Solver constants live next to the configuration defaults so that every
//! tunable number in the crate can be found in one place.

// # Refinement Loop

/// Upper bound on fixed-point iterations when refining a prayer time.
pub const MAX_REFINEMENT_ITERATIONS: usize = 5;

/// Two consecutive candidates closer than this (after rounding) are considered converged.
pub const CONVERGENCE_TOLERANCE_SECS: i64 = 1;

/// Candidates further than this from local noon are treated as unavailable.
pub const MAXIMUM_NOON_OFFSET_HOURS: f64 = 7.0 * 24.0;

// # Solar Geometry

/// Apparent altitude of the sun's upper limb at sunrise/sunset (refraction + semidiameter).
pub const HORIZON_ALTITUDE_DEG: f64 = -0.8333;

/// Horizon dip per square root of observer elevation in meters.
pub const ELEVATION_DIP_COEFFICIENT: f64 = 0.0347;

/// Degrees of hour angle per hour of clock time.
pub const DEGREES_PER_HOUR: f64 = 15.0;

/// Julian day of the J2000.0 epoch.
pub const J2000_JULIAN_DAY: f64 = 2_451_545.0;

/// Julian day of the Unix epoch (1970-01-01T00:00:00Z).
pub const UNIX_EPOCH_JULIAN_DAY: f64 = 2_440_587.5;

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

// # Configuration

pub const CONFIG_DIR_NAME: &str = "prayertimes";
pub const CONFIG_FILE_NAME: &str = "prayertimes.toml";

pub const DEFAULT_LATITUDE: f64 = 21.4225;
pub const DEFAULT_LONGITUDE: f64 = 39.8262;
pub const DEFAULT_ELEVATION: f64 = 0.0;

/// Twilight angles are depressions below the horizon and must stay within this range.
pub const MINIMUM_TWILIGHT_ANGLE: f64 = 0.0;
pub const MAXIMUM_TWILIGHT_ANGLE: f64 = 90.0;

/// Post-sunset durations longer than this are almost certainly a unit mistake.
pub const MAXIMUM_MAGHRIB_DURATION_MINUTES: f64 = 360.0;

/// Per-target corrections beyond these are rejected by config validation.
pub const MAXIMUM_TIME_CORRECTION_MINUTES: f64 = 1440.0;
pub const MAXIMUM_ANGLE_CORRECTION_DEGREES: f64 = 360.0;

// # Exit Codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
