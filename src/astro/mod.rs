//! Solar geometry used by the prayer time solver.
//!
//! This module holds the pure arithmetic side of the calculator. Nothing in here
//! knows about prayers, methods or configuration; it only turns instants into
//! day numbers, day numbers into solar positions, and altitudes into hour angles.
//!
//! ## Module Structure
//!
//! - [`julian`]: Continuous day count for an instant, behind the [`DayNumber`] seam
//! - [`position`]: Declination, equation of time, transit hour and target altitudes
//! - [`hour_angle`]: Inversion of the altitude equation, with polar "no solution" handling

pub mod hour_angle;
pub mod julian;
pub mod position;

pub use hour_angle::hour_angle;
pub use julian::{DayNumber, JulianDay};
pub use position::{SolarPosition, horizon_altitude, shadow_altitude, solar_position, transit_hour};
