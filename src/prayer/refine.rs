//! Fixed-point refinement of a single target time.
//!
//! Declination and transit depend on the instant they are evaluated at, but the
//! instant is what is being solved for. Starting from the noon snapshot, each
//! pass solves the hour angle, converts it to a clock time, then re-evaluates the
//! sun at that time. The loop stops once two passes agree to the second, or after
//! [`MAX_REFINEMENT_ITERATIONS`] passes with the last candidate as a best effort.

use super::calculator::DayState;
use super::settings::Settings;
use super::{DayPhase, Target};
use crate::astro::{DayNumber, hour_angle, solar_position, transit_hour};
use crate::common::constants::{CONVERGENCE_TOLERANCE_SECS, MAX_REFINEMENT_ITERATIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Refinement {
    /// Seconds from local noon.
    pub offset_secs: i64,
    pub iterations: usize,
    pub converged: bool,
}

/// Solve `target` for the day in `day`. `None` means the target is unavailable,
/// either geometrically or because corrections push it out of range.
pub(crate) fn refine(
    settings: &Settings,
    day: &DayState,
    target: Target,
    day_number: &dyn DayNumber,
) -> Option<Refinement> {
    if target.phase() == DayPhase::Midday {
        let hours = settings.target_hours(target, day.transit, 0.0);
        return Some(Refinement {
            offset_secs: DayState::offset_from_noon(hours, settings.precise_to_seconds)?,
            iterations: 0,
            converged: true,
        });
    }

    let mut transit = day.transit;
    let mut declination = day.declination;
    let mut altitude = settings.sun_altitude(target, declination)?;
    let mut previous: Option<i64> = None;
    let mut offset_secs = 0;

    for iteration in 1..=MAX_REFINEMENT_ITERATIONS {
        let angle = hour_angle(altitude, declination, settings.latitude)?;
        let hours = settings.target_hours(target, transit, angle);
        offset_secs = DayState::offset_from_noon(hours, settings.precise_to_seconds)?;

        log_debug!(
            "{target} pass {iteration}: altitude {altitude:.4}°, hour angle {angle:.4}°, {offset_secs:+}s from noon"
        );

        if let Some(previous) = previous
            && (offset_secs - previous).abs() < CONVERGENCE_TOLERANCE_SECS
        {
            return Some(Refinement {
                offset_secs,
                iterations: iteration,
                converged: true,
            });
        }
        previous = Some(offset_secs);

        let position = solar_position(day_number.continuous_day(day.instant(offset_secs)?));
        transit = transit_hour(position, settings.longitude, day.timezone_hours);
        declination = position.declination;

        // Horizon and twilight altitudes are constant; only the shadow altitude follows declination
        if target == Target::Asr {
            altitude = settings.sun_altitude(target, declination)?;
        }
    }

    Some(Refinement {
        offset_secs,
        iterations: MAX_REFINEMENT_ITERATIONS,
        converged: false,
    })
}
