//! Hour angle solver.

/// Hour angle, in degrees within `[0, 180]`, at which the sun sits at `altitude`.
///
/// Solves `cos(H) = (sin(alt) − sin(lat)·sin(dec)) / (cos(lat)·cos(dec))`.
/// Returns `None` when the sun never reaches the altitude on that day (polar day,
/// polar night, or twilight that never ends), which callers report as an
/// unavailable time rather than an error.
pub fn hour_angle(altitude: f64, declination: f64, latitude: f64) -> Option<f64> {
    let (alt, dec, lat) = (
        altitude.to_radians(),
        declination.to_radians(),
        latitude.to_radians(),
    );

    let cos_h = (alt.sin() - lat.sin() * dec.sin()) / (lat.cos() * dec.cos());

    // Out of range (or NaN at a pole) means the altitude is never reached
    if !(-1.0..=1.0).contains(&cos_h) {
        return None;
    }

    Some(cos_h.acos().to_degrees())
}
