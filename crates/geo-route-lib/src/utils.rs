//! Utility functions for coordinate unit conversions and compass headings

/// Number of fixed-point units per degree (coordinates are stored in millionths of a degree)
pub const MILLIONTHS_PER_DEGREE: f64 = 1_000_000.0;

/// Full turn in compass degrees
const FULL_TURN_DEGREES: f64 = 360.0;

/// Offset that maps a mathematical angle (0 = east, counter-clockwise) onto a
/// compass bearing (0 = north, clockwise) once reduced modulo a full turn
const COMPASS_OFFSET_DEGREES: f64 = 450.0;

/// Convert a fixed-point coordinate in millionths of a degree to decimal degrees
#[inline(always)]
pub fn millionths_to_degrees(millionths: i32) -> f64 {
    millionths as f64 / MILLIONTHS_PER_DEGREE
}

/// Convert decimal degrees to the nearest fixed-point value in millionths of a degree
///
/// Values beyond the `i32` range saturate, so they still fail any later range check.
/// Returns `None` if the input is not finite.
#[inline(always)]
pub fn degrees_to_millionths(degrees: f64) -> Option<i32> {
    if !degrees.is_finite() {
        return None;
    }
    Some((degrees * MILLIONTHS_PER_DEGREE).round() as i32)
}

/// Convert a mathematical angle in degrees into a compass bearing
///
/// # Arguments
/// * `math_degrees` - Angle in degrees as returned by `atan2`, in `[-180, 180]`,
///   with 0 pointing east and increasing counter-clockwise
///
/// # Returns
/// A bearing in `[0, 360)`, with 0 pointing north and increasing clockwise
#[inline(always)]
pub fn math_angle_to_compass(math_degrees: f64) -> f64 {
    let heading = (COMPASS_OFFSET_DEGREES - math_degrees) % FULL_TURN_DEGREES;
    // Rounding can land exactly on a full turn for angles a hair below north.
    if heading >= FULL_TURN_DEGREES {
        heading - FULL_TURN_DEGREES
    } else {
        heading
    }
}
