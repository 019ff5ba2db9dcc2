//! Utility functions

use num_traits::Float;

/// Check whether two values are within an absolute tolerance of each other
pub fn approx_eq<T: Float>(a: T, b: T, tolerance: T) -> bool {
    (a - b).abs() <= tolerance
}

/// Snap a value to the nearest integer if it lies within `tolerance` of it
pub fn snap_to_integer<T: Float>(value: T, tolerance: T) -> Option<T> {
    let nearest = value.round();
    if (value - nearest).abs() <= tolerance {
        Some(nearest)
    } else {
        None
    }
}

/// Round to the nearest integer, with halves going up (towards +inf)
///
/// `f64::round` rounds halves away from zero, which treats -0.5 and 0.5
/// asymmetrically around index 0.
pub fn round_half_up<T: Float>(value: T) -> T {
    let half = T::one() / (T::one() + T::one());
    (value + half).floor()
}

/// Format a 2D point for error messages
pub fn format_point(x: f64, y: f64) -> String {
    format!("({}, {})", x, y)
}
