//! Precision policies.
//!
//! Coordinates are plain `f64` degrees. Comparisons that decide behavior (for
//! example whether a viewport was moved by clamping) go through
//! [`differs`] so float noise cannot flip the outcome.

use crate::error::ValidationError;

/// Tolerance for coordinate comparisons, in degrees.
pub const COORD_EPSILON: f64 = 1e-9;

/// True when `a` and `b` are further apart than [`COORD_EPSILON`].
#[inline]
pub fn differs(a: f64, b: f64) -> bool {
    (a - b).abs() > COORD_EPSILON
}

/// Reject NaN and infinities, naming the field in the error.
#[inline]
pub fn ensure_finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite { field, value })
    }
}

/// Canonicalize a floating-point value so `-0.0` and `0.0` compare equal
/// bit-for-bit after clamping.
pub fn canonical_f64(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}
