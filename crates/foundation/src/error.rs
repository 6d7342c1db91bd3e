use std::fmt;

/// Axis of a geographic extent.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

/// The only error kind produced by the geometry core.
///
/// Raised synchronously, before any output is produced. Nothing here is
/// transient, so callers should not retry.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    ClusterSizeNotPositive,
    NonFinite { field: &'static str, value: f64 },
    InvertedBounds { axis: Axis, min: f64, max: f64 },
    MaxDeltaNotPositive(f64),
    EmptyBoundary,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::ClusterSizeNotPositive => {
                write!(f, "cluster size must be a positive integer")
            }
            ValidationError::NonFinite { field, value } => {
                write!(f, "{field} must be finite, got {value}")
            }
            ValidationError::InvertedBounds { axis, min, max } => {
                write!(f, "inverted {axis} bounds: min={min} max={max}")
            }
            ValidationError::MaxDeltaNotPositive(v) => {
                write!(f, "max delta must be positive and finite, got {v}")
            }
            ValidationError::EmptyBoundary => write!(f, "geofence boundary has no vertices"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::{Axis, ValidationError};

    #[test]
    fn display_names_the_offending_field() {
        let err = ValidationError::NonFinite {
            field: "latitude",
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "latitude must be finite, got NaN");
    }

    #[test]
    fn display_inverted_bounds() {
        let err = ValidationError::InvertedBounds {
            axis: Axis::Longitude,
            min: 2.0,
            max: 1.0,
        };
        assert_eq!(err.to_string(), "inverted longitude bounds: min=2 max=1");
    }
}
