use serde::{Deserialize, Serialize};

use crate::error::{Axis, ValidationError};
use crate::geo::GeoPoint;
use crate::precision::{canonical_f64, ensure_finite};

/// Closed outline of Yala National Park as drawn on the map.
pub const YALA_BOUNDARY: [GeoPoint; 5] = [
    GeoPoint { latitude: 6.5150, longitude: 81.3850 },
    GeoPoint { latitude: 6.3750, longitude: 81.3900 },
    GeoPoint { latitude: 6.3700, longitude: 81.5600 },
    GeoPoint { latitude: 6.5100, longitude: 81.5550 },
    GeoPoint { latitude: 6.5150, longitude: 81.3850 },
];

/// Fixed rectangular latitude/longitude boundary (degrees, inclusive).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeofenceBounds {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl GeofenceBounds {
    pub fn new(
        min_latitude: f64,
        max_latitude: f64,
        min_longitude: f64,
        max_longitude: f64,
    ) -> Result<Self, ValidationError> {
        let bounds = GeofenceBounds {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Axis-aligned envelope of a boundary polygon.
    pub fn from_boundary(vertices: &[GeoPoint]) -> Result<Self, ValidationError> {
        let first = vertices.first().ok_or(ValidationError::EmptyBoundary)?;
        first.validate()?;
        let mut min = [first.latitude, first.longitude];
        let mut max = [first.latitude, first.longitude];
        for v in vertices.iter().skip(1) {
            v.validate()?;
            min[0] = min[0].min(v.latitude);
            min[1] = min[1].min(v.longitude);
            max[0] = max[0].max(v.latitude);
            max[1] = max[1].max(v.longitude);
        }
        Self::new(min[0], max[0], min[1], max[1])
    }

    /// Bounds may arrive through deserialization, so this is public.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_finite("bounds.minLatitude", self.min_latitude)?;
        ensure_finite("bounds.maxLatitude", self.max_latitude)?;
        ensure_finite("bounds.minLongitude", self.min_longitude)?;
        ensure_finite("bounds.maxLongitude", self.max_longitude)?;
        if self.min_latitude > self.max_latitude {
            return Err(ValidationError::InvertedBounds {
                axis: Axis::Latitude,
                min: self.min_latitude,
                max: self.max_latitude,
            });
        }
        if self.min_longitude > self.max_longitude {
            return Err(ValidationError::InvertedBounds {
                axis: Axis::Longitude,
                min: self.min_longitude,
                max: self.max_longitude,
            });
        }
        Ok(())
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        point.latitude >= self.min_latitude
            && point.latitude <= self.max_latitude
            && point.longitude >= self.min_longitude
            && point.longitude <= self.max_longitude
    }

    /// Never panics; on unvalidated inverted bounds the max edge wins.
    pub fn clamp_latitude(&self, latitude: f64) -> f64 {
        canonical_f64(latitude.max(self.min_latitude).min(self.max_latitude))
    }

    pub fn clamp_longitude(&self, longitude: f64) -> f64 {
        canonical_f64(longitude.max(self.min_longitude).min(self.max_longitude))
    }

    pub fn clamp_point(&self, point: GeoPoint) -> GeoPoint {
        GeoPoint::new(
            self.clamp_latitude(point.latitude),
            self.clamp_longitude(point.longitude),
        )
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_latitude + self.max_latitude) * 0.5,
            (self.min_longitude + self.max_longitude) * 0.5,
        )
    }
}

/// Envelope of [`YALA_BOUNDARY`].
pub fn yala_bounds() -> GeofenceBounds {
    GeofenceBounds {
        min_latitude: 6.3700,
        max_latitude: 6.5150,
        min_longitude: 81.3850,
        max_longitude: 81.5600,
    }
}
