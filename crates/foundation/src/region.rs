use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::geo::GeoPoint;
use crate::precision::ensure_finite;

/// Zoomed-out limit for both spans in the reference deployment (degrees).
pub const DEFAULT_MAX_DELTA: f64 = 0.1;

/// A map viewport: center plus visible span, all in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    pub fn new(latitude: f64, longitude: f64, latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            latitude,
            longitude,
            latitude_delta,
            longitude_delta,
        }
    }

    /// Opening viewport over Yala.
    pub fn yala_initial() -> Self {
        Self::new(6.4450, 81.4725, DEFAULT_MAX_DELTA, DEFAULT_MAX_DELTA)
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_finite("region.latitude", self.latitude)?;
        ensure_finite("region.longitude", self.longitude)?;
        ensure_finite("region.latitudeDelta", self.latitude_delta)?;
        ensure_finite("region.longitudeDelta", self.longitude_delta)?;
        Ok(())
    }

    /// Component-wise linear interpolation; `t` is clamped to `[0, 1]` and the
    /// endpoints are returned exactly.
    pub fn lerp(&self, to: &Region, t: f64) -> Region {
        if t <= 0.0 {
            return *self;
        }
        if t >= 1.0 {
            return *to;
        }
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Region::new(
            mix(self.latitude, to.latitude),
            mix(self.longitude, to.longitude),
            mix(self.latitude_delta, to.latitude_delta),
            mix(self.longitude_delta, to.longitude_delta),
        )
    }
}
