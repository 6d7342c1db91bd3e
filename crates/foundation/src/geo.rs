use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::precision::ensure_finite;

/// A single observation site in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_finite("latitude", self.latitude)?;
        ensure_finite("longitude", self.longitude)?;
        Ok(())
    }
}

/// Arithmetic mean coordinate of a group of observations.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeanCenter {
    pub mean_latitude: f64,
    pub mean_longitude: f64,
}

impl MeanCenter {
    pub fn new(mean_latitude: f64, mean_longitude: f64) -> Self {
        Self {
            mean_latitude,
            mean_longitude,
        }
    }

    pub fn as_point(&self) -> GeoPoint {
        GeoPoint::new(self.mean_latitude, self.mean_longitude)
    }
}
