use std::fmt;
use std::fs;
use std::path::Path;

use foundation::{
    DEFAULT_MAX_DELTA, GeofenceBounds, Region, ValidationError, ensure_finite, yala_bounds,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CLUSTER_SIZE: usize = 3;
pub const DEFAULT_ANIMATION_MS: u64 = 500;

/// Map settings, constant for the lifetime of the application.
///
/// Every field is optional in the file; missing fields take the Yala
/// reference values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapConfig {
    pub bounds: GeofenceBounds,
    pub max_delta: f64,
    pub cluster_size: usize,
    pub initial_region: Region,
    pub animation_ms: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            bounds: yala_bounds(),
            max_delta: DEFAULT_MAX_DELTA,
            cluster_size: DEFAULT_CLUSTER_SIZE,
            initial_region: Region::yala_initial(),
            animation_ms: DEFAULT_ANIMATION_MS,
        }
    }
}

#[derive(Debug)]
pub enum MapConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(ValidationError),
}

impl fmt::Display for MapConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapConfigError::Io(err) => write!(f, "I/O error: {err}"),
            MapConfigError::Parse(err) => write!(f, "map config parse error: {err}"),
            MapConfigError::Invalid(err) => write!(f, "invalid map config: {err}"),
        }
    }
}

impl std::error::Error for MapConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapConfigError::Io(err) => Some(err),
            MapConfigError::Parse(err) => Some(err),
            MapConfigError::Invalid(err) => Some(err),
        }
    }
}

impl From<ValidationError> for MapConfigError {
    fn from(err: ValidationError) -> Self {
        MapConfigError::Invalid(err)
    }
}

impl MapConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapConfigError> {
        let payload = fs::read_to_string(path).map_err(MapConfigError::Io)?;
        Self::from_json_str(&payload)
    }

    pub fn from_json_str(payload: &str) -> Result<Self, MapConfigError> {
        let config: MapConfig = serde_json::from_str(payload).map_err(MapConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.bounds.validate()?;
        ensure_finite("maxDelta", self.max_delta)?;
        if self.max_delta <= 0.0 {
            return Err(ValidationError::MaxDeltaNotPositive(self.max_delta));
        }
        if self.cluster_size == 0 {
            return Err(ValidationError::ClusterSizeNotPositive);
        }
        self.initial_region.validate()
    }

    pub fn animation_duration_s(&self) -> f64 {
        self.animation_ms as f64 / 1000.0
    }
}
