//! Command implementations behind the `sightings` binary.
//!
//! Each command returns its JSON output as a string so the binary only has
//! to print it. Errors are flattened to messages the way a CLI reports them.

use std::path::{Path, PathBuf};

use compute::MeanCenterCache;
use formats::{Dataset, MapConfig};
use foundation::Region;
use serde::Serialize;
use tracing::info;
use viewport::clamp;

pub fn load_config(path: Option<&Path>) -> Result<MapConfig, String> {
    match path {
        Some(p) => MapConfig::load(p).map_err(|e| format!("load {}: {e}", p.display())),
        None => Ok(MapConfig::default()),
    }
}

/// Mean centers per species for the dataset at `dataset_path`.
pub fn cmd_clusters(
    dataset_path: &Path,
    cluster_size: Option<usize>,
    config: &MapConfig,
) -> Result<String, String> {
    let dataset =
        Dataset::load(dataset_path).map_err(|e| format!("load {}: {e}", dataset_path.display()))?;
    let cluster_size = cluster_size.unwrap_or(config.cluster_size);

    let mut cache = MeanCenterCache::new();
    let centers = cache
        .get_or_compute(dataset.dataset_id(), dataset.observations(), cluster_size)
        .map_err(|e| e.to_string())?;
    info!(
        species = centers.len(),
        cluster_size,
        dataset_id = dataset.dataset_id(),
        "aggregated mean centers"
    );

    serde_json::to_string_pretty(centers).map_err(|e| format!("json: {e}"))
}

#[derive(Debug, Clone, Copy)]
pub struct ClampArgs {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: Option<f64>,
    pub longitude_delta: Option<f64>,
}

/// Clamp one candidate viewport against the configured geofence.
pub fn cmd_clamp(args: ClampArgs, config: &MapConfig) -> Result<String, String> {
    let candidate = Region::new(
        args.latitude,
        args.longitude,
        args.latitude_delta.unwrap_or(config.max_delta),
        args.longitude_delta.unwrap_or(config.max_delta),
    );
    let out = clamp(&candidate, &config.bounds, config.max_delta).map_err(|e| e.to_string())?;
    if out.animation_required {
        info!(
            duration_ms = config.animation_ms,
            "viewport left the geofence; animate back"
        );
    }
    serde_json::to_string_pretty(&out).map_err(|e| format!("json: {e}"))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BoundsReport<'a> {
    config_path: Option<&'a Path>,
    #[serde(flatten)]
    config: &'a MapConfig,
}

/// The effective configuration, after defaults.
pub fn cmd_bounds(config_path: Option<&PathBuf>, config: &MapConfig) -> Result<String, String> {
    let report = BoundsReport {
        config_path: config_path.map(PathBuf::as_path),
        config,
    };
    serde_json::to_string_pretty(&report).map_err(|e| format!("json: {e}"))
}
