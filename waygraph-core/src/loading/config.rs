use std::path::PathBuf;

use serde::Deserialize;

use crate::DEFAULT_SPEED_KMH;
use crate::model::NearestNodeAlgorithm;

/// Configuration for building a road graph from extracted map data.
#[derive(Debug, Clone, Deserialize)]
pub struct RoadModelConfig {
    /// CSV of node records (`id,lat,lon`).
    pub nodes_path: PathBuf,
    /// CSV of directed edge records (`from_id,to_id,length_m,max_speed_kmh`).
    pub edges_path: PathBuf,
    /// Snapshot of the built graph; written after a fresh build and reused
    /// on the next start when present.
    #[serde(default)]
    pub cache_path: Option<PathBuf>,
    /// Fallback speed for edges without a limit, in km/h.
    #[serde(default = "default_speed")]
    pub default_speed_kmh: f64,
    /// Snapping strategy for geographic queries.
    #[serde(default)]
    pub snap_algorithm: NearestNodeAlgorithm,
}

fn default_speed() -> f64 {
    DEFAULT_SPEED_KMH
}
