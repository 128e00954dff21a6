//! Request and response schemas for the HTTP API.

use geo::Point;
use serde::{Deserialize, Serialize};
use waygraph_core::NodeId;
use waygraph_core::routing::CostModel;

/// Geographic coordinate pair as it appears on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    /// Boundary validation; the core assumes coordinates are already sane.
    pub fn validate(&self) -> Result<(), String> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(format!("latitude {} outside [-90, 90]", self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(format!("longitude {} outside [-180, 180]", self.lon));
        }
        Ok(())
    }
}

impl From<LatLon> for Point<f64> {
    fn from(value: LatLon) -> Self {
        Point::new(value.lon, value.lat)
    }
}

impl From<Point<f64>> for LatLon {
    fn from(point: Point<f64>) -> Self {
        Self {
            lat: point.y(),
            lon: point.x(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ShortestRequest {
    pub origin: LatLon,
    pub destination: LatLon,
    /// Route by travel time instead of distance.
    #[serde(default)]
    pub by_time: bool,
}

impl ShortestRequest {
    pub fn cost_model(&self) -> CostModel {
        if self.by_time {
            CostModel::Time
        } else {
            CostModel::Distance
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShortestResponse {
    pub path: Vec<LatLon>,
    /// Meters or seconds, depending on `model`.
    pub cost: f64,
    pub model: CostModel,
}

#[derive(Debug, Default, Deserialize)]
pub struct BoundsParams {
    pub min_lat: Option<f64>,
    pub max_lat: Option<f64>,
    pub min_lon: Option<f64>,
    pub max_lon: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct NodeEntry {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize)]
pub struct MapNodesResponse {
    pub nodes: Vec<NodeEntry>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub num_nodes: usize,
    pub num_edges: usize,
}
