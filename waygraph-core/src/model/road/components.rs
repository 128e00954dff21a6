//! Road network components - nodes and edges

use geo::Point;

use crate::NodeId;

/// Road graph node
#[derive(Debug, Clone, PartialEq)]
pub struct RoadNode {
    /// OSM ID of the node
    pub id: NodeId,
    /// Node coordinates, x = longitude, y = latitude
    pub geometry: Point<f64>,
}

impl RoadNode {
    pub fn lat(&self) -> f64 {
        self.geometry.y()
    }

    pub fn lon(&self) -> f64 {
        self.geometry.x()
    }
}

/// Road graph edge (directed street segment)
#[derive(Debug, Clone, PartialEq)]
pub struct RoadEdge {
    /// Segment length in meters
    pub length_m: f64,
    /// Signposted speed limit in km/h, if the source data had one
    pub max_speed_kmh: Option<f64>,
}
