//! Road network model - nodes, edges and the graph itself

pub mod components;
pub mod network;

pub use components::{RoadEdge, RoadNode};
pub use network::{BoundingBox, IndexedPoint, NearestNodeAlgorithm, RoadGraph};
