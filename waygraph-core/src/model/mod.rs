//! Road network data model

pub mod road;

pub use road::{BoundingBox, IndexedPoint, NearestNodeAlgorithm, RoadEdge, RoadGraph, RoadNode};
