pub use crate::DEFAULT_SPEED_KMH;

// Re-export key components
pub use crate::error::Error;
pub use crate::loading::{RoadModelConfig, create_road_graph};
pub use crate::model::{BoundingBox, NearestNodeAlgorithm, RoadEdge, RoadGraph, RoadNode};
pub use crate::routing::{CostModel, PathFinder, RoutedPath};

// Core identifier type for road nodes
pub use crate::NodeId;
