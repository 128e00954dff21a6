//! Shortest-path routing over the road graph

pub mod dijkstra;
pub mod pathfinder;

pub use dijkstra::dijkstra_route;
pub use pathfinder::{CostModel, PathFinder, RoutedPath};
