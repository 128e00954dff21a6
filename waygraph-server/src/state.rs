//! Shared application state, initialized once at startup.

use std::sync::Arc;

use waygraph_core::loading::{RoadModelConfig, create_road_graph};
use waygraph_core::model::{NearestNodeAlgorithm, RoadGraph};
use waygraph_core::routing::PathFinder;

/// Holds the loaded graph and its path finder. Cheap to clone; handlers get
/// it through axum's `State` extractor rather than any global.
#[derive(Clone)]
pub struct AppState {
    graph: Arc<RoadGraph>,
    pathfinder: Arc<PathFinder>,
}

impl AppState {
    /// Load the road graph and wrap it for request handling.
    ///
    /// # Errors
    ///
    /// Returns an error when the graph cannot be built from the configured
    /// sources.
    pub fn build(config: &RoadModelConfig) -> Result<Self, waygraph_core::Error> {
        tracing::info!(
            nodes = %config.nodes_path.display(),
            edges = %config.edges_path.display(),
            "loading road graph"
        );
        let graph = create_road_graph(config)?;
        tracing::info!(
            num_nodes = graph.num_nodes(),
            num_edges = graph.num_edges(),
            "road graph loaded"
        );
        Ok(Self::from_graph(graph, config.snap_algorithm))
    }

    /// Wrap an already-built graph; used by tests.
    pub fn from_graph(graph: RoadGraph, algorithm: NearestNodeAlgorithm) -> Self {
        let graph = Arc::new(graph);
        let pathfinder = Arc::new(PathFinder::with_algorithm(Arc::clone(&graph), algorithm));
        Self { graph, pathfinder }
    }

    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    pub fn pathfinder(&self) -> &PathFinder {
        &self.pathfinder
    }
}
