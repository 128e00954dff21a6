//! Snapshot persistence for a built road graph.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::RoadGraph;
use crate::{Error, NodeId};

/// Flat serializable form of a [`RoadGraph`]. Restoring replays the normal
/// insertion path, so a reloaded graph answers every query exactly like the
/// freshly built one, node insertion order included.
#[derive(Debug, Serialize, Deserialize)]
pub struct GraphSnapshot {
    default_speed_kmh: f64,
    /// (id, lat, lon) in insertion order
    nodes: Vec<(NodeId, f64, f64)>,
    /// (from, to, length_m, max_speed_kmh)
    edges: Vec<(NodeId, NodeId, f64, Option<f64>)>,
}

impl GraphSnapshot {
    pub fn capture(graph: &RoadGraph) -> Self {
        let nodes = graph
            .nodes()
            .map(|node| (node.id, node.lat(), node.lon()))
            .collect();
        let edges = graph
            .edges()
            .map(|(u, v, edge)| (u, v, edge.length_m, edge.max_speed_kmh))
            .collect();
        Self {
            default_speed_kmh: graph.default_speed_kmh(),
            nodes,
            edges,
        }
    }

    pub fn restore(&self) -> RoadGraph {
        let mut graph = RoadGraph::with_default_speed(self.default_speed_kmh);
        for &(id, lat, lon) in &self.nodes {
            graph.add_node(id, lat, lon);
        }
        for &(u, v, length_m, max_speed_kmh) in &self.edges {
            graph.add_edge(u, v, length_m, max_speed_kmh);
        }
        graph
    }
}

/// # Errors
///
/// Returns an error when the file cannot be written or serialization fails.
pub fn save_snapshot(graph: &RoadGraph, path: &Path) -> Result<(), Error> {
    let file = File::create(path)?;
    serde_json::to_writer(BufWriter::new(file), &GraphSnapshot::capture(graph))?;
    Ok(())
}

/// # Errors
///
/// Returns an error when the file cannot be read or is not a valid snapshot.
pub fn load_snapshot(path: &Path) -> Result<RoadGraph, Error> {
    let file = File::open(path)?;
    let snapshot: GraphSnapshot = serde_json::from_reader(BufReader::new(file))?;
    Ok(snapshot.restore())
}
