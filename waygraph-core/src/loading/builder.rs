use log::{info, warn};

use crate::model::{NearestNodeAlgorithm, RoadGraph};
use crate::{Error, NodeId};

use super::cache::{load_snapshot, save_snapshot};
use super::config::RoadModelConfig;
use super::records::{EdgeRecord, NodeRecord, deserialize_csv_file};

/// Creates a road graph based on the provided configuration.
///
/// A snapshot at `cache_path` is preferred over re-parsing the source files;
/// after a fresh parse the snapshot is written back for the next start. The
/// spatial index is built when the configured snap algorithm needs one.
///
/// # Errors
///
/// Returns an error if there are problems reading or processing data.
pub fn create_road_graph(config: &RoadModelConfig) -> Result<RoadGraph, Error> {
    if let Some(cache_path) = &config.cache_path
        && cache_path.exists()
    {
        info!("Loading graph snapshot: {}", cache_path.display());
        let mut graph = load_snapshot(cache_path)?;
        info!(
            "Snapshot loaded: {} nodes, {} edges",
            graph.num_nodes(),
            graph.num_edges()
        );
        prepare_index(&mut graph, config.snap_algorithm);
        return Ok(graph);
    }

    validate_config(config)?;

    info!("Processing node data: {}", config.nodes_path.display());
    info!("Processing edge data: {}", config.edges_path.display());
    let (nodes, edges) = rayon::join(
        || deserialize_csv_file::<NodeRecord>(&config.nodes_path),
        || deserialize_csv_file::<EdgeRecord>(&config.edges_path),
    );
    let (nodes, edges) = (nodes?, edges?);

    let mut graph = RoadGraph::with_default_speed(config.default_speed_kmh);
    for record in &nodes {
        graph.add_node(record.id, record.lat, record.lon);
    }

    let mut skipped = 0usize;
    for record in &edges {
        if record.length_m <= 0.0 {
            skipped += 1;
            continue;
        }
        graph.add_edge(
            record.from_id,
            record.to_id,
            record.length_m,
            record.max_speed_kmh,
        );
    }
    if skipped > 0 {
        warn!("Skipped {skipped} edge records with non-positive length");
    }
    if let Some(id) = first_dangling_endpoint(&graph) {
        warn!("Edge endpoint {id} has no node record; routes through it will fail");
    }

    info!(
        "Road graph built: {} nodes, {} edges",
        graph.num_nodes(),
        graph.num_edges()
    );

    if let Some(cache_path) = &config.cache_path {
        save_snapshot(&graph, cache_path)?;
        info!("Saved graph snapshot: {}", cache_path.display());
    }

    prepare_index(&mut graph, config.snap_algorithm);
    Ok(graph)
}

fn prepare_index(graph: &mut RoadGraph, algorithm: NearestNodeAlgorithm) {
    if algorithm == NearestNodeAlgorithm::RTree {
        graph.build_spatial_index();
        info!("Spatial index built over {} nodes", graph.num_nodes());
    }
}

fn validate_config(config: &RoadModelConfig) -> Result<(), Error> {
    if !config.nodes_path.exists() {
        return Err(Error::InvalidData(format!(
            "Node file not found: {}",
            config.nodes_path.display()
        )));
    }
    if !config.edges_path.exists() {
        return Err(Error::InvalidData(format!(
            "Edge file not found: {}",
            config.edges_path.display()
        )));
    }
    Ok(())
}

// Cheap load-time check for ingestion bugs the graph itself tolerates until
// a route crosses them.
fn first_dangling_endpoint(graph: &RoadGraph) -> Option<NodeId> {
    graph.edges().find_map(|(u, v, _)| {
        if graph.node(u).is_none() {
            Some(u)
        } else if graph.node(v).is_none() {
            Some(v)
        } else {
            None
        }
    })
}
