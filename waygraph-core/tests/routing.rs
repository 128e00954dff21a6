//! End-to-end tests: CSV ingestion, routing, snapshot reuse.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use geo::Point;
use waygraph_core::model::NearestNodeAlgorithm;
use waygraph_core::prelude::*;

const NODES_CSV: &str = "\
id,lat,lon
1,0.0,0.0
2,0.01,0.0
3,0.02,0.0
4,0.01,0.01
";

// Fourth row has a non-positive length and must be skipped by the builder;
// empty speed fields mean "unknown limit".
const EDGES_CSV: &str = "\
from_id,to_id,length_m,max_speed_kmh
1,2,100.0,
2,3,100.0,30
1,4,50.0,
4,3,50.0,
2,4,-25.0,
";

struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    fn new(tag: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("waygraph-{tag}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("nodes.csv"), NODES_CSV).unwrap();
        fs::write(dir.join("edges.csv"), EDGES_CSV).unwrap();
        Self { dir }
    }

    fn config(&self, cache: bool, snap_algorithm: NearestNodeAlgorithm) -> RoadModelConfig {
        RoadModelConfig {
            nodes_path: self.dir.join("nodes.csv"),
            edges_path: self.dir.join("edges.csv"),
            cache_path: cache.then(|| self.dir.join("graph.snapshot.json")),
            default_speed_kmh: DEFAULT_SPEED_KMH,
            snap_algorithm,
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.dir).ok();
    }
}

#[test]
fn builds_graph_from_csv_and_routes() {
    let workspace = Workspace::new("build");
    let graph = create_road_graph(&workspace.config(false, NearestNodeAlgorithm::Linear)).unwrap();

    assert_eq!(graph.num_nodes(), 4);
    // The negative-length row was dropped
    assert_eq!(graph.num_edges(), 4);

    let finder = PathFinder::new(Arc::new(graph));
    let routed = finder
        .shortest_path(Point::new(0.0, 0.0), Point::new(0.0, 0.02), CostModel::Distance)
        .unwrap();
    assert_eq!(routed.cost, 100.0);
    assert_eq!(routed.points.len(), 3);
}

#[test]
fn snapshot_reload_answers_identically() {
    let workspace = Workspace::new("cache");
    let config = workspace.config(true, NearestNodeAlgorithm::Linear);

    let first = create_road_graph(&config).unwrap();
    let cache_path = config.cache_path.clone().unwrap();
    assert!(cache_path.exists());

    // Remove the sources: the second build can only come from the snapshot
    fs::remove_file(&config.nodes_path).unwrap();
    fs::remove_file(&config.edges_path).unwrap();
    let second = create_road_graph(&config).unwrap();

    let origin = Point::new(0.0, 0.0);
    let destination = Point::new(0.0, 0.02);
    for model in [CostModel::Distance, CostModel::Time] {
        let a = PathFinder::new(Arc::new(first.clone()))
            .shortest_path(origin, destination, model)
            .unwrap();
        let b = PathFinder::new(Arc::new(second.clone()))
            .shortest_path(origin, destination, model)
            .unwrap();
        assert_eq!(a.points, b.points);
        assert_eq!(a.cost, b.cost);
    }
}

#[test]
fn rtree_snapping_is_built_when_configured() {
    let workspace = Workspace::new("rtree");
    let graph = create_road_graph(&workspace.config(false, NearestNodeAlgorithm::RTree)).unwrap();
    assert!(graph.has_spatial_index());

    let finder = PathFinder::with_algorithm(Arc::new(graph), NearestNodeAlgorithm::RTree);
    let routed = finder
        .shortest_path(Point::new(0.0, 0.0), Point::new(0.0, 0.02), CostModel::Distance)
        .unwrap();
    assert_eq!(routed.cost, 100.0);
}

#[test]
fn missing_source_files_are_reported() {
    let config = RoadModelConfig {
        nodes_path: PathBuf::from("/nonexistent/nodes.csv"),
        edges_path: PathBuf::from("/nonexistent/edges.csv"),
        cache_path: None,
        default_speed_kmh: DEFAULT_SPEED_KMH,
        snap_algorithm: NearestNodeAlgorithm::Linear,
    };
    let err = create_road_graph(&config).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
}
