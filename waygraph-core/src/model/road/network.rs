//! Directed weighted graph over geographic nodes, with nearest-node snapping.

use geo::Point;
use hashbrown::HashMap;
use rstar::{RTree, primitives::GeomWithData};
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_SPEED_KMH, Error, NodeId};

use super::components::{RoadEdge, RoadNode};

/// Entry of the spatial index: planar (lat, lon) tagged with the node id and
/// its insertion sequence, so ties resolve the same way the linear scan does.
pub type IndexedPoint = GeomWithData<[f64; 2], (NodeId, usize)>;

/// Nearest-node lookup strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NearestNodeAlgorithm {
    /// O(n) scan over all nodes. Exact, needs no preparation.
    #[default]
    Linear,
    /// R-tree lookup. Requires [`RoadGraph::build_spatial_index`] after loading.
    RTree,
}

/// Inclusive geographic bounds; a `None` side is unbounded. Plain interval
/// containment, no wrap around the antimeridian.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub min_lat: Option<f64>,
    pub max_lat: Option<f64>,
    pub min_lon: Option<f64>,
    pub max_lon: Option<f64>,
}

impl BoundingBox {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.min_lat.is_none_or(|b| lat >= b)
            && self.max_lat.is_none_or(|b| lat <= b)
            && self.min_lon.is_none_or(|b| lon >= b)
            && self.max_lon.is_none_or(|b| lon <= b)
    }
}

/// Directed weighted graph with geographic nodes.
///
/// Nodes are keyed by their external (OSM) id; adjacency is a per-node map of
/// out-neighbor id to edge, so re-inserting an edge overwrites it and parallel
/// edges cannot exist. Built once by [`crate::loading::create_road_graph`] and
/// queried read-only afterwards.
///
/// Two edge weight functions are exposed:
/// - [`edge_weight_distance`](Self::edge_weight_distance): length in meters
/// - [`edge_weight_time`](Self::edge_weight_time): travel time in seconds
#[derive(Debug, Clone)]
pub struct RoadGraph {
    nodes: HashMap<NodeId, RoadNode>,
    adjacency: HashMap<NodeId, HashMap<NodeId, RoadEdge>>,
    /// Node ids in first-insertion order; drives deterministic snapping.
    order: Vec<NodeId>,
    index: Option<RTree<IndexedPoint>>,
    default_speed_kmh: f64,
}

impl Default for RoadGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::with_default_speed(DEFAULT_SPEED_KMH)
    }

    /// Graph with a specific fallback speed for edges without a speed limit.
    pub fn with_default_speed(default_speed_kmh: f64) -> Self {
        Self {
            nodes: HashMap::new(),
            adjacency: HashMap::new(),
            order: Vec::new(),
            index: None,
            default_speed_kmh,
        }
    }

    pub fn default_speed_kmh(&self) -> f64 {
        self.default_speed_kmh
    }

    /// Insert or overwrite the node record for `id`. Overwriting keeps the
    /// original insertion position, so snapping stays deterministic and no
    /// stale coordinate is left behind.
    ///
    /// Any previously built spatial index is dropped.
    pub fn add_node(&mut self, id: NodeId, lat: f64, lon: f64) {
        if !self.nodes.contains_key(&id) {
            self.order.push(id);
        }
        self.nodes.insert(
            id,
            RoadNode {
                id,
                geometry: Point::new(lon, lat),
            },
        );
        self.index = None;
    }

    /// Insert or overwrite the directed edge `u -> v` (last write wins).
    /// Self-loops are dropped. Endpoints are not checked for existence: an
    /// edge may be inserted before its nodes, and weight lookups against
    /// missing endpoints behave as "no edge".
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, length_m: f64, max_speed_kmh: Option<f64>) {
        if u == v {
            return;
        }
        self.adjacency.entry(u).or_default().insert(
            v,
            RoadEdge {
                length_m,
                max_speed_kmh,
            },
        );
    }

    pub fn node(&self, id: NodeId) -> Option<&RoadNode> {
        self.nodes.get(&id)
    }

    /// Out-neighbors of `id` with their edges; empty when `id` has no
    /// outgoing edges or is unknown.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &RoadEdge)> {
        self.adjacency
            .get(&id)
            .into_iter()
            .flat_map(|adj| adj.iter().map(|(&to, edge)| (to, edge)))
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &RoadNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// All directed edges as `(from, to, edge)`, in unspecified order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, &RoadEdge)> {
        self.adjacency
            .iter()
            .flat_map(|(&u, adj)| adj.iter().map(move |(&v, edge)| (u, v, edge)))
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.adjacency.values().map(HashMap::len).sum()
    }

    /// Nodes whose coordinates fall within the (inclusive) bounds, in
    /// insertion order.
    pub fn nodes_in_bounds(&self, bounds: &BoundingBox) -> Vec<&RoadNode> {
        self.nodes()
            .filter(|node| bounds.contains(node.lat(), node.lon()))
            .collect()
    }

    /// Build the R-tree backing [`NearestNodeAlgorithm::RTree`]. Call after
    /// batch loading; node mutations drop the index again.
    pub fn build_spatial_index(&mut self) {
        let points: Vec<IndexedPoint> = self
            .nodes()
            .enumerate()
            .map(|(seq, node)| IndexedPoint::new([node.lat(), node.lon()], (node.id, seq)))
            .collect();
        self.index = Some(RTree::bulk_load(points));
    }

    pub fn has_spatial_index(&self) -> bool {
        self.index.is_some()
    }

    /// Id of the node closest to `(lat, lon)` by squared planar distance, a
    /// flat-plane approximation valid for small areas. Ties go to the node
    /// inserted first, whichever algorithm runs.
    ///
    /// Returns `Ok(None)` only when the graph has no nodes.
    ///
    /// # Errors
    ///
    /// [`Error::IndexNotBuilt`] when the R-tree algorithm is selected but
    /// [`build_spatial_index`](Self::build_spatial_index) has not been called
    /// since the last node mutation.
    pub fn nearest_node(
        &self,
        lat: f64,
        lon: f64,
        algorithm: NearestNodeAlgorithm,
    ) -> Result<Option<NodeId>, Error> {
        if self.nodes.is_empty() {
            return Ok(None);
        }

        match algorithm {
            NearestNodeAlgorithm::Linear => Ok(self.nearest_linear(lat, lon)),
            NearestNodeAlgorithm::RTree => {
                let tree = self.index.as_ref().ok_or(Error::IndexNotBuilt)?;
                Ok(Self::nearest_indexed(tree, lat, lon))
            }
        }
    }

    /// O(n) brute-force scan. Fine for small graphs.
    fn nearest_linear(&self, lat: f64, lon: f64) -> Option<NodeId> {
        let mut best: Option<(f64, NodeId)> = None;
        for node in self.nodes() {
            let d2 = (lat - node.lat()).powi(2) + (lon - node.lon()).powi(2);
            if best.is_none_or(|(best_d2, _)| d2 < best_d2) {
                best = Some((d2, node.id));
            }
        }
        best.map(|(_, id)| id)
    }

    fn nearest_indexed(tree: &RTree<IndexedPoint>, lat: f64, lon: f64) -> Option<NodeId> {
        let mut candidates = tree.nearest_neighbor_iter_with_distance_2(&[lat, lon]);
        let (first, best_d2) = candidates.next()?;

        // Walk equidistant candidates so ties resolve to the earliest insertion,
        // matching the linear scan exactly.
        let mut best = first.data;
        for (candidate, d2) in candidates {
            if d2 > best_d2 {
                break;
            }
            if candidate.data.1 < best.1 {
                best = candidate.data;
            }
        }
        Some(best.0)
    }

    fn edge(&self, u: NodeId, v: NodeId) -> Option<&RoadEdge> {
        self.adjacency.get(&u).and_then(|adj| adj.get(&v))
    }

    /// Edge weight = length in meters, or infinity when `u -> v` does not exist.
    pub fn edge_weight_distance(&self, u: NodeId, v: NodeId) -> f64 {
        self.edge(u, v).map_or(f64::INFINITY, |edge| edge.length_m)
    }

    /// Edge weight = travel time in seconds (length / speed), or infinity when
    /// `u -> v` does not exist. Edges without a speed limit, or with a
    /// non-positive one, fall back to the graph's default speed.
    pub fn edge_weight_time(&self, u: NodeId, v: NodeId) -> f64 {
        let Some(edge) = self.edge(u, v) else {
            return f64::INFINITY;
        };
        let mut speed_kmh = edge.max_speed_kmh.unwrap_or(self.default_speed_kmh);
        if speed_kmh <= 0.0 {
            speed_kmh = self.default_speed_kmh;
        }
        let speed_ms = speed_kmh * 1000.0 / 3600.0;
        if speed_ms > 0.0 {
            edge.length_m / speed_ms
        } else {
            f64::INFINITY
        }
    }
}
