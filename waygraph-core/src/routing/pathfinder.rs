//! PathFinder: geographic shortest-path queries on a road graph.

use std::sync::Arc;

use geo::{Coord, LineString, Point};
use geojson::{Feature, Geometry, JsonObject, Value as GeoJsonValue};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::model::{NearestNodeAlgorithm, RoadGraph};
use crate::{Error, NodeId};

use super::dijkstra::dijkstra_route;

/// Edge cost model used for routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostModel {
    /// Edge weight = segment length in meters.
    #[default]
    Distance,
    /// Edge weight = travel time in seconds derived from the speed limit.
    Time,
}

/// A routed path: one coordinate per node from origin snap to destination
/// snap, plus the accumulated cost (meters or seconds depending on the cost
/// model). An empty path with infinite cost means no route exists.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedPath {
    pub points: Vec<Point<f64>>,
    pub cost: f64,
}

impl RoutedPath {
    fn unreachable() -> Self {
        Self {
            points: Vec::new(),
            cost: f64::INFINITY,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        self.points.is_empty()
    }

    /// Export as a GeoJSON `Feature` with a `LineString` geometry and the
    /// total cost as a property. Meaningful only for reachable paths.
    pub fn to_geojson(&self) -> Feature {
        let line: LineString<f64> = self
            .points
            .iter()
            .map(|p| Coord { x: p.x(), y: p.y() })
            .collect();

        let mut properties = JsonObject::new();
        properties.insert("cost".to_string(), serde_json::json!(self.cost));

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(GeoJsonValue::from(&line))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// Snaps (lat, lon) pairs to nearest graph nodes and runs shortest-path
/// searches between them. Wraps a shared [`RoadGraph`]; cheap to share across
/// request handlers.
pub struct PathFinder {
    graph: Arc<RoadGraph>,
    algorithm: NearestNodeAlgorithm,
}

impl PathFinder {
    pub fn new(graph: Arc<RoadGraph>) -> Self {
        Self::with_algorithm(graph, NearestNodeAlgorithm::default())
    }

    /// PathFinder snapping through the given algorithm.
    pub fn with_algorithm(graph: Arc<RoadGraph>, algorithm: NearestNodeAlgorithm) -> Self {
        Self { graph, algorithm }
    }

    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    /// Shortest path between two geographic points.
    ///
    /// Origin and destination snap independently to their nearest graph
    /// nodes; when both snap to the same node the result is a single-point
    /// path with cost 0. A missing route is a normal outcome reported through
    /// [`RoutedPath::is_unreachable`], not an error.
    ///
    /// # Errors
    ///
    /// [`Error::IndexNotBuilt`] when the configured snap algorithm needs an
    /// index that was never built, and [`Error::MissingNode`] when the search
    /// traverses an edge whose target was never added as a node - both signal
    /// misconfiguration or corrupt ingestion, not a bad query.
    pub fn shortest_path(
        &self,
        origin: Point<f64>,
        destination: Point<f64>,
        model: CostModel,
    ) -> Result<RoutedPath, Error> {
        let graph = &*self.graph;
        let start = graph.nearest_node(origin.y(), origin.x(), self.algorithm)?;
        let goal = graph.nearest_node(destination.y(), destination.x(), self.algorithm)?;
        let (Some(start), Some(goal)) = (start, goal) else {
            return Ok(RoutedPath::unreachable());
        };

        if start == goal {
            return Ok(RoutedPath {
                points: vec![node_point(graph, start)?],
                cost: 0.0,
            });
        }

        let (ids, cost) = match model {
            CostModel::Distance => {
                dijkstra_route(graph, start, goal, |u, v| graph.edge_weight_distance(u, v))
            }
            CostModel::Time => {
                dijkstra_route(graph, start, goal, |u, v| graph.edge_weight_time(u, v))
            }
        };

        if ids.is_empty() {
            return Ok(RoutedPath::unreachable());
        }

        let mut points = Vec::with_capacity(ids.len());
        for id in ids {
            points.push(node_point(graph, id)?);
        }
        Ok(RoutedPath { points, cost })
    }

    /// Shortest paths from one origin to many destinations, evaluated in
    /// parallel. Result order matches `destinations`.
    pub fn shortest_path_one_to_many(
        &self,
        origin: Point<f64>,
        destinations: &[Point<f64>],
        model: CostModel,
    ) -> Result<Vec<RoutedPath>, Error> {
        destinations
            .par_iter()
            .map(|destination| self.shortest_path(origin, *destination, model))
            .collect()
    }
}

fn node_point(graph: &RoadGraph, id: NodeId) -> Result<Point<f64>, Error> {
    graph
        .node(id)
        .map(|node| node.geometry)
        .ok_or(Error::MissingNode(id))
}
