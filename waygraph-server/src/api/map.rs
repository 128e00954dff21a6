//! Map data endpoints: bounding-box node listing.

use axum::Json;
use axum::extract::{Query, State};
use waygraph_core::model::BoundingBox;

use crate::schemas::{BoundsParams, MapNodesResponse, NodeEntry};
use crate::state::AppState;

/// Return nodes, optionally filtered by an inclusive bounding box.
pub async fn map_nodes(
    State(state): State<AppState>,
    Query(params): Query<BoundsParams>,
) -> Json<MapNodesResponse> {
    let bounds = BoundingBox {
        min_lat: params.min_lat,
        max_lat: params.max_lat,
        min_lon: params.min_lon,
        max_lon: params.max_lon,
    };
    let nodes = state
        .graph()
        .nodes_in_bounds(&bounds)
        .into_iter()
        .map(|node| NodeEntry {
            id: node.id,
            lat: node.lat(),
            lon: node.lon(),
        })
        .collect();
    Json(MapNodesResponse { nodes })
}
