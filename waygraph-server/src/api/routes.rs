//! Routing endpoints: shortest path.

use axum::Json;
use axum::extract::State;

use crate::api::ApiError;
use crate::schemas::{ShortestRequest, ShortestResponse};
use crate::state::AppState;

/// Shortest path between two points, by distance or travel time.
pub async fn route_shortest(
    State(state): State<AppState>,
    Json(req): Json<ShortestRequest>,
) -> Result<Json<ShortestResponse>, ApiError> {
    req.origin.validate().map_err(ApiError::bad_request)?;
    req.destination.validate().map_err(ApiError::bad_request)?;

    let model = req.cost_model();
    let routed = state
        .pathfinder()
        .shortest_path(req.origin.into(), req.destination.into(), model)?;

    if routed.is_unreachable() {
        return Err(ApiError::not_found("No route found"));
    }

    let path = routed.points.into_iter().map(Into::into).collect();
    Ok(Json(ShortestResponse {
        path,
        cost: routed.cost,
        model,
    }))
}
