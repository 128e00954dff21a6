//! HTTP API: router assembly and the health endpoint.

mod error;
mod map;
mod routes;

pub use error::ApiError;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::schemas::HealthResponse;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/map/nodes", get(map::map_nodes))
        .route("/routes/shortest", post(routes::route_shortest))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        num_nodes: state.graph().num_nodes(),
        num_edges: state.graph().num_edges(),
    })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use waygraph_core::model::{NearestNodeAlgorithm, RoadGraph};

    use super::router;
    use crate::state::AppState;

    fn test_app() -> axum::Router {
        // 1 -> 2 -> 3 along the equator, plus a detached node 4
        let mut graph = RoadGraph::new();
        graph.add_node(1, 0.0, 0.0);
        graph.add_node(2, 0.01, 0.0);
        graph.add_node(3, 0.02, 0.0);
        graph.add_node(4, 5.0, 5.0);
        graph.add_edge(1, 2, 100.0, None);
        graph.add_edge(2, 3, 100.0, Some(30.0));
        router(AppState::from_graph(graph, NearestNodeAlgorithm::Linear))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_graph_size() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["num_nodes"], 4);
        assert_eq!(body["num_edges"], 2);
    }

    #[tokio::test]
    async fn map_nodes_filters_by_bounds() {
        let response = test_app()
            .oneshot(
                Request::get("/map/nodes?min_lat=0.005&max_lat=0.015")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let nodes = body["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0]["id"], 2);
    }

    #[tokio::test]
    async fn map_nodes_without_bounds_lists_everything() {
        let response = test_app()
            .oneshot(Request::get("/map/nodes").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["nodes"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn shortest_route_by_distance() {
        let request = post_json(
            "/routes/shortest",
            json!({
                "origin": {"lat": 0.0, "lon": 0.0},
                "destination": {"lat": 0.02, "lon": 0.0},
            }),
        );
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["cost"], 200.0);
        assert_eq!(body["model"], "distance");
        assert_eq!(body["path"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn shortest_route_by_time() {
        let request = post_json(
            "/routes/shortest",
            json!({
                "origin": {"lat": 0.0, "lon": 0.0},
                "destination": {"lat": 0.02, "lon": 0.0},
                "by_time": true,
            }),
        );
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["model"], "time");
        // 100 m at the 50 km/h default plus 100 m at 30 km/h
        let expected = 100.0 / (50.0 / 3.6) + 100.0 / (30.0 / 3.6);
        assert!((body["cost"].as_f64().unwrap() - expected).abs() < 1e-9);
    }

    #[tokio::test]
    async fn unreachable_route_is_404() {
        let request = post_json(
            "/routes/shortest",
            json!({
                "origin": {"lat": 0.0, "lon": 0.0},
                "destination": {"lat": 5.0, "lon": 5.0},
            }),
        );
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["detail"], "No route found");
    }

    #[tokio::test]
    async fn out_of_range_coordinates_are_rejected() {
        let request = post_json(
            "/routes/shortest",
            json!({
                "origin": {"lat": 95.0, "lon": 0.0},
                "destination": {"lat": 0.0, "lon": 0.0},
            }),
        );
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rtree_snap_without_index_is_503() {
        let mut graph = RoadGraph::new();
        graph.add_node(1, 0.0, 0.0);
        // Index deliberately not built
        let app = router(AppState::from_graph(graph, NearestNodeAlgorithm::RTree));

        let request = post_json(
            "/routes/shortest",
            json!({
                "origin": {"lat": 0.0, "lon": 0.0},
                "destination": {"lat": 0.0, "lon": 0.0},
            }),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
