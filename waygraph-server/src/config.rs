//! Server configuration, read from a TOML file.

use std::net::SocketAddr;
use std::path::Path;

use axum::http::{HeaderValue, Method, header};
use serde::Deserialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use waygraph_core::loading::RoadModelConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to serve on; overridable with `--listen`.
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// Browser origins allowed to call the API. Empty disables CORS.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Road graph data sources, passed through to the loader.
    pub data: RoadModelConfig,
}

impl ServerConfig {
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn cors_layer(&self) -> Result<CorsLayer, Box<dyn std::error::Error>> {
        if self.cors_origins.is_empty() {
            return Ok(CorsLayer::new());
        }
        let origins = self
            .cors_origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true))
    }
}

fn default_listen() -> SocketAddr {
    ([127, 0, 0, 1], 8000).into()
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let config: ServerConfig = toml::from_str(
            r#"
            [data]
            nodes_path = "data/nodes.csv"
            edges_path = "data/edges.csv"
            "#,
        )
        .unwrap();
        assert_eq!(config.listen, default_listen());
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.data.default_speed_kmh, 50.0);
    }

    #[test]
    fn parses_full_config() {
        let config: ServerConfig = toml::from_str(
            r#"
            listen = "0.0.0.0:9090"
            cors_origins = ["http://localhost:3000"]
            request_timeout_secs = 5

            [data]
            nodes_path = "nodes.csv"
            edges_path = "edges.csv"
            cache_path = "graph.snapshot.json"
            default_speed_kmh = 60.0
            snap_algorithm = "r_tree"
            "#,
        )
        .unwrap();
        assert_eq!(config.listen.port(), 9090);
        assert_eq!(config.data.default_speed_kmh, 60.0);
        assert!(config.cors_layer().is_ok());
    }
}
