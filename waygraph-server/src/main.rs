//! waygraph HTTP service: startup wiring.
//!
//! Loads the road graph once, then serves bounding-box node listings and
//! shortest-path queries over it.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::{BoxError, Router};
use clap::Parser;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod schemas;
mod state;

use config::ServerConfig;
use state::AppState;

#[derive(Debug, Parser)]
#[command(name = "waygraph-server", about = "Road-network shortest-path service")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "waygraph.toml")]
    config: PathBuf,
    /// Override the configured listen address
    #[arg(short, long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = ServerConfig::load(&args.config)?;
    let listen = args.listen.unwrap_or(config.listen);
    tracing::info!(path = %args.config.display(), "configuration loaded");

    let state = AppState::build(&config.data)?;
    let app = build_app(state, &config)?;

    let listener = tokio::net::TcpListener::bind(listen).await?;
    tracing::info!(%listen, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn build_app(state: AppState, config: &ServerConfig) -> Result<Router, Box<dyn std::error::Error>> {
    Ok(api::router(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(Duration::from_secs(config.request_timeout_secs)),
        )
        .layer(config.cors_layer()?)
        .layer(TraceLayer::new_for_http()))
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("unhandled error: {err}"),
        )
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("failed to install shutdown signal handler");
        return std::future::pending().await;
    }
    tracing::info!("shutdown signal received");
}
