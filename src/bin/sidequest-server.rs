// ABOUTME: HTTP server binary for the Sidequest task, reward and recommendation API
// ABOUTME: Loads configuration, opens the database, wires live providers and serves axum routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

//! # Sidequest Server Binary
//!
//! Starts the REST API with `SQLite` storage and the live weather, traffic
//! and location-inference providers.

use anyhow::{Context, Result};
use clap::Parser;
use sidequest_server::{
    config::ServerConfig, database::Database, logging, resources::ServerResources,
    routes::app_router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "sidequest-server")]
#[command(about = "Sidequest API - tasks, rewards and condition-aware recommendations")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    info!("{}", config.summary());

    let database = Database::new(&config.database.url)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.url))?;
    info!("Database initialized: {}", config.database.url);

    let config = Arc::new(config);
    let resources = Arc::new(ServerResources::with_live_providers(
        Arc::new(database),
        config.clone(),
    ));

    let app = app_router(&resources)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    display_available_endpoints(config.http_port);
    info!("Server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}

/// Display all available API endpoints
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(port: u16) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    info!("=== Available API Endpoints ===");
    info!("   Health Check:      GET  http://{host}:{port}/health");
    info!("   Readiness:         GET  http://{host}:{port}/ready");
    info!("   Recommend:         GET  http://{host}:{port}/recommend/{{user_id}}");
    info!("   Tasks:             GET/POST http://{host}:{port}/tasks");
    info!("   Rewards:           GET/POST http://{host}:{port}/rewards");
    info!("   Users:             GET/POST http://{host}:{port}/users");
    info!("=== End of Endpoint List ===");
}
