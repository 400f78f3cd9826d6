// ABOUTME: Ironlog server binary: config load, database connect, HTTP serve
// ABOUTME: Initializes tracing and runs the axum server until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog

//! Ironlog server binary.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ironlog_server::{
    auth::google::GoogleAuth,
    config::ServerConfig,
    database::Database,
    server::{HttpServer, ServerResources},
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().context("Failed to load configuration")?;
    info!(
        port = config.http_port,
        database_url = %config.database.url,
        "Starting Ironlog server"
    );

    let database = Database::new(&config.database.url)
        .await
        .context("Failed to initialize database")?;

    let google_auth =
        GoogleAuth::new(config.google_auth.clone()).context("Failed to initialize Google auth")?;

    let resources = Arc::new(ServerResources::new(database, google_auth, config));

    HttpServer::new(resources)
        .run()
        .await
        .context("HTTP server failed")?;

    Ok(())
}
