// ABOUTME: Health check and liveness route handlers
// ABOUTME: Exposes the root liveness banner and a database-aware health endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog

//! Health check routes.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::server::ServerResources;

/// Axum route handlers for health endpoints
pub struct HealthRoutes;

impl HealthRoutes {
    /// Build the health router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_root))
            .route("/health", get(Self::handle_health))
            .with_state(resources)
    }

    /// Liveness banner kept for the original clients
    async fn handle_root() -> Json<Value> {
        Json(json!({ "message": "Ironlog API is running" }))
    }

    /// Health status including a database round-trip
    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        let database_ok = sqlx::query("SELECT 1")
            .fetch_one(resources.database.pool())
            .await
            .is_ok();

        Json(json!({
            "status": if database_ok { "ok" } else { "degraded" },
            "database": database_ok,
            "version": env!("CARGO_PKG_VERSION"),
        }))
    }
}
