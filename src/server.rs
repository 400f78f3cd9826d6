// ABOUTME: HTTP server orchestration: shared resources, router assembly, middleware stack
// ABOUTME: Binds the listener and serves the merged domain routers under tracing, timeout, and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog

//! HTTP server orchestration.
//!
//! [`ServerResources`] bundles the shared dependencies (database pool, Google
//! verifier, config) handed to every route module. [`HttpServer`] assembles
//! the axum router, applies the middleware stack, and runs the listener.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, warn, Level};

use crate::auth::google::GoogleAuth;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::routes::{AuthRoutes, HealthRoutes, WorkoutRoutes};

/// Shared dependencies injected into every route module
pub struct ServerResources {
    /// Data store adapter
    pub database: Arc<Database>,
    /// Google ID-token verifier
    pub google_auth: Arc<GoogleAuth>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Bundle shared resources for route modules
    #[must_use]
    pub fn new(database: Database, google_auth: GoogleAuth, config: ServerConfig) -> Self {
        Self {
            database: Arc::new(database),
            google_auth: Arc::new(google_auth),
            config: Arc::new(config),
        }
    }
}

/// The Ironlog HTTP server
pub struct HttpServer {
    resources: Arc<ServerResources>,
}

impl HttpServer {
    /// Create a new server over the given resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the complete router with all route modules and middleware
    #[must_use]
    pub fn router(resources: &Arc<ServerResources>) -> Router {
        let app = Router::new()
            .merge(HealthRoutes::routes(resources.clone()))
            .merge(AuthRoutes::routes(resources.clone()))
            .merge(WorkoutRoutes::routes(resources.clone()));

        // Middleware layers (applied bottom-up)
        app.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(
            resources.config.security.request_timeout_secs,
        )))
        .layer(Self::cors_layer(&resources.config))
    }

    /// Build the CORS layer from the configured origin allow-list
    ///
    /// A wildcard entry allows any origin without credentials; an explicit
    /// list allows credentials for exactly those origins.
    fn cors_layer(config: &ServerConfig) -> CorsLayer {
        let origins = &config.security.cors_origins;

        if origins.iter().any(|o| o == "*") {
            return CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
        }

        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| {
                origin.parse::<HeaderValue>().map_or_else(
                    |_| {
                        warn!(origin = %origin, "Ignoring unparseable CORS origin");
                        None
                    },
                    Some,
                )
            })
            .collect();

        CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
    }

    /// Run the HTTP server until shutdown
    ///
    /// # Errors
    /// Returns an error if binding or serving fails
    pub async fn run(&self) -> AppResult<()> {
        let app = Self::router(&self.resources);

        let host = &self.resources.config.host;
        let port = self.resources.config.http_port;
        let addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], port)));

        info!("HTTP server listening on http://{}", addr);

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Transport error: {e}")))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| AppError::internal(format!("Transport error: {e}")))?;

        Ok(())
    }
}
