// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database, resource, and HTTP request helpers for route testing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

//! Shared test utilities for `ironlog_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::sync::{Arc, Once};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde::Serialize;
use tower::ServiceExt;

use ironlog_server::{
    auth::google::GoogleAuth,
    config::{DatabaseConfig, GoogleAuthConfig, SecurityConfig, ServerConfig},
    constants::google,
    database::Database,
    server::{HttpServer, ServerResources},
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Arc<Database> {
    init_test_logging();
    Arc::new(
        Database::new("sqlite::memory:")
            .await
            .expect("Failed to create test database"),
    )
}

/// Server configuration with test defaults and the Google dev bypass enabled
pub fn test_server_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        host: "127.0.0.1".into(),
        database: DatabaseConfig {
            url: "sqlite::memory:".into(),
        },
        security: SecurityConfig {
            cors_origins: vec!["*".into()],
            request_timeout_secs: 5,
        },
        google_auth: test_google_config(),
    }
}

/// Google auth configuration pointing at the default endpoint with bypass on
pub fn test_google_config() -> GoogleAuthConfig {
    GoogleAuthConfig {
        tokeninfo_url: google::DEFAULT_TOKENINFO_URL.into(),
        verify_timeout_secs: 1,
        allow_dev_bypass: true,
    }
}

/// Full server resources over a fresh in-memory database
pub async fn create_test_resources() -> Arc<ServerResources> {
    init_test_logging();
    let config = test_server_config();
    let database = Database::new(&config.database.url)
        .await
        .expect("Failed to create test database");
    let google_auth =
        GoogleAuth::new(config.google_auth.clone()).expect("Failed to create Google auth");
    Arc::new(ServerResources::new(database, google_auth, config))
}

/// Complete router over fresh test resources
pub async fn create_test_app() -> Router {
    let resources = create_test_resources().await;
    HttpServer::router(&resources)
}

/// Helper to build and execute HTTP requests against axum routers
pub struct TestRequest {
    method: Method,
    uri: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl TestRequest {
    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    pub fn delete(uri: &str) -> Self {
        Self::new(Method::DELETE, uri)
    }

    fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_owned(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_owned(), value.to_owned()));
        self
    }

    /// Add a bearer session token
    pub fn bearer(self, token: &str) -> Self {
        let value = format!("Bearer {token}");
        self.header(header::AUTHORIZATION.as_str(), &value)
    }

    /// Add JSON body to the request
    pub fn json<T: Serialize>(mut self, data: &T) -> Self {
        self.body = Some(serde_json::to_string(data).expect("Failed to serialize JSON"));
        self.headers.push((
            header::CONTENT_TYPE.as_str().to_owned(),
            "application/json".to_owned(),
        ));
        self
    }

    /// Execute the request against an axum router
    pub async fn send(self, app: Router) -> TestResponse {
        let mut builder = Request::builder().method(self.method).uri(self.uri);

        for (key, value) in self.headers {
            builder = builder.header(key, value);
        }

        let body = self.body.unwrap_or_default();
        let request = builder
            .body(Body::from(body))
            .expect("Failed to build request");

        let response = app
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        TestResponse::from_response(response).await
    }
}

/// Wrapper around an axum HTTP response for assertions
pub struct TestResponse {
    pub status: StatusCode,
    body: Vec<u8>,
}

impl TestResponse {
    async fn from_response(response: axum::http::Response<Body>) -> Self {
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body")
            .to_vec();
        Self { status, body }
    }

    /// Parse the body as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Response body is not valid JSON")
    }
}
