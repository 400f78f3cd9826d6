// ABOUTME: Route module organization for Ironlog HTTP endpoints
// ABOUTME: Groups routes by domain and hosts the shared session-token extractor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog

//! Route modules for the Ironlog server.
//!
//! Each domain module contains route definitions and thin handler functions
//! that delegate to service layers. The shared session-token extractor lives
//! here: tokens arrive either as an `Authorization: Bearer` header (preferred)
//! or as a `?session_token=` query parameter kept for compatibility with the
//! original clients; the header wins when both are present.

/// Health check and liveness routes
pub mod health;

/// Authentication and session routes
pub mod auth;

/// Workout CRUD routes
pub mod workouts;

pub use auth::{AuthResponse, AuthRoutes, AuthService, UserInfo};
pub use health::HealthRoutes;
pub use workouts::{WorkoutRoutes, WorkoutService};

use axum::http::{header, HeaderMap};
use serde::Deserialize;

use crate::auth::extract_bearer_token;
use crate::errors::{AppError, AppResult};

/// Query-parameter carrier for the legacy session-token transport
#[derive(Debug, Default, Deserialize)]
pub struct SessionTokenQuery {
    /// Opaque session token
    pub session_token: Option<String>,
}

/// Extract the session token from a request
///
/// # Errors
/// Returns an auth error if neither transport carries a token
pub fn extract_session_token(
    headers: &HeaderMap,
    query: &SessionTokenQuery,
) -> AppResult<String> {
    if let Some(auth_header) = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        return extract_bearer_token(auth_header).map(ToOwned::to_owned);
    }

    query
        .session_token
        .clone()
        .filter(|t| !t.is_empty())
        .ok_or_else(AppError::auth_required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_header_wins_over_query() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer sess_uid_from-header"),
        );
        let query = SessionTokenQuery {
            session_token: Some("sess_uid_from-query".into()),
        };
        assert_eq!(
            extract_session_token(&headers, &query).unwrap(),
            "sess_uid_from-header"
        );
    }

    #[test]
    fn test_query_fallback() {
        let headers = HeaderMap::new();
        let query = SessionTokenQuery {
            session_token: Some("session_12345".into()),
        };
        assert_eq!(
            extract_session_token(&headers, &query).unwrap(),
            "session_12345"
        );
    }

    #[test]
    fn test_missing_token_is_auth_error() {
        let headers = HeaderMap::new();
        let query = SessionTokenQuery::default();
        let err = extract_session_token(&headers, &query).unwrap_err();
        assert_eq!(err.http_status(), axum::http::StatusCode::UNAUTHORIZED);
    }
}
