// ABOUTME: Request and response types for authentication routes
// ABOUTME: Defines DTOs for registration, login, Google Sign-In, and session lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog

//! Authentication request and response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::User;

/// User registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// User's email address
    pub email: String,
    /// User's password (will be hashed)
    pub password: String,
    /// Display name for the user
    pub name: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// User's email address
    pub email: String,
    /// User's password
    pub password: String,
}

/// Google Sign-In request carrying a Google ID token
#[derive(Debug, Deserialize)]
pub struct GoogleLoginRequest {
    /// ID token obtained from the client-side Google SDK
    pub token: String,
}

/// User info returned by auth endpoints
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    /// Unique identifier for the user
    pub user_id: String,
    /// User's email address
    pub email: String,
    /// User's display name
    pub name: String,
    /// Avatar image URL if set
    pub avatar_url: Option<String>,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.to_string(),
            email: user.email.clone(),
            name: user.display_name.clone(),
            avatar_url: user.avatar_url.clone(),
            created_at: user.created_at,
        }
    }
}

/// Response for successful registration and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Authenticated user information
    pub user: UserInfo,
    /// Opaque session token to present on subsequent requests
    pub session_token: String,
}
