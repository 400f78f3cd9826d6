// ABOUTME: Authentication route handlers for registration, login, and Google Sign-In
// ABOUTME: Thin axum handlers delegating to AuthService for the actual account logic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog

//! Authentication routes for user management.
//!
//! Handles email+password registration and login, Google ID-token login, and
//! session lookup (`/me`). Handlers are thin wrappers that delegate business
//! logic to [`AuthService`].
//!
//! ## Module Structure
//! - `types` - Request/response DTOs for auth endpoints

mod types;

pub use types::{AuthResponse, GoogleLoginRequest, LoginRequest, RegisterRequest, UserInfo};

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use tokio::task;
use tracing::{debug, info, warn};

use crate::{
    auth::{self, google::GoogleAuth, SessionPrincipal, SessionResolver},
    constants::error_messages,
    database::Database,
    errors::{AppError, AppResult},
    models::User,
    routes::{extract_session_token, SessionTokenQuery},
    server::ServerResources,
};

/// Authentication service for business logic
#[derive(Clone)]
pub struct AuthService {
    database: Arc<Database>,
    google_auth: Arc<GoogleAuth>,
    resolver: SessionResolver,
}

impl AuthService {
    /// Creates a new authentication service
    #[must_use]
    pub fn new(database: Arc<Database>, google_auth: Arc<GoogleAuth>) -> Self {
        let resolver = SessionResolver::new(database.clone());
        Self {
            database,
            google_auth,
            resolver,
        }
    }

    /// Handle user registration
    ///
    /// # Errors
    /// Returns an error if the email is taken or a collaborator fails
    #[tracing::instrument(skip(self, request), fields(route = "register"))]
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        info!("User registration attempt");

        if !Self::is_valid_email(&request.email) {
            return Err(AppError::invalid_input(error_messages::INVALID_EMAIL_FORMAT));
        }

        // Friendly pre-check; the store's UNIQUE constraint still catches races
        if self
            .database
            .get_user_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(AppError::already_exists(error_messages::USER_ALREADY_EXISTS));
        }

        let password_hash = auth::hash_password(&request.password)?;
        let user = User::new(request.email, password_hash, request.name);

        let user_id = self.database.create_user(&user).await?;

        info!(user_id = %user_id, "User registered successfully");

        let session_token = SessionPrincipal::Password { user_id }.encode();
        Ok(AuthResponse {
            user: UserInfo::from(&user),
            session_token,
        })
    }

    /// Handle email+password login
    ///
    /// # Errors
    /// Returns an auth error on unknown email or password mismatch
    #[tracing::instrument(skip(self, request), fields(route = "login"))]
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        debug!("User login attempt");

        let user = self
            .database
            .get_user_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                debug!("Login failed: no user for email");
                AppError::auth_invalid(error_messages::INVALID_CREDENTIALS)
            })?;

        // Google-only accounts carry no password hash and cannot log in here
        let password_hash = user.password_hash.clone().ok_or_else(|| {
            debug!(user_id = %user.id, "Login failed: account has no password");
            AppError::auth_invalid(error_messages::INVALID_CREDENTIALS)
        })?;

        // Verify password on the blocking pool; bcrypt is CPU-bound
        let password = request.password;
        let is_valid = task::spawn_blocking(move || auth::verify_password(&password, &password_hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?;

        if !is_valid {
            warn!(user_id = %user.id, "Invalid password for login attempt");
            return Err(AppError::auth_invalid(error_messages::INVALID_CREDENTIALS));
        }

        info!(user_id = %user.id, "User logged in successfully");

        let session_token = SessionPrincipal::Password { user_id: user.id }.encode();
        Ok(AuthResponse {
            user: UserInfo::from(&user),
            session_token,
        })
    }

    /// Handle Google Sign-In with an ID token
    ///
    /// Verifies the token with Google, then finds or creates the matching
    /// user. Repeated logins with the same Google account resolve to the
    /// same user record.
    ///
    /// # Errors
    /// Returns an auth error for an invalid token, an external-service error
    /// if Google is unreachable, and a database error on store failures
    #[tracing::instrument(skip(self, request), fields(route = "google_login"))]
    pub async fn login_with_google(&self, request: GoogleLoginRequest) -> AppResult<AuthResponse> {
        info!("Google login attempt");

        let identity = self.google_auth.verify(&request.token).await?;

        let user = match self
            .database
            .get_user_by_google_id(&identity.subject_id)
            .await?
        {
            Some(user) => user,
            None => {
                let display_name = identity.name.unwrap_or_else(|| {
                    identity
                        .email
                        .split('@')
                        .next()
                        .unwrap_or("user")
                        .to_owned()
                });
                let user = User::new_google(
                    identity.subject_id.clone(),
                    identity.email,
                    display_name,
                    identity.picture,
                );
                self.database.create_user(&user).await?;
                info!(user_id = %user.id, "Created user from Google identity");
                user
            }
        };

        let session_token = SessionPrincipal::External {
            subject_id: identity.subject_id,
        }
        .encode();

        Ok(AuthResponse {
            user: UserInfo::from(&user),
            session_token,
        })
    }

    /// Resolve a session token to the current user
    ///
    /// # Errors
    /// Returns an auth error if the token is invalid or the user is gone
    pub async fn current_user(&self, token: &str) -> AppResult<UserInfo> {
        let (_principal, user) = self.resolver.resolve(token).await?;
        Ok(UserInfo::from(&user))
    }

    /// Minimal structural email check
    fn is_valid_email(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
    }
}

/// Axum route handlers for authentication endpoints
pub struct AuthRoutes;

impl AuthRoutes {
    /// Build the auth router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/register", post(Self::handle_register))
            .route("/auth/login", post(Self::handle_login))
            .route("/auth/google", post(Self::handle_google_login))
            .route("/me", get(Self::handle_me))
            .with_state(resources)
    }

    /// Handle user registration
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> AppResult<Json<AuthResponse>> {
        let service = AuthService::new(resources.database.clone(), resources.google_auth.clone());
        let response = service.register(request).await?;
        Ok(Json(response))
    }

    /// Handle email+password login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> AppResult<Json<AuthResponse>> {
        let service = AuthService::new(resources.database.clone(), resources.google_auth.clone());
        let response = service.login(request).await?;
        Ok(Json(response))
    }

    /// Handle Google Sign-In
    async fn handle_google_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<GoogleLoginRequest>,
    ) -> AppResult<Json<AuthResponse>> {
        let service = AuthService::new(resources.database.clone(), resources.google_auth.clone());
        let response = service.login_with_google(request).await?;
        Ok(Json(response))
    }

    /// Handle session lookup for the current user
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<SessionTokenQuery>,
    ) -> AppResult<Json<UserInfo>> {
        let token = extract_session_token(&headers, &query)?;
        let service = AuthService::new(resources.database.clone(), resources.google_auth.clone());
        let user = service.current_user(&token).await?;
        Ok(Json(user))
    }
}
