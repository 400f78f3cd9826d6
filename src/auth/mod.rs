// ABOUTME: Authentication primitives: password hashing, session tokens, principal resolution
// ABOUTME: Encodes and decodes the two opaque session-token kinds and resolves them to users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog

//! Authentication and session management.
//!
//! Session tokens are opaque strings with no signature or expiry: validity is
//! structural prefix-match plus existence of the referenced user. Two kinds
//! exist — `sess_uid_<user-id>` for password accounts and
//! `session_<google-subject>` for Google accounts — unified here behind the
//! [`SessionPrincipal`] enum and [`SessionResolver`] so nothing else in the
//! crate branches on string prefixes.

/// Google ID-token verification client
pub mod google;

use std::sync::Arc;

use uuid::Uuid;

use crate::constants::{error_messages, session};
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::User;

/// Hash a password with a per-call random salt
///
/// # Errors
/// Returns an error if the underlying hash computation fails
pub fn hash_password(password: &str) -> AppResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

/// Verify a password against a stored hash
///
/// A malformed hash is treated as a non-match rather than an error, so a
/// corrupted record can never be logged into.
#[must_use]
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}

/// The authenticated identity embedded in a session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPrincipal {
    /// Password account, identified by internal user id
    Password {
        /// Internal user id
        user_id: Uuid,
    },
    /// Google account, identified by the provider's subject id
    External {
        /// Google subject id
        subject_id: String,
    },
}

impl SessionPrincipal {
    /// Encode this principal as a session token
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Password { user_id } => {
                format!("{}{user_id}", session::PASSWORD_TOKEN_PREFIX)
            }
            Self::External { subject_id } => {
                format!("{}{subject_id}", session::GOOGLE_TOKEN_PREFIX)
            }
        }
    }

    /// Decode a session token into a principal
    ///
    /// # Errors
    /// Returns an auth error if no recognized prefix matches, or if the
    /// password-kind id is not a structurally valid user id
    pub fn decode(token: &str) -> AppResult<Self> {
        if let Some(raw_id) = token.strip_prefix(session::PASSWORD_TOKEN_PREFIX) {
            let user_id = Uuid::parse_str(raw_id)
                .map_err(|_| AppError::auth_invalid(error_messages::INVALID_SESSION))?;
            return Ok(Self::Password { user_id });
        }
        if let Some(subject_id) = token.strip_prefix(session::GOOGLE_TOKEN_PREFIX) {
            if subject_id.is_empty() {
                return Err(AppError::auth_invalid(error_messages::INVALID_SESSION));
            }
            return Ok(Self::External {
                subject_id: subject_id.to_owned(),
            });
        }
        Err(AppError::auth_invalid(error_messages::INVALID_SESSION))
    }

    /// The owner-id string stored verbatim on records this principal creates
    #[must_use]
    pub fn owner_id(&self) -> String {
        match self {
            Self::Password { user_id } => user_id.to_string(),
            Self::External { subject_id } => subject_id.clone(),
        }
    }
}

/// Resolves session tokens to user accounts
///
/// The resolver is the only component that turns an opaque token into a
/// [`User`]: it decodes the principal and checks the referenced account still
/// exists. Handlers never inspect token prefixes themselves.
#[derive(Clone)]
pub struct SessionResolver {
    database: Arc<Database>,
}

impl SessionResolver {
    /// Create a new resolver over the given database
    #[must_use]
    pub const fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Resolve a session token to the user it references
    ///
    /// # Errors
    /// Returns an auth error if the token is malformed or the referenced
    /// user does not exist; a database error if the lookup itself fails
    pub async fn resolve(&self, token: &str) -> AppResult<(SessionPrincipal, User)> {
        let principal = SessionPrincipal::decode(token)?;

        let user = match &principal {
            SessionPrincipal::Password { user_id } => {
                self.database.get_user_by_id(*user_id).await?
            }
            SessionPrincipal::External { subject_id } => {
                self.database.get_user_by_google_id(subject_id).await?
            }
        };

        let user =
            user.ok_or_else(|| AppError::auth_invalid(error_messages::INVALID_SESSION))?;

        Ok((principal, user))
    }
}

/// Extract a bearer token from an `Authorization` header value
///
/// # Errors
/// Returns an auth error if the header is not a `Bearer` scheme
pub fn extract_bearer_token(auth_header: &str) -> AppResult<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::auth_invalid("Invalid Authorization header format"))
}
