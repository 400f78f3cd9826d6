// ABOUTME: Google ID-token verification via the tokeninfo introspection endpoint
// ABOUTME: Distinguishes invalid-token failures from provider transport failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog

//! Google ID-token verification.
//!
//! The verifier issues an outbound GET to Google's tokeninfo endpoint with the
//! ID token as a query parameter. A non-200 response or a body missing the
//! subject id / email is an authentication failure (401); a transport failure
//! is an upstream error (500). The outbound call carries a request timeout so
//! an unresponsive provider cannot hang a login indefinitely.
//!
//! A development bypass accepts a fixed literal and returns a fixed identity.
//! It is gated behind `GOOGLE_AUTH_DEV_BYPASS` and off by default.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::GoogleAuthConfig;
use crate::constants::google;
use crate::errors::{AppError, AppResult};

/// Identity extracted from a verified Google ID token
#[derive(Debug, Clone)]
pub struct GoogleIdentity {
    /// Google subject id (stable per account)
    pub subject_id: String,
    /// Account email
    pub email: String,
    /// Display name, if the token carried one
    pub name: Option<String>,
    /// Profile picture URL, if the token carried one
    pub picture: Option<String>,
}

/// Relevant fields of the tokeninfo response body
#[derive(Debug, Deserialize)]
struct TokenInfoResponse {
    sub: Option<String>,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

/// Google ID-token verifier
pub struct GoogleAuth {
    config: GoogleAuthConfig,
    http_client: Client,
}

impl GoogleAuth {
    /// Create a new verifier
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: GoogleAuthConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.verify_timeout_secs))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Verify a Google ID token and extract the caller's identity
    ///
    /// # Errors
    /// Returns an auth error for an invalid or rejected token, and an
    /// external-service error if the provider could not be reached
    pub async fn verify(&self, token: &str) -> AppResult<GoogleIdentity> {
        if self.config.allow_dev_bypass && token == google::DEV_BYPASS_TOKEN {
            warn!("Google auth dev bypass used");
            return Ok(GoogleIdentity {
                subject_id: google::DEV_BYPASS_SUBJECT.to_owned(),
                email: google::DEV_BYPASS_EMAIL.to_owned(),
                name: Some(google::DEV_BYPASS_NAME.to_owned()),
                picture: None,
            });
        }

        let response = self
            .http_client
            .get(&self.config.tokeninfo_url)
            .query(&[("id_token", token)])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Google tokeninfo request failed");
                AppError::external_service("google", format!("Failed to verify token: {e}"))
            })?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "Google rejected ID token");
            return Err(AppError::auth_invalid("Invalid token"));
        }

        let token_info: TokenInfoResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse Google tokeninfo response");
            AppError::external_service("google", format!("Failed to verify token: {e}"))
        })?;

        let (Some(subject_id), Some(email)) = (token_info.sub, token_info.email) else {
            debug!("Google tokeninfo response missing sub or email");
            return Err(AppError::auth_invalid("Invalid token data"));
        };

        info!(subject_id = %subject_id, "Google ID token verified");

        Ok(GoogleIdentity {
            subject_id,
            email,
            name: token_info.name,
            picture: token_info.picture,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bypass_config(allow: bool) -> GoogleAuthConfig {
        GoogleAuthConfig {
            tokeninfo_url: google::DEFAULT_TOKENINFO_URL.to_owned(),
            verify_timeout_secs: 1,
            allow_dev_bypass: allow,
        }
    }

    #[tokio::test]
    async fn test_dev_bypass_returns_fixed_identity() {
        let auth = GoogleAuth::new(bypass_config(true)).unwrap();
        let identity = auth.verify(google::DEV_BYPASS_TOKEN).await.unwrap();
        assert_eq!(identity.subject_id, google::DEV_BYPASS_SUBJECT);
        assert_eq!(identity.email, google::DEV_BYPASS_EMAIL);
        assert_eq!(identity.name.as_deref(), Some(google::DEV_BYPASS_NAME));
    }

    #[tokio::test]
    async fn test_bypass_literal_rejected_when_flag_off() {
        // With the flag off the literal goes to the real endpoint and must
        // not resolve to the dev identity.
        let auth = GoogleAuth::new(bypass_config(false)).unwrap();
        let result = auth.verify(google::DEV_BYPASS_TOKEN).await;
        assert!(result.is_err());
    }
}
