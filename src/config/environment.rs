// ABOUTME: Environment-driven server configuration with sensible defaults
// ABOUTME: Loads database URL, listen address, CORS origins, and Google auth settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog

//! Server configuration loaded from environment variables.
//!
//! Configuration is environment-only: a `.env` file is honored in development,
//! but nothing is read from config files. Every knob has a default that works
//! for local development against a SQLite file database.

use std::env;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::{google, limits};

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Host interface to bind (defaults to localhost)
    pub host: String,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Google Sign-In configuration
    pub google_auth: GoogleAuthConfig,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL (SQLite)
    pub url: String,
}

/// Security-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// CORS allowed origins ("*" means any origin)
    pub cors_origins: Vec<String>,
    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Google ID-token verification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleAuthConfig {
    /// Token introspection endpoint
    pub tokeninfo_url: String,
    /// Timeout for the outbound introspection call, in seconds
    pub verify_timeout_secs: u64,
    /// Accept the development bypass literal instead of a real ID token.
    /// Must never be enabled in production deployments.
    pub allow_dev_bypass: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is present but unparseable
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let config = Self {
            http_port: env_var_or("HTTP_PORT", &limits::DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            host: env_var_or("HOST", "127.0.0.1"),
            database: DatabaseConfig {
                url: env_var_or("DATABASE_URL", "sqlite:./ironlog.db"),
            },
            security: SecurityConfig {
                cors_origins: parse_origins(&env_var_or("CORS_ORIGINS", "*")),
                request_timeout_secs: env_var_or(
                    "REQUEST_TIMEOUT_SECS",
                    &limits::DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid REQUEST_TIMEOUT_SECS value")?,
            },
            google_auth: GoogleAuthConfig {
                tokeninfo_url: env_var_or("GOOGLE_TOKENINFO_URL", google::DEFAULT_TOKENINFO_URL),
                verify_timeout_secs: env_var_or(
                    "GOOGLE_VERIFY_TIMEOUT_SECS",
                    &limits::DEFAULT_GOOGLE_VERIFY_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid GOOGLE_VERIFY_TIMEOUT_SECS value")?,
                allow_dev_bypass: env_var_or("GOOGLE_AUTH_DEV_BYPASS", "false")
                    .parse()
                    .context("Invalid GOOGLE_AUTH_DEV_BYPASS value")?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the loaded configuration
    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.database.url.is_empty(),
            "DATABASE_URL must not be empty"
        );
        anyhow::ensure!(self.http_port != 0, "HTTP_PORT must be non-zero");
        if self.google_auth.allow_dev_bypass {
            warn!("Google auth dev bypass is ENABLED - do not run this in production");
        }
        Ok(())
    }
}

/// Read an environment variable with a default fallback
fn env_var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_owned())
}

/// Parse a comma-separated origin list; "*" stays a single wildcard entry
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
