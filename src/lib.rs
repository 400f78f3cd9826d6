// ABOUTME: Main library entry point for the Ironlog workout-logging backend
// ABOUTME: Provides REST endpoints for auth, session validation, and workout CRUD
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog

#![deny(unsafe_code)]

//! # Ironlog Server
//!
//! A workout-logging backend. Users register with email+password or sign in
//! with a Google ID token, receive an opaque session token, and log training
//! sessions (each a dated, typed list of exercises) queried newest-first.
//!
//! ## Architecture
//!
//! - **Models**: the three record schemas (User, Workout, embedded Exercise)
//! - **Database**: SQLite-backed data store adapter with embedded migrations
//! - **Auth**: password hashing, the session-token codec, the principal
//!   resolver, and the Google ID-token verifier
//! - **Routes**: thin axum handlers per endpoint, delegating to services
//! - **Server**: router assembly, middleware stack, listener
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ironlog_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Ironlog server configured for port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Authentication: password hashing, session tokens, Google verification
pub mod auth;

/// Configuration management
pub mod config;

/// Application constants
pub mod constants;

/// Data store adapter
pub mod database;

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Common data models
pub mod models;

/// HTTP routes
pub mod routes;

/// HTTP server orchestration
pub mod server;
