// ABOUTME: Configuration management for the Ironlog server
// ABOUTME: Groups environment-driven settings behind typed config structs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog

//! Configuration management.

/// Environment-variable-backed server configuration
pub mod environment;

pub use environment::{
    DatabaseConfig, GoogleAuthConfig, SecurityConfig, ServerConfig,
};
