// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Handles environment-derived configuration for ports, storage, and identity providers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! Configuration module
//!
//! Centralized configuration for the Liftlog server:
//!
//! - **Environment**: Server configuration from environment variables,
//!   covering the HTTP port, database selection, identity provider
//!   credentials, and CORS origins.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    DatabaseConfig, DatabaseUrl, Environment, IdentityConfig, IdentityProviderConfig, LogLevel,
    ServerConfig,
};
