// ABOUTME: Main library entry point for the Liftlog workout tracking backend
// ABOUTME: Exposes storage backends, HTTP routes, and training statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

// Crate-level attributes:
// - recursion_limit: Increased from default 128 to 256 for complex derive macros
//   (serde, async-trait) on nested composite view types
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![recursion_limit = "256"]
#![deny(unsafe_code)]

//! # Liftlog Server
//!
//! A personal workout tracking backend. Users maintain reusable workout
//! templates built from a shared exercise catalog, log training sessions
//! against them set by set, and get automatic personal-record detection and
//! dashboard statistics computed from the logged history.
//!
//! ## Features
//!
//! - **Workout templates**: Ordered exercise entries with set/rep targets
//! - **Session logging**: Pre-materialized sets filled in as the user lifts
//! - **Personal records**: Append-only records detected on set completion
//! - **Training statistics**: Weekly goal progress, volume totals, per-day series
//! - **Pluggable storage**: SQLite for deployment, in-memory for tests
//!
//! ## Quick Start
//!
//! 1. Point `DATABASE_URL` at a SQLite file (or `memory://`)
//! 2. Start the server with `liftlog-server`
//! 3. Browse the catalog at `GET /api/exercises`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use liftlog_server::config::ServerConfig;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ServerConfig::from_env()?;
//! println!("Liftlog server configured with port: HTTP={}", config.http_port);
//! # Ok(())
//! # }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the server binary (src/bin/) and integration
// tests (tests/). They must remain `pub` so external consumers can access
// them.

/// Configuration management from environment variables
pub mod config;

/// Application constants and request defaults
pub mod constants;

/// SQLite storage implementation
pub mod database;

/// Storage backend selection behind the `DatabaseProvider` trait
pub mod database_plugins;

/// Error codes, `AppError`, and the JSON error envelope
pub mod errors;

/// External identity provider integration (Google, Facebook, Instagram)
pub mod identity;

/// Structured logging initialization
pub mod logging;

/// HTTP middleware (CORS, request correlation ids)
pub mod middleware;

/// Domain models shared by storage and routes
pub mod models;

/// HTTP route handlers organized by domain
pub mod routes;

/// Default exercise catalog seeding
pub mod seed;

/// HTTP server assembly and shared resources
pub mod server;

/// Training statistics helpers shared by every storage backend
pub mod stats;
