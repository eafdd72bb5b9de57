// ABOUTME: Route module organization for the Liftlog HTTP endpoints
// ABOUTME: Centralized route definitions organized by domain with thin handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! Route module for the Liftlog server
//!
//! This module organizes all HTTP routes by domain. Each domain module
//! contains the request/response types for its endpoints and thin handler
//! functions that delegate to the storage layer.

/// Authentication routes listing available identity providers
pub mod auth;
/// Exercise catalog routes
pub mod exercises;
/// Health check routes
pub mod health;
/// Workout session routes, including session-exercise completion
pub mod sessions;
/// Exercise set logging routes
pub mod sets;
/// Training statistics routes
pub mod stats;
/// User account routes
pub mod users;
/// Workout template routes
pub mod workouts;

/// Authentication route handlers
pub use auth::AuthRoutes;
/// Exercise catalog route handlers
pub use exercises::ExerciseRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Workout session route handlers
pub use sessions::SessionRoutes;
/// Exercise set route handlers
pub use sets::SetRoutes;
/// Training statistics route handlers
pub use stats::StatsRoutes;
/// User account route handlers
pub use users::UserRoutes;
/// Workout template route handlers
pub use workouts::WorkoutRoutes;
