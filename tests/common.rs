// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database creation and domain fixture helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `liftlog_server`
//!
//! Common setup functions to reduce duplication across integration tests.
//! Storage tests run against both backends, so everything here goes through
//! the [`Database`] factory rather than a concrete implementation.

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use liftlog_server::{
    database_plugins::{factory::Database, DatabaseProvider},
    models::{NewExercise, NewUser, NewWorkout, NewWorkoutExercise, User, Workout},
};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Install a quiet per-test subscriber once per test process.
///
/// `TEST_LOG=debug cargo test` (or any filter directive) opens it up.
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let filter = std::env::var("TEST_LOG").unwrap_or_else(|_| "warn".to_owned());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

/// SQLite-backed test database
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new("sqlite::memory:").await
}

/// Hash-map-backed test database
pub async fn create_memory_database() -> Result<Database> {
    init_test_logging();
    Database::new("memory://").await
}

/// Both backends, for conformance runs over the same scenario
pub async fn all_backends() -> Vec<Database> {
    vec![
        create_test_database().await.unwrap(),
        create_memory_database().await.unwrap(),
    ]
}

/// A fixed, timezone-stable instant for deterministic date math
pub fn instant(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
}

/// Create a standard test user
pub async fn create_test_user(database: &Database) -> Result<User> {
    database.create_user(&NewUser::local("lifter", "test_hash")).await
}

/// Create a test user with a custom username
pub async fn create_test_user_named(database: &Database, username: &str) -> Result<User> {
    database.create_user(&NewUser::local(username, "test_hash")).await
}

/// Insert one catalog exercise and return its id
pub async fn seed_exercise(database: &Database, name: &str, category: &str) -> Result<i64> {
    let exercise = database
        .create_exercise(&NewExercise {
            name: name.to_owned(),
            description: None,
            category: category.to_owned(),
            target_muscles: None,
            equipment_type: None,
            exercise_type: Some("Strength".to_owned()),
        })
        .await?;
    Ok(exercise.id)
}

/// Create a workout with one entry per `(exercise_id, sets)` pair, in order
pub async fn seed_workout(
    database: &Database,
    user_id: i64,
    name: &str,
    entries: &[(i64, i64)],
) -> Result<Workout> {
    let workout = database
        .create_workout(&NewWorkout {
            name: name.to_owned(),
            user_id,
        })
        .await?;

    for (position, (exercise_id, sets)) in (1_i64..).zip(entries.iter().copied()) {
        database
            .create_workout_exercise(&NewWorkoutExercise {
                workout_id: workout.id,
                exercise_id,
                sets,
                reps: "8-10".to_owned(),
                weight: None,
                order_index: position,
            })
            .await?;
    }

    Ok(workout)
}
