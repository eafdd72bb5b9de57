// ABOUTME: SQLite persistence layer for users, workouts, sessions, and records
// ABOUTME: Owns the connection pool, schema migrations, and all SQL statements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! # Database Management
//!
//! SQLite-backed storage for the training domain. Each entity family
//! lives in its own submodule (`users`, `exercises`, `workouts`,
//! `sessions`, `records`, `stats`), all implemented as methods on the
//! [`Database`] struct so cascading operations can share one pool and
//! one transaction.

mod exercises;
mod records;
mod sessions;
mod stats;
mod users;
mod workouts;

use anyhow::Result;
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database manager for training data storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or the
    /// schema migration fails.
    pub async fn new(database_url: &str) -> Result<Self> {
        // SQLite opens read-only by default; mode=rwc creates the file
        // on first open.
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options).await?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Run database migrations
    ///
    /// Every statement is `CREATE TABLE IF NOT EXISTS`, so calling this
    /// against an already-migrated database is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if any schema statement fails to execute.
    pub async fn migrate(&self) -> Result<()> {
        // User tables
        self.migrate_users().await?;

        // Exercise catalog
        self.migrate_exercises().await?;

        // Workout templates and their exercise entries
        self.migrate_workouts().await?;

        // Sessions, session exercises, and logged sets
        self.migrate_sessions().await?;

        // Personal records
        self.migrate_records().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) async fn create_test_db() -> Result<Database> {
        // Each in-memory connection gets its own isolated instance
        let database_url = "sqlite::memory:";
        Database::new(database_url).await
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let db = create_test_db().await.unwrap();
        db.migrate().await.unwrap();
        db.migrate().await.unwrap();
    }
}
