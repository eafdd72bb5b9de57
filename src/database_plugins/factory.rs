// ABOUTME: Database factory for runtime backend selection
// ABOUTME: Detects the backend from the connection URL and delegates every provider call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

use super::memory::MemoryDatabase;
use super::sqlite::SqliteDatabase;
use super::DatabaseProvider;
use crate::models::{
    DayWeight, Exercise, ExerciseSet, NewExercise, NewExerciseSet, NewPersonalRecord,
    NewSessionExercise, NewUser, NewWorkout, NewWorkoutExercise, NewWorkoutSession,
    PersonalRecord, PersonalRecordWithExercise, SessionExercise, SessionExerciseDetail,
    SessionWithWorkout, UpdateExercise, UpdateExerciseSet, UpdateWorkout, UpdateWorkoutExercise,
    UpdateWorkoutSession, User, Workout, WorkoutExercise, WorkoutExerciseDetail, WorkoutSession,
    WorkoutSessionDetail, WorkoutWithExercises,
};
use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

/// Supported database backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// Volatile in-memory stores
    Memory,
    /// SQLite file or in-memory database
    SQLite,
}

/// Determine which backend a connection URL selects
///
/// # Errors
///
/// Returns an error for URL schemes no backend understands.
pub fn detect_database_type(database_url: &str) -> Result<DatabaseType> {
    if database_url == "memory" || database_url.starts_with("memory://") {
        Ok(DatabaseType::Memory)
    } else if database_url.starts_with("sqlite:") {
        Ok(DatabaseType::SQLite)
    } else {
        bail!("Unsupported database URL format: {database_url}")
    }
}

/// Database abstraction supporting runtime backend selection
#[derive(Clone)]
pub enum Database {
    /// In-memory backend
    Memory(MemoryDatabase),
    /// SQLite backend
    SQLite(SqliteDatabase),
}

impl Database {
    /// Short name of the active backend, for logs
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::SQLite(_) => "sqlite",
        }
    }
}

#[async_trait]
impl DatabaseProvider for Database {
    async fn new(database_url: &str) -> Result<Self> {
        match detect_database_type(database_url)? {
            DatabaseType::Memory => {
                info!("Initializing in-memory database backend");
                Ok(Self::Memory(MemoryDatabase::new(database_url).await?))
            }
            DatabaseType::SQLite => {
                info!("Initializing SQLite database backend");
                Ok(Self::SQLite(SqliteDatabase::new(database_url).await?))
            }
        }
    }

    async fn migrate(&self) -> Result<()> {
        match self {
            Self::Memory(db) => db.migrate().await,
            Self::SQLite(db) => db.migrate().await,
        }
    }

    // ================================
    // User Management
    // ================================

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        match self {
            Self::Memory(db) => db.create_user(user).await,
            Self::SQLite(db) => db.create_user(user).await,
        }
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        match self {
            Self::Memory(db) => db.get_user(user_id).await,
            Self::SQLite(db) => db.get_user(user_id).await,
        }
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        match self {
            Self::Memory(db) => db.get_user_by_username(username).await,
            Self::SQLite(db) => db.get_user_by_username(username).await,
        }
    }

    async fn get_user_by_provider(
        &self,
        provider: &str,
        provider_user_id: &str,
    ) -> Result<Option<User>> {
        match self {
            Self::Memory(db) => db.get_user_by_provider(provider, provider_user_id).await,
            Self::SQLite(db) => db.get_user_by_provider(provider, provider_user_id).await,
        }
    }

    async fn get_user_count(&self) -> Result<i64> {
        match self {
            Self::Memory(db) => db.get_user_count().await,
            Self::SQLite(db) => db.get_user_count().await,
        }
    }

    // ================================
    // Exercise Catalog
    // ================================

    async fn get_exercises(&self) -> Result<Vec<Exercise>> {
        match self {
            Self::Memory(db) => db.get_exercises().await,
            Self::SQLite(db) => db.get_exercises().await,
        }
    }

    async fn get_exercises_by_category(&self, category: &str) -> Result<Vec<Exercise>> {
        match self {
            Self::Memory(db) => db.get_exercises_by_category(category).await,
            Self::SQLite(db) => db.get_exercises_by_category(category).await,
        }
    }

    async fn get_exercise(&self, exercise_id: i64) -> Result<Option<Exercise>> {
        match self {
            Self::Memory(db) => db.get_exercise(exercise_id).await,
            Self::SQLite(db) => db.get_exercise(exercise_id).await,
        }
    }

    async fn create_exercise(&self, exercise: &NewExercise) -> Result<Exercise> {
        match self {
            Self::Memory(db) => db.create_exercise(exercise).await,
            Self::SQLite(db) => db.create_exercise(exercise).await,
        }
    }

    async fn update_exercise(
        &self,
        exercise_id: i64,
        update: &UpdateExercise,
    ) -> Result<Option<Exercise>> {
        match self {
            Self::Memory(db) => db.update_exercise(exercise_id, update).await,
            Self::SQLite(db) => db.update_exercise(exercise_id, update).await,
        }
    }

    async fn delete_exercise(&self, exercise_id: i64) -> Result<bool> {
        match self {
            Self::Memory(db) => db.delete_exercise(exercise_id).await,
            Self::SQLite(db) => db.delete_exercise(exercise_id).await,
        }
    }

    async fn get_exercise_count(&self) -> Result<i64> {
        match self {
            Self::Memory(db) => db.get_exercise_count().await,
            Self::SQLite(db) => db.get_exercise_count().await,
        }
    }

    // ================================
    // Workout Templates
    // ================================

    async fn get_workouts(&self, user_id: i64) -> Result<Vec<Workout>> {
        match self {
            Self::Memory(db) => db.get_workouts(user_id).await,
            Self::SQLite(db) => db.get_workouts(user_id).await,
        }
    }

    async fn get_workout(&self, workout_id: i64) -> Result<Option<Workout>> {
        match self {
            Self::Memory(db) => db.get_workout(workout_id).await,
            Self::SQLite(db) => db.get_workout(workout_id).await,
        }
    }

    async fn get_workout_with_exercises(
        &self,
        workout_id: i64,
    ) -> Result<Option<WorkoutWithExercises>> {
        match self {
            Self::Memory(db) => db.get_workout_with_exercises(workout_id).await,
            Self::SQLite(db) => db.get_workout_with_exercises(workout_id).await,
        }
    }

    async fn create_workout(&self, workout: &NewWorkout) -> Result<Workout> {
        match self {
            Self::Memory(db) => db.create_workout(workout).await,
            Self::SQLite(db) => db.create_workout(workout).await,
        }
    }

    async fn update_workout(
        &self,
        workout_id: i64,
        update: &UpdateWorkout,
    ) -> Result<Option<Workout>> {
        match self {
            Self::Memory(db) => db.update_workout(workout_id, update).await,
            Self::SQLite(db) => db.update_workout(workout_id, update).await,
        }
    }

    async fn delete_workout(&self, workout_id: i64) -> Result<bool> {
        match self {
            Self::Memory(db) => db.delete_workout(workout_id).await,
            Self::SQLite(db) => db.delete_workout(workout_id).await,
        }
    }

    // ================================
    // Workout Exercise Entries
    // ================================

    async fn get_workout_exercises(&self, workout_id: i64) -> Result<Vec<WorkoutExerciseDetail>> {
        match self {
            Self::Memory(db) => db.get_workout_exercises(workout_id).await,
            Self::SQLite(db) => db.get_workout_exercises(workout_id).await,
        }
    }

    async fn create_workout_exercise(
        &self,
        entry: &NewWorkoutExercise,
    ) -> Result<WorkoutExercise> {
        match self {
            Self::Memory(db) => db.create_workout_exercise(entry).await,
            Self::SQLite(db) => db.create_workout_exercise(entry).await,
        }
    }

    async fn update_workout_exercise(
        &self,
        entry_id: i64,
        update: &UpdateWorkoutExercise,
    ) -> Result<Option<WorkoutExercise>> {
        match self {
            Self::Memory(db) => db.update_workout_exercise(entry_id, update).await,
            Self::SQLite(db) => db.update_workout_exercise(entry_id, update).await,
        }
    }

    async fn delete_workout_exercise(&self, entry_id: i64) -> Result<bool> {
        match self {
            Self::Memory(db) => db.delete_workout_exercise(entry_id).await,
            Self::SQLite(db) => db.delete_workout_exercise(entry_id).await,
        }
    }

    async fn delete_workout_exercises_by_workout(&self, workout_id: i64) -> Result<()> {
        match self {
            Self::Memory(db) => db.delete_workout_exercises_by_workout(workout_id).await,
            Self::SQLite(db) => db.delete_workout_exercises_by_workout(workout_id).await,
        }
    }

    async fn replace_workout_exercises(
        &self,
        workout_id: i64,
        entries: &[NewWorkoutExercise],
    ) -> Result<Vec<WorkoutExercise>> {
        match self {
            Self::Memory(db) => db.replace_workout_exercises(workout_id, entries).await,
            Self::SQLite(db) => db.replace_workout_exercises(workout_id, entries).await,
        }
    }

    // ================================
    // Workout Sessions
    // ================================

    async fn get_workout_sessions(&self, user_id: i64) -> Result<Vec<SessionWithWorkout>> {
        match self {
            Self::Memory(db) => db.get_workout_sessions(user_id).await,
            Self::SQLite(db) => db.get_workout_sessions(user_id).await,
        }
    }

    async fn get_recent_sessions(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<SessionWithWorkout>> {
        match self {
            Self::Memory(db) => db.get_recent_sessions(user_id, limit).await,
            Self::SQLite(db) => db.get_recent_sessions(user_id, limit).await,
        }
    }

    async fn get_workout_session(&self, session_id: i64) -> Result<Option<WorkoutSession>> {
        match self {
            Self::Memory(db) => db.get_workout_session(session_id).await,
            Self::SQLite(db) => db.get_workout_session(session_id).await,
        }
    }

    async fn get_session_detail(&self, session_id: i64) -> Result<Option<WorkoutSessionDetail>> {
        match self {
            Self::Memory(db) => db.get_session_detail(session_id).await,
            Self::SQLite(db) => db.get_session_detail(session_id).await,
        }
    }

    async fn create_workout_session(
        &self,
        session: &NewWorkoutSession,
        add_exercises: bool,
    ) -> Result<WorkoutSession> {
        match self {
            Self::Memory(db) => db.create_workout_session(session, add_exercises).await,
            Self::SQLite(db) => db.create_workout_session(session, add_exercises).await,
        }
    }

    async fn update_workout_session(
        &self,
        session_id: i64,
        update: &UpdateWorkoutSession,
    ) -> Result<Option<WorkoutSession>> {
        match self {
            Self::Memory(db) => db.update_workout_session(session_id, update).await,
            Self::SQLite(db) => db.update_workout_session(session_id, update).await,
        }
    }

    async fn complete_workout_session(
        &self,
        session_id: i64,
    ) -> Result<Option<WorkoutSession>> {
        match self {
            Self::Memory(db) => db.complete_workout_session(session_id).await,
            Self::SQLite(db) => db.complete_workout_session(session_id).await,
        }
    }

    async fn delete_workout_session(&self, session_id: i64) -> Result<bool> {
        match self {
            Self::Memory(db) => db.delete_workout_session(session_id).await,
            Self::SQLite(db) => db.delete_workout_session(session_id).await,
        }
    }

    // ================================
    // Session Exercises
    // ================================

    async fn get_session_exercises(
        &self,
        session_id: i64,
    ) -> Result<Vec<SessionExerciseDetail>> {
        match self {
            Self::Memory(db) => db.get_session_exercises(session_id).await,
            Self::SQLite(db) => db.get_session_exercises(session_id).await,
        }
    }

    async fn create_session_exercise(
        &self,
        entry: &NewSessionExercise,
    ) -> Result<SessionExercise> {
        match self {
            Self::Memory(db) => db.create_session_exercise(entry).await,
            Self::SQLite(db) => db.create_session_exercise(entry).await,
        }
    }

    async fn complete_session_exercise(
        &self,
        session_exercise_id: i64,
    ) -> Result<Option<SessionExercise>> {
        match self {
            Self::Memory(db) => db.complete_session_exercise(session_exercise_id).await,
            Self::SQLite(db) => db.complete_session_exercise(session_exercise_id).await,
        }
    }

    // ================================
    // Exercise Sets
    // ================================

    async fn get_exercise_sets(&self, session_exercise_id: i64) -> Result<Vec<ExerciseSet>> {
        match self {
            Self::Memory(db) => db.get_exercise_sets(session_exercise_id).await,
            Self::SQLite(db) => db.get_exercise_sets(session_exercise_id).await,
        }
    }

    async fn create_exercise_set(&self, set: &NewExerciseSet) -> Result<ExerciseSet> {
        match self {
            Self::Memory(db) => db.create_exercise_set(set).await,
            Self::SQLite(db) => db.create_exercise_set(set).await,
        }
    }

    async fn update_exercise_set(
        &self,
        set_id: i64,
        update: &UpdateExerciseSet,
    ) -> Result<Option<ExerciseSet>> {
        match self {
            Self::Memory(db) => db.update_exercise_set(set_id, update).await,
            Self::SQLite(db) => db.update_exercise_set(set_id, update).await,
        }
    }

    async fn complete_exercise_set(&self, set_id: i64) -> Result<Option<ExerciseSet>> {
        match self {
            Self::Memory(db) => db.complete_exercise_set(set_id).await,
            Self::SQLite(db) => db.complete_exercise_set(set_id).await,
        }
    }

    async fn delete_exercise_set(&self, set_id: i64) -> Result<bool> {
        match self {
            Self::Memory(db) => db.delete_exercise_set(set_id).await,
            Self::SQLite(db) => db.delete_exercise_set(set_id).await,
        }
    }

    // ================================
    // Personal Records
    // ================================

    async fn get_personal_records(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<Vec<PersonalRecord>> {
        match self {
            Self::Memory(db) => db.get_personal_records(user_id, exercise_id).await,
            Self::SQLite(db) => db.get_personal_records(user_id, exercise_id).await,
        }
    }

    async fn get_recent_personal_records(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<PersonalRecordWithExercise>> {
        match self {
            Self::Memory(db) => db.get_recent_personal_records(user_id, limit).await,
            Self::SQLite(db) => db.get_recent_personal_records(user_id, limit).await,
        }
    }

    async fn create_personal_record(
        &self,
        record: &NewPersonalRecord,
    ) -> Result<PersonalRecord> {
        match self {
            Self::Memory(db) => db.create_personal_record(record).await,
            Self::SQLite(db) => db.create_personal_record(record).await,
        }
    }

    // ================================
    // Training Statistics
    // ================================

    async fn get_weekly_workout_count(&self, user_id: i64, now: DateTime<Utc>) -> Result<i64> {
        match self {
            Self::Memory(db) => db.get_weekly_workout_count(user_id, now).await,
            Self::SQLite(db) => db.get_weekly_workout_count(user_id, now).await,
        }
    }

    async fn get_total_weight(&self, user_id: i64, since: DateTime<Utc>) -> Result<f64> {
        match self {
            Self::Memory(db) => db.get_total_weight(user_id, since).await,
            Self::SQLite(db) => db.get_total_weight(user_id, since).await,
        }
    }

    async fn get_weight_by_day(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
        days: i64,
    ) -> Result<Vec<DayWeight>> {
        match self {
            Self::Memory(db) => db.get_weight_by_day(user_id, now, days).await,
            Self::SQLite(db) => db.get_weight_by_day(user_id, now, days).await,
        }
    }
}
