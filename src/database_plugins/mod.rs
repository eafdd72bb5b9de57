// ABOUTME: Database abstraction layer for the Liftlog backend
// ABOUTME: Plugin architecture with in-memory and SQLite storage backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

use crate::models::{
    DayWeight, Exercise, ExerciseSet, NewExercise, NewExerciseSet, NewPersonalRecord,
    NewSessionExercise, NewUser, NewWorkout, NewWorkoutExercise, NewWorkoutSession,
    PersonalRecord, PersonalRecordWithExercise, SessionExercise, SessionExerciseDetail,
    SessionWithWorkout, UpdateExercise, UpdateExerciseSet, UpdateWorkout, UpdateWorkoutExercise,
    UpdateWorkoutSession, User, Workout, WorkoutExercise, WorkoutExerciseDetail, WorkoutSession,
    WorkoutSessionDetail, WorkoutWithExercises,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub mod factory;
pub mod memory;
pub mod sqlite;

pub use factory::Database;

/// Core database abstraction trait
///
/// All storage backends implement this trait so the route layer can
/// stay backend-agnostic. Both implementations must agree on every
/// behavioral detail: listing order, cascade rules, idempotency, and
/// the personal-record trigger.
#[async_trait]
pub trait DatabaseProvider: Send + Sync + Clone {
    /// Create a new database instance from a connection URL
    async fn new(database_url: &str) -> Result<Self>
    where
        Self: Sized;

    /// Run migrations to set up the schema
    async fn migrate(&self) -> Result<()>;

    // ================================
    // User Management
    // ================================

    /// Create a new user account
    async fn create_user(&self, user: &NewUser) -> Result<User>;

    /// Get user by ID
    async fn get_user(&self, user_id: i64) -> Result<Option<User>>;

    /// Get user by unique username
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Get user by identity provider linkage
    async fn get_user_by_provider(
        &self,
        provider: &str,
        provider_user_id: &str,
    ) -> Result<Option<User>>;

    /// Get total number of users
    async fn get_user_count(&self) -> Result<i64>;

    // ================================
    // Exercise Catalog
    // ================================

    /// List all catalog exercises in insertion order
    async fn get_exercises(&self) -> Result<Vec<Exercise>>;

    /// List catalog exercises in one category
    async fn get_exercises_by_category(&self, category: &str) -> Result<Vec<Exercise>>;

    /// Get a catalog exercise by ID
    async fn get_exercise(&self, exercise_id: i64) -> Result<Option<Exercise>>;

    /// Add an exercise to the catalog
    async fn create_exercise(&self, exercise: &NewExercise) -> Result<Exercise>;

    /// Apply a partial update to a catalog exercise
    async fn update_exercise(
        &self,
        exercise_id: i64,
        update: &UpdateExercise,
    ) -> Result<Option<Exercise>>;

    /// Delete a catalog exercise, reporting whether it existed
    async fn delete_exercise(&self, exercise_id: i64) -> Result<bool>;

    /// Get total number of catalog exercises
    async fn get_exercise_count(&self) -> Result<i64>;

    // ================================
    // Workout Templates
    // ================================

    /// List a user's workouts in insertion order
    async fn get_workouts(&self, user_id: i64) -> Result<Vec<Workout>>;

    /// Get a workout by ID
    async fn get_workout(&self, workout_id: i64) -> Result<Option<Workout>>;

    /// Get a workout with its annotated exercise entries
    async fn get_workout_with_exercises(
        &self,
        workout_id: i64,
    ) -> Result<Option<WorkoutWithExercises>>;

    /// Create a workout
    async fn create_workout(&self, workout: &NewWorkout) -> Result<Workout>;

    /// Apply a partial update to a workout
    async fn update_workout(
        &self,
        workout_id: i64,
        update: &UpdateWorkout,
    ) -> Result<Option<Workout>>;

    /// Delete a workout and its exercise entries
    async fn delete_workout(&self, workout_id: i64) -> Result<bool>;

    // ================================
    // Workout Exercise Entries
    // ================================

    /// List a workout's entries by position, annotated with catalog details
    async fn get_workout_exercises(&self, workout_id: i64) -> Result<Vec<WorkoutExerciseDetail>>;

    /// Add one entry to a workout
    async fn create_workout_exercise(
        &self,
        entry: &NewWorkoutExercise,
    ) -> Result<WorkoutExercise>;

    /// Apply a partial update to a workout entry
    async fn update_workout_exercise(
        &self,
        entry_id: i64,
        update: &UpdateWorkoutExercise,
    ) -> Result<Option<WorkoutExercise>>;

    /// Delete one workout entry, reporting whether it existed
    async fn delete_workout_exercise(&self, entry_id: i64) -> Result<bool>;

    /// Delete every entry under a workout
    async fn delete_workout_exercises_by_workout(&self, workout_id: i64) -> Result<()>;

    /// Atomically replace a workout's entry list
    async fn replace_workout_exercises(
        &self,
        workout_id: i64,
        entries: &[NewWorkoutExercise],
    ) -> Result<Vec<WorkoutExercise>>;

    // ================================
    // Workout Sessions
    // ================================

    /// List a user's sessions newest first, annotated with workouts
    async fn get_workout_sessions(&self, user_id: i64) -> Result<Vec<SessionWithWorkout>>;

    /// The most recent sessions for a user, newest first
    async fn get_recent_sessions(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<SessionWithWorkout>>;

    /// Get a session by ID
    async fn get_workout_session(&self, session_id: i64) -> Result<Option<WorkoutSession>>;

    /// Get a session with workout, exercises, and sets
    async fn get_session_detail(&self, session_id: i64) -> Result<Option<WorkoutSessionDetail>>;

    /// Create a session, optionally materializing exercises and empty sets
    async fn create_workout_session(
        &self,
        session: &NewWorkoutSession,
        add_exercises: bool,
    ) -> Result<WorkoutSession>;

    /// Apply a partial update to a session without completion cascades
    async fn update_workout_session(
        &self,
        session_id: i64,
        update: &UpdateWorkoutSession,
    ) -> Result<Option<WorkoutSession>>;

    /// Mark a session completed and stamp its workout's last-completed time
    async fn complete_workout_session(&self, session_id: i64)
        -> Result<Option<WorkoutSession>>;

    /// Delete a session with its exercises and sets
    async fn delete_workout_session(&self, session_id: i64) -> Result<bool>;

    // ================================
    // Session Exercises
    // ================================

    /// List a session's exercises with catalog details and ordered sets
    async fn get_session_exercises(&self, session_id: i64)
        -> Result<Vec<SessionExerciseDetail>>;

    /// Add one exercise to an existing session
    async fn create_session_exercise(
        &self,
        entry: &NewSessionExercise,
    ) -> Result<SessionExercise>;

    /// Mark a session exercise completed, idempotently
    async fn complete_session_exercise(
        &self,
        session_exercise_id: i64,
    ) -> Result<Option<SessionExercise>>;

    // ================================
    // Exercise Sets
    // ================================

    /// List a session exercise's sets ordered by set number
    async fn get_exercise_sets(&self, session_exercise_id: i64) -> Result<Vec<ExerciseSet>>;

    /// Log one set under a session exercise
    async fn create_exercise_set(&self, set: &NewExerciseSet) -> Result<ExerciseSet>;

    /// Update a set's logged weight and reps
    async fn update_exercise_set(
        &self,
        set_id: i64,
        update: &UpdateExerciseSet,
    ) -> Result<Option<ExerciseSet>>;

    /// Mark a set completed, evaluating it for a personal record
    async fn complete_exercise_set(&self, set_id: i64) -> Result<Option<ExerciseSet>>;

    /// Delete one set, reporting whether it existed
    async fn delete_exercise_set(&self, set_id: i64) -> Result<bool>;

    // ================================
    // Personal Records
    // ================================

    /// All records a user holds for one exercise
    async fn get_personal_records(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<Vec<PersonalRecord>>;

    /// A user's most recent records, annotated with catalog details
    async fn get_recent_personal_records(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<PersonalRecordWithExercise>>;

    /// Append a personal record
    async fn create_personal_record(&self, record: &NewPersonalRecord)
        -> Result<PersonalRecord>;

    // ================================
    // Training Statistics
    // ================================

    /// Completed sessions inside the week containing `now`
    async fn get_weekly_workout_count(&self, user_id: i64, now: DateTime<Utc>) -> Result<i64>;

    /// Total volume lifted since `since`
    async fn get_total_weight(&self, user_id: i64, since: DateTime<Utc>) -> Result<f64>;

    /// Volume per elapsed-day bucket over a trailing window, oldest first
    async fn get_weight_by_day(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
        days: i64,
    ) -> Result<Vec<DayWeight>>;
}
