// ABOUTME: SQLite implementation of the DatabaseProvider trait
// ABOUTME: Thin wrapper delegating every operation to the SQL database layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

use super::DatabaseProvider;
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

/// SQLite database provider backed by the SQL layer
#[derive(Clone)]
pub struct SqliteDatabase {
    inner: crate::database::Database,
}

impl SqliteDatabase {
    /// Access the underlying SQL database layer
    #[must_use]
    pub const fn inner(&self) -> &crate::database::Database {
        &self.inner
    }
}

#[async_trait]
impl DatabaseProvider for SqliteDatabase {
    async fn new(database_url: &str) -> Result<Self> {
        let inner = crate::database::Database::new(database_url).await?;
        Ok(Self { inner })
    }

    async fn migrate(&self) -> Result<()> {
        self.inner.migrate().await
    }

    // ================================
    // User Management
    // ================================

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        self.inner.create_user(user).await
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        self.inner.get_user(user_id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.inner.get_user_by_username(username).await
    }

    async fn get_user_by_provider(
        &self,
        provider: &str,
        provider_user_id: &str,
    ) -> Result<Option<User>> {
        self.inner
            .get_user_by_provider(provider, provider_user_id)
            .await
    }

    async fn get_user_count(&self) -> Result<i64> {
        self.inner.get_user_count().await
    }

    // ================================
    // Exercise Catalog
    // ================================

    async fn get_exercises(&self) -> Result<Vec<Exercise>> {
        self.inner.get_exercises().await
    }

    async fn get_exercises_by_category(&self, category: &str) -> Result<Vec<Exercise>> {
        self.inner.get_exercises_by_category(category).await
    }

    async fn get_exercise(&self, exercise_id: i64) -> Result<Option<Exercise>> {
        self.inner.get_exercise(exercise_id).await
    }

    async fn create_exercise(&self, exercise: &NewExercise) -> Result<Exercise> {
        self.inner.create_exercise(exercise).await
    }

    async fn update_exercise(
        &self,
        exercise_id: i64,
        update: &UpdateExercise,
    ) -> Result<Option<Exercise>> {
        self.inner.update_exercise(exercise_id, update).await
    }

    async fn delete_exercise(&self, exercise_id: i64) -> Result<bool> {
        self.inner.delete_exercise(exercise_id).await
    }

    async fn get_exercise_count(&self) -> Result<i64> {
        self.inner.get_exercise_count().await
    }

    // ================================
    // Workout Templates
    // ================================

    async fn get_workouts(&self, user_id: i64) -> Result<Vec<Workout>> {
        self.inner.get_workouts(user_id).await
    }

    async fn get_workout(&self, workout_id: i64) -> Result<Option<Workout>> {
        self.inner.get_workout(workout_id).await
    }

    async fn get_workout_with_exercises(
        &self,
        workout_id: i64,
    ) -> Result<Option<WorkoutWithExercises>> {
        self.inner.get_workout_with_exercises(workout_id).await
    }

    async fn create_workout(&self, workout: &NewWorkout) -> Result<Workout> {
        self.inner.create_workout(workout).await
    }

    async fn update_workout(
        &self,
        workout_id: i64,
        update: &UpdateWorkout,
    ) -> Result<Option<Workout>> {
        self.inner.update_workout(workout_id, update).await
    }

    async fn delete_workout(&self, workout_id: i64) -> Result<bool> {
        self.inner.delete_workout(workout_id).await
    }

    // ================================
    // Workout Exercise Entries
    // ================================

    async fn get_workout_exercises(&self, workout_id: i64) -> Result<Vec<WorkoutExerciseDetail>> {
        self.inner.get_workout_exercises(workout_id).await
    }

    async fn create_workout_exercise(
        &self,
        entry: &NewWorkoutExercise,
    ) -> Result<WorkoutExercise> {
        self.inner.create_workout_exercise(entry).await
    }

    async fn update_workout_exercise(
        &self,
        entry_id: i64,
        update: &UpdateWorkoutExercise,
    ) -> Result<Option<WorkoutExercise>> {
        self.inner.update_workout_exercise(entry_id, update).await
    }

    async fn delete_workout_exercise(&self, entry_id: i64) -> Result<bool> {
        self.inner.delete_workout_exercise(entry_id).await
    }

    async fn delete_workout_exercises_by_workout(&self, workout_id: i64) -> Result<()> {
        self.inner
            .delete_workout_exercises_by_workout(workout_id)
            .await
    }

    async fn replace_workout_exercises(
        &self,
        workout_id: i64,
        entries: &[NewWorkoutExercise],
    ) -> Result<Vec<WorkoutExercise>> {
        self.inner
            .replace_workout_exercises(workout_id, entries)
            .await
    }

    // ================================
    // Workout Sessions
    // ================================

    async fn get_workout_sessions(&self, user_id: i64) -> Result<Vec<SessionWithWorkout>> {
        self.inner.get_workout_sessions(user_id).await
    }

    async fn get_recent_sessions(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<SessionWithWorkout>> {
        self.inner.get_recent_sessions(user_id, limit).await
    }

    async fn get_workout_session(&self, session_id: i64) -> Result<Option<WorkoutSession>> {
        self.inner.get_workout_session(session_id).await
    }

    async fn get_session_detail(&self, session_id: i64) -> Result<Option<WorkoutSessionDetail>> {
        self.inner.get_session_detail(session_id).await
    }

    async fn create_workout_session(
        &self,
        session: &NewWorkoutSession,
        add_exercises: bool,
    ) -> Result<WorkoutSession> {
        self.inner
            .create_workout_session(session, add_exercises)
            .await
    }

    async fn update_workout_session(
        &self,
        session_id: i64,
        update: &UpdateWorkoutSession,
    ) -> Result<Option<WorkoutSession>> {
        self.inner.update_workout_session(session_id, update).await
    }

    async fn complete_workout_session(
        &self,
        session_id: i64,
    ) -> Result<Option<WorkoutSession>> {
        self.inner.complete_workout_session(session_id).await
    }

    async fn delete_workout_session(&self, session_id: i64) -> Result<bool> {
        self.inner.delete_workout_session(session_id).await
    }

    // ================================
    // Session Exercises
    // ================================

    async fn get_session_exercises(
        &self,
        session_id: i64,
    ) -> Result<Vec<SessionExerciseDetail>> {
        self.inner.get_session_exercises(session_id).await
    }

    async fn create_session_exercise(
        &self,
        entry: &NewSessionExercise,
    ) -> Result<SessionExercise> {
        self.inner.create_session_exercise(entry).await
    }

    async fn complete_session_exercise(
        &self,
        session_exercise_id: i64,
    ) -> Result<Option<SessionExercise>> {
        self.inner
            .complete_session_exercise(session_exercise_id)
            .await
    }

    // ================================
    // Exercise Sets
    // ================================

    async fn get_exercise_sets(&self, session_exercise_id: i64) -> Result<Vec<ExerciseSet>> {
        self.inner.get_exercise_sets(session_exercise_id).await
    }

    async fn create_exercise_set(&self, set: &NewExerciseSet) -> Result<ExerciseSet> {
        self.inner.create_exercise_set(set).await
    }

    async fn update_exercise_set(
        &self,
        set_id: i64,
        update: &UpdateExerciseSet,
    ) -> Result<Option<ExerciseSet>> {
        self.inner.update_exercise_set(set_id, update).await
    }

    async fn complete_exercise_set(&self, set_id: i64) -> Result<Option<ExerciseSet>> {
        self.inner.complete_exercise_set(set_id).await
    }

    async fn delete_exercise_set(&self, set_id: i64) -> Result<bool> {
        self.inner.delete_exercise_set(set_id).await
    }

    // ================================
    // Personal Records
    // ================================

    async fn get_personal_records(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<Vec<PersonalRecord>> {
        self.inner.get_personal_records(user_id, exercise_id).await
    }

    async fn get_recent_personal_records(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<PersonalRecordWithExercise>> {
        self.inner.get_recent_personal_records(user_id, limit).await
    }

    async fn create_personal_record(
        &self,
        record: &NewPersonalRecord,
    ) -> Result<PersonalRecord> {
        self.inner.create_personal_record(record).await
    }

    // ================================
    // Training Statistics
    // ================================

    async fn get_weekly_workout_count(&self, user_id: i64, now: DateTime<Utc>) -> Result<i64> {
        self.inner.get_weekly_workout_count(user_id, now).await
    }

    async fn get_total_weight(&self, user_id: i64, since: DateTime<Utc>) -> Result<f64> {
        self.inner.get_total_weight(user_id, since).await
    }

    async fn get_weight_by_day(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
        days: i64,
    ) -> Result<Vec<DayWeight>> {
        self.inner.get_weight_by_day(user_id, now, days).await
    }
}
