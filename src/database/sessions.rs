// ABOUTME: Workout session database operations with completion cascades
// ABOUTME: Session materialization, set logging, and the personal-record trigger on set completion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

use super::Database;
use crate::models::{
    ExerciseSet, NewExerciseSet, NewSessionExercise, NewWorkoutSession, PersonalRecord,
    SessionExercise, SessionExerciseDetail, SessionWithWorkout, UpdateExerciseSet,
    UpdateWorkoutSession, WorkoutSession, WorkoutSessionDetail,
};
use crate::stats;
use anyhow::{anyhow, Result};
use chrono::Utc;
use sqlx::Row;
use tracing::{debug, info};

impl Database {
    /// Create the session tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub(super) async fn migrate_sessions(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workout_id INTEGER NOT NULL,
                user_id INTEGER NOT NULL,
                date DATETIME NOT NULL,
                duration_minutes INTEGER,
                notes TEXT,
                completed BOOLEAN NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS session_exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id INTEGER NOT NULL,
                exercise_id INTEGER NOT NULL,
                completed BOOLEAN NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercise_sets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_exercise_id INTEGER NOT NULL,
                set_number INTEGER NOT NULL,
                weight REAL,
                reps INTEGER,
                completed BOOLEAN NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_sessions_user_id ON workout_sessions(user_id)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_sessions_date ON workout_sessions(date)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_session_exercises_session_id ON session_exercises(session_id)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_exercise_sets_session_exercise_id ON exercise_sets(session_exercise_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List a user's sessions, newest first, each annotated with its
    /// workout when that workout still exists
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn get_workout_sessions(&self, user_id: i64) -> Result<Vec<SessionWithWorkout>> {
        let rows = sqlx::query(
            r"
            SELECT id, workout_id, user_id, date, duration_minutes, notes, completed
            FROM workout_sessions WHERE user_id = $1 ORDER BY date DESC, id ASC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let sessions = rows
            .iter()
            .map(Self::row_to_session)
            .collect::<Result<Vec<_>>>()?;

        self.annotate_sessions(sessions).await
    }

    /// The `limit` most recent sessions for a user, newest first
    ///
    /// Date ties keep insertion order, so results are deterministic.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn get_recent_sessions(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<SessionWithWorkout>> {
        let rows = sqlx::query(
            r"
            SELECT id, workout_id, user_id, date, duration_minutes, notes, completed
            FROM workout_sessions WHERE user_id = $1 ORDER BY date DESC, id ASC LIMIT $2
            ",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let sessions = rows
            .iter()
            .map(Self::row_to_session)
            .collect::<Result<Vec<_>>>()?;

        self.annotate_sessions(sessions).await
    }

    /// Attach each session's workout, tolerating deleted workouts
    async fn annotate_sessions(
        &self,
        sessions: Vec<WorkoutSession>,
    ) -> Result<Vec<SessionWithWorkout>> {
        let mut annotated = Vec::with_capacity(sessions.len());
        for session in sessions {
            let workout = self.get_workout(session.workout_id).await?;
            annotated.push(SessionWithWorkout { session, workout });
        }
        Ok(annotated)
    }

    /// Get a session by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_workout_session(&self, session_id: i64) -> Result<Option<WorkoutSession>> {
        let row = sqlx::query(
            r"
            SELECT id, workout_id, user_id, date, duration_minutes, notes, completed
            FROM workout_sessions WHERE id = $1
            ",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_session).transpose()
    }

    /// Get a session with its workout, exercises, and sets
    ///
    /// Returns `None` when the session or its parent workout is
    /// missing; this view has no meaning without both.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails or a session exercise
    /// references a missing catalog exercise.
    pub async fn get_session_detail(&self, session_id: i64) -> Result<Option<WorkoutSessionDetail>> {
        let Some(session) = self.get_workout_session(session_id).await? else {
            return Ok(None);
        };

        let Some(workout) = self.get_workout(session.workout_id).await? else {
            return Ok(None);
        };

        let exercises = self.get_session_exercises(session_id).await?;

        Ok(Some(WorkoutSessionDetail {
            session,
            workout,
            exercises,
        }))
    }

    /// Create a session, optionally materializing its exercise list
    ///
    /// With `add_exercises`, every workout-exercise entry of the source
    /// workout becomes one session exercise plus as many empty sets as
    /// the entry's target count, numbered from 1. A session created
    /// already completed stamps the workout's last-completed timestamp.
    /// The whole cascade commits atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub async fn create_workout_session(
        &self,
        session: &NewWorkoutSession,
        add_exercises: bool,
    ) -> Result<WorkoutSession> {
        let date = session.date.unwrap_or_else(Utc::now);
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r"
            INSERT INTO workout_sessions (workout_id, user_id, date, duration_minutes, notes, completed)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(session.workout_id)
        .bind(session.user_id)
        .bind(date)
        .bind(session.duration_minutes)
        .bind(&session.notes)
        .bind(session.completed)
        .execute(&mut *tx)
        .await?;
        let session_id = result.last_insert_rowid();

        if add_exercises {
            let entries = sqlx::query(
                r"
                SELECT id, exercise_id, sets FROM workout_exercises
                WHERE workout_id = $1 ORDER BY order_index ASC
                ",
            )
            .bind(session.workout_id)
            .fetch_all(&mut *tx)
            .await?;

            for entry in &entries {
                let exercise_id: i64 = entry.get("exercise_id");
                let target_sets: i64 = entry.get("sets");

                let inserted = sqlx::query(
                    r"
                    INSERT INTO session_exercises (session_id, exercise_id, completed)
                    VALUES ($1, $2, 0)
                    ",
                )
                .bind(session_id)
                .bind(exercise_id)
                .execute(&mut *tx)
                .await?;
                let session_exercise_id = inserted.last_insert_rowid();

                for set_number in 1..=target_sets {
                    sqlx::query(
                        r"
                        INSERT INTO exercise_sets (session_exercise_id, set_number, weight, reps, completed)
                        VALUES ($1, $2, NULL, NULL, 0)
                        ",
                    )
                    .bind(session_exercise_id)
                    .bind(set_number)
                    .execute(&mut *tx)
                    .await?;
                }
            }

            debug!(
                session_id,
                workout_id = session.workout_id,
                exercises = entries.len(),
                "Materialized session exercises"
            );
        }

        if session.completed {
            self.set_workout_last_completed(&mut tx, session.workout_id, date)
                .await?;
        }

        tx.commit().await?;

        Ok(WorkoutSession {
            id: session_id,
            workout_id: session.workout_id,
            user_id: session.user_id,
            date,
            duration_minutes: session.duration_minutes,
            notes: session.notes.clone(),
            completed: session.completed,
        })
    }

    /// Apply a partial update to a session
    ///
    /// Plain field update only. The last-completed cascade runs from
    /// session creation and [`Self::complete_workout_session`], never
    /// from here.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn update_workout_session(
        &self,
        session_id: i64,
        update: &UpdateWorkoutSession,
    ) -> Result<Option<WorkoutSession>> {
        let Some(existing) = self.get_workout_session(session_id).await? else {
            return Ok(None);
        };

        let merged = WorkoutSession {
            date: update.date.unwrap_or(existing.date),
            duration_minutes: update.duration_minutes.or(existing.duration_minutes),
            notes: update.notes.clone().or(existing.notes),
            completed: update.completed.unwrap_or(existing.completed),
            ..existing
        };

        sqlx::query(
            r"
            UPDATE workout_sessions SET
                date = $2,
                duration_minutes = $3,
                notes = $4,
                completed = $5
            WHERE id = $1
            ",
        )
        .bind(merged.id)
        .bind(merged.date)
        .bind(merged.duration_minutes)
        .bind(&merged.notes)
        .bind(merged.completed)
        .execute(&self.pool)
        .await?;

        Ok(Some(merged))
    }

    /// Mark a session completed and stamp its workout
    ///
    /// The workout's `last_completed_at` becomes the session's date
    /// unconditionally; completing a session is never gated on its
    /// exercises being complete.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub async fn complete_workout_session(
        &self,
        session_id: i64,
    ) -> Result<Option<WorkoutSession>> {
        let Some(session) = self.get_workout_session(session_id).await? else {
            return Ok(None);
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE workout_sessions SET completed = 1 WHERE id = $1")
            .bind(session_id)
            .execute(&mut *tx)
            .await?;

        self.set_workout_last_completed(&mut tx, session.workout_id, session.date)
            .await?;

        tx.commit().await?;

        Ok(Some(WorkoutSession {
            completed: true,
            ..session
        }))
    }

    /// Delete a session together with its exercises and sets
    ///
    /// Returns whether the session row existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub async fn delete_workout_session(&self, session_id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            DELETE FROM exercise_sets WHERE session_exercise_id IN (
                SELECT id FROM session_exercises WHERE session_id = $1
            )
            ",
        )
        .bind(session_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM session_exercises WHERE session_id = $1")
            .bind(session_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM workout_sessions WHERE id = $1")
            .bind(session_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// List a session's exercises with catalog details and ordered sets
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails or an entry references
    /// a missing catalog exercise.
    pub async fn get_session_exercises(
        &self,
        session_id: i64,
    ) -> Result<Vec<SessionExerciseDetail>> {
        let rows = sqlx::query(
            r"
            SELECT id, session_id, exercise_id, completed
            FROM session_exercises WHERE session_id = $1 ORDER BY id ASC
            ",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        let entries = rows
            .iter()
            .map(Self::row_to_session_exercise)
            .collect::<Result<Vec<_>>>()?;

        let mut details = Vec::with_capacity(entries.len());
        for entry in entries {
            let exercise = self.get_exercise(entry.exercise_id).await?.ok_or_else(|| {
                anyhow!(
                    "session exercise {} references missing exercise {}",
                    entry.id,
                    entry.exercise_id
                )
            })?;
            let sets = self.get_exercise_sets(entry.id).await?;
            details.push(SessionExerciseDetail {
                session_exercise: entry,
                exercise,
                sets,
            });
        }

        Ok(details)
    }

    /// Add one exercise to an existing session
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_session_exercise(
        &self,
        entry: &NewSessionExercise,
    ) -> Result<SessionExercise> {
        let result = sqlx::query(
            r"
            INSERT INTO session_exercises (session_id, exercise_id, completed)
            VALUES ($1, $2, 0)
            ",
        )
        .bind(entry.session_id)
        .bind(entry.exercise_id)
        .execute(&self.pool)
        .await?;

        Ok(SessionExercise {
            id: result.last_insert_rowid(),
            session_id: entry.session_id,
            exercise_id: entry.exercise_id,
            completed: false,
        })
    }

    /// Mark a session exercise completed
    ///
    /// Idempotent: completing an already-completed entry returns it
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn complete_session_exercise(
        &self,
        session_exercise_id: i64,
    ) -> Result<Option<SessionExercise>> {
        let row = sqlx::query(
            r"
            SELECT id, session_id, exercise_id, completed
            FROM session_exercises WHERE id = $1
            ",
        )
        .bind(session_exercise_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(entry) = row.as_ref().map(Self::row_to_session_exercise).transpose()? else {
            return Ok(None);
        };

        if entry.completed {
            return Ok(Some(entry));
        }

        sqlx::query("UPDATE session_exercises SET completed = 1 WHERE id = $1")
            .bind(session_exercise_id)
            .execute(&self.pool)
            .await?;

        Ok(Some(SessionExercise {
            completed: true,
            ..entry
        }))
    }

    /// List a session exercise's sets ordered by set number
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_exercise_sets(&self, session_exercise_id: i64) -> Result<Vec<ExerciseSet>> {
        let rows = sqlx::query(
            r"
            SELECT id, session_exercise_id, set_number, weight, reps, completed
            FROM exercise_sets WHERE session_exercise_id = $1 ORDER BY set_number ASC
            ",
        )
        .bind(session_exercise_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_exercise_set).collect()
    }

    /// Log one set under a session exercise
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_exercise_set(&self, set: &NewExerciseSet) -> Result<ExerciseSet> {
        let result = sqlx::query(
            r"
            INSERT INTO exercise_sets (session_exercise_id, set_number, weight, reps, completed)
            VALUES ($1, $2, $3, $4, 0)
            ",
        )
        .bind(set.session_exercise_id)
        .bind(set.set_number)
        .bind(set.weight)
        .bind(set.reps)
        .execute(&self.pool)
        .await?;

        Ok(ExerciseSet {
            id: result.last_insert_rowid(),
            session_exercise_id: set.session_exercise_id,
            set_number: set.set_number,
            weight: set.weight,
            reps: set.reps,
            completed: false,
        })
    }

    /// Update a set's logged weight and reps
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn update_exercise_set(
        &self,
        set_id: i64,
        update: &UpdateExerciseSet,
    ) -> Result<Option<ExerciseSet>> {
        let Some(existing) = self.get_exercise_set(set_id).await? else {
            return Ok(None);
        };

        let merged = ExerciseSet {
            weight: update.weight.or(existing.weight),
            reps: update.reps.or(existing.reps),
            ..existing
        };

        sqlx::query("UPDATE exercise_sets SET weight = $2, reps = $3 WHERE id = $1")
            .bind(merged.id)
            .bind(merged.weight)
            .bind(merged.reps)
            .execute(&self.pool)
            .await?;

        Ok(Some(merged))
    }

    /// Delete one set, returning whether it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn delete_exercise_set(&self, set_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM exercise_sets WHERE id = $1")
            .bind(set_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark a set completed and evaluate it for a personal record
    ///
    /// The record check runs only when the set carries both weight and
    /// reps; a set completed with either missing stays permissively
    /// completed with no record evaluation. Completion and any record
    /// insert commit in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails or the set's parent
    /// rows are missing.
    pub async fn complete_exercise_set(&self, set_id: i64) -> Result<Option<ExerciseSet>> {
        let Some(set) = self.get_exercise_set(set_id).await? else {
            return Ok(None);
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE exercise_sets SET completed = 1 WHERE id = $1")
            .bind(set_id)
            .execute(&mut *tx)
            .await?;

        if let (Some(weight), Some(reps)) = (set.weight, set.reps) {
            let parent = sqlx::query(
                r"
                SELECT se.exercise_id, ws.user_id
                FROM session_exercises se
                JOIN workout_sessions ws ON ws.id = se.session_id
                WHERE se.id = $1
                ",
            )
            .bind(set.session_exercise_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                anyhow!(
                    "exercise set {} has no resolvable session exercise {}",
                    set_id,
                    set.session_exercise_id
                )
            })?;

            let exercise_id: i64 = parent.get("exercise_id");
            let user_id: i64 = parent.get("user_id");

            let records = sqlx::query(
                r"
                SELECT id, user_id, exercise_id, weight, reps, date
                FROM personal_records WHERE user_id = $1 AND exercise_id = $2
                ",
            )
            .bind(user_id)
            .bind(exercise_id)
            .fetch_all(&mut *tx)
            .await?
            .iter()
            .map(Self::row_to_personal_record)
            .collect::<Result<Vec<PersonalRecord>>>()?;

            if stats::is_new_record(&records, weight, reps) {
                sqlx::query(
                    r"
                    INSERT INTO personal_records (user_id, exercise_id, weight, reps, date)
                    VALUES ($1, $2, $3, $4, $5)
                    ",
                )
                .bind(user_id)
                .bind(exercise_id)
                .bind(weight)
                .bind(reps)
                .bind(Utc::now())
                .execute(&mut *tx)
                .await?;

                info!(
                    user_id,
                    exercise_id, weight, reps, "New personal record"
                );
            }
        }

        tx.commit().await?;

        Ok(Some(ExerciseSet {
            completed: true,
            ..set
        }))
    }

    /// Get a set by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_exercise_set(&self, set_id: i64) -> Result<Option<ExerciseSet>> {
        let row = sqlx::query(
            r"
            SELECT id, session_exercise_id, set_number, weight, reps, completed
            FROM exercise_sets WHERE id = $1
            ",
        )
        .bind(set_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_exercise_set).transpose()
    }

    /// Convert a database row to a `WorkoutSession` struct
    fn row_to_session(row: &sqlx::sqlite::SqliteRow) -> Result<WorkoutSession> {
        Ok(WorkoutSession {
            id: row.get("id"),
            workout_id: row.get("workout_id"),
            user_id: row.get("user_id"),
            date: row.get("date"),
            duration_minutes: row.get("duration_minutes"),
            notes: row.get("notes"),
            completed: row.get("completed"),
        })
    }

    /// Convert a database row to a `SessionExercise` struct
    fn row_to_session_exercise(row: &sqlx::sqlite::SqliteRow) -> Result<SessionExercise> {
        Ok(SessionExercise {
            id: row.get("id"),
            session_id: row.get("session_id"),
            exercise_id: row.get("exercise_id"),
            completed: row.get("completed"),
        })
    }

    /// Convert a database row to an `ExerciseSet` struct
    fn row_to_exercise_set(row: &sqlx::sqlite::SqliteRow) -> Result<ExerciseSet> {
        Ok(ExerciseSet {
            id: row.get("id"),
            session_exercise_id: row.get("session_exercise_id"),
            set_number: row.get("set_number"),
            weight: row.get("weight"),
            reps: row.get("reps"),
            completed: row.get("completed"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::create_test_db;
    use super::Database;
    use crate::models::{NewExercise, NewWorkout, NewWorkoutExercise, NewWorkoutSession};

    async fn seed_workout_with_targets(db: &Database, targets: &[i64]) -> i64 {
        let workout = db
            .create_workout(&NewWorkout {
                name: "Push Day".to_owned(),
                user_id: 1,
            })
            .await
            .unwrap();

        for (i, sets) in targets.iter().enumerate() {
            let exercise = db
                .create_exercise(&NewExercise {
                    name: format!("Exercise {i}"),
                    description: None,
                    category: "Chest".to_owned(),
                    target_muscles: None,
                    equipment_type: None,
                    exercise_type: None,
                })
                .await
                .unwrap();
            db.create_workout_exercise(&NewWorkoutExercise {
                workout_id: workout.id,
                exercise_id: exercise.id,
                sets: *sets,
                reps: "8-10".to_owned(),
                weight: None,
                order_index: i as i64 + 1,
            })
            .await
            .unwrap();
        }

        workout.id
    }

    fn new_session(workout_id: i64) -> NewWorkoutSession {
        NewWorkoutSession {
            workout_id,
            user_id: 1,
            date: None,
            duration_minutes: None,
            notes: None,
            completed: false,
        }
    }

    #[tokio::test]
    async fn test_materialization_creates_empty_sets_per_target() {
        let db = create_test_db().await.unwrap();
        let workout_id = seed_workout_with_targets(&db, &[3, 1]).await;

        let session = db
            .create_workout_session(&new_session(workout_id), true)
            .await
            .unwrap();

        let exercises = db.get_session_exercises(session.id).await.unwrap();
        assert_eq!(exercises.len(), 2);
        assert_eq!(exercises[0].sets.len(), 3);
        assert_eq!(exercises[1].sets.len(), 1);

        for detail in &exercises {
            assert!(!detail.session_exercise.completed);
            for (i, set) in detail.sets.iter().enumerate() {
                assert_eq!(set.set_number, i as i64 + 1);
                assert!(!set.completed);
                assert!(set.weight.is_none());
                assert!(set.reps.is_none());
            }
        }
    }

    #[tokio::test]
    async fn test_completing_session_stamps_workout() {
        let db = create_test_db().await.unwrap();
        let workout_id = seed_workout_with_targets(&db, &[2]).await;

        let session = db
            .create_workout_session(&new_session(workout_id), false)
            .await
            .unwrap();
        assert!(db
            .get_workout(workout_id)
            .await
            .unwrap()
            .unwrap()
            .last_completed_at
            .is_none());

        let completed = db
            .complete_workout_session(session.id)
            .await
            .unwrap()
            .unwrap();
        assert!(completed.completed);

        let workout = db.get_workout(workout_id).await.unwrap().unwrap();
        assert_eq!(workout.last_completed_at, Some(session.date));
    }

    #[tokio::test]
    async fn test_session_exercise_completion_is_idempotent() {
        let db = create_test_db().await.unwrap();
        let workout_id = seed_workout_with_targets(&db, &[1]).await;
        let session = db
            .create_workout_session(&new_session(workout_id), true)
            .await
            .unwrap();
        let entry_id = db.get_session_exercises(session.id).await.unwrap()[0]
            .session_exercise
            .id;

        let first = db
            .complete_session_exercise(entry_id)
            .await
            .unwrap()
            .unwrap();
        let second = db
            .complete_session_exercise(entry_id)
            .await
            .unwrap()
            .unwrap();
        assert!(first.completed);
        assert!(second.completed);
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_deleting_session_removes_children() {
        let db = create_test_db().await.unwrap();
        let workout_id = seed_workout_with_targets(&db, &[2]).await;
        let session = db
            .create_workout_session(&new_session(workout_id), true)
            .await
            .unwrap();

        assert!(db.delete_workout_session(session.id).await.unwrap());
        assert!(db.get_workout_session(session.id).await.unwrap().is_none());
        assert!(db.get_session_exercises(session.id).await.unwrap().is_empty());
    }
}
