// ABOUTME: Workout template database operations
// ABOUTME: Handles workout CRUD and the ordered workout-exercise entries under each template
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

use super::Database;
use crate::models::{
    NewWorkout, NewWorkoutExercise, UpdateWorkout, UpdateWorkoutExercise, Workout,
    WorkoutExercise, WorkoutExerciseDetail, WorkoutWithExercises,
};
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, Sqlite, Transaction};

impl Database {
    /// Create the workouts and `workout_exercises` tables
    ///
    /// Foreign keys are stored as plain integers. Cascades run in the
    /// operations below, keeping deletion semantics identical to the
    /// in-memory backend (historical sessions keep dangling workout
    /// references on purpose).
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub(super) async fn migrate_workouts(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                user_id INTEGER NOT NULL,
                created_at DATETIME NOT NULL,
                last_completed_at DATETIME
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workout_id INTEGER NOT NULL,
                exercise_id INTEGER NOT NULL,
                sets INTEGER NOT NULL,
                reps TEXT NOT NULL,
                weight TEXT,
                order_index INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_workouts_user_id ON workouts(user_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_exercises_workout_id ON workout_exercises(workout_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List a user's workouts in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_workouts(&self, user_id: i64) -> Result<Vec<Workout>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, user_id, created_at, last_completed_at
            FROM workouts WHERE user_id = $1 ORDER BY id ASC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_workout).collect()
    }

    /// Get a workout by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_workout(&self, workout_id: i64) -> Result<Option<Workout>> {
        let row = sqlx::query(
            r"
            SELECT id, name, user_id, created_at, last_completed_at
            FROM workouts WHERE id = $1
            ",
        )
        .bind(workout_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_workout).transpose()
    }

    /// Get a workout with its exercise entries, ordered and annotated
    ///
    /// Returns `None` if the workout does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or an entry references a
    /// missing catalog exercise.
    pub async fn get_workout_with_exercises(
        &self,
        workout_id: i64,
    ) -> Result<Option<WorkoutWithExercises>> {
        let Some(workout) = self.get_workout(workout_id).await? else {
            return Ok(None);
        };

        let exercises = self.get_workout_exercises(workout_id).await?;
        Ok(Some(WorkoutWithExercises { workout, exercises }))
    }

    /// Create a new workout
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_workout(&self, workout: &NewWorkout) -> Result<Workout> {
        let created_at = Utc::now();
        let result = sqlx::query(
            r"
            INSERT INTO workouts (name, user_id, created_at, last_completed_at)
            VALUES ($1, $2, $3, NULL)
            ",
        )
        .bind(&workout.name)
        .bind(workout.user_id)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(Workout {
            id: result.last_insert_rowid(),
            name: workout.name.clone(),
            user_id: workout.user_id,
            created_at,
            last_completed_at: None,
        })
    }

    /// Apply a partial update to a workout
    ///
    /// Returns the updated workout, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn update_workout(
        &self,
        workout_id: i64,
        update: &UpdateWorkout,
    ) -> Result<Option<Workout>> {
        let Some(existing) = self.get_workout(workout_id).await? else {
            return Ok(None);
        };

        let merged = Workout {
            name: update.name.clone().unwrap_or(existing.name),
            ..existing
        };

        sqlx::query("UPDATE workouts SET name = $2 WHERE id = $1")
            .bind(merged.id)
            .bind(&merged.name)
            .execute(&self.pool)
            .await?;

        Ok(Some(merged))
    }

    /// Delete a workout and its exercise entries
    ///
    /// Historical sessions referencing the workout are retained. Returns
    /// whether the workout row existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub async fn delete_workout(&self, workout_id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM workout_exercises WHERE workout_id = $1")
            .bind(workout_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(workout_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Stamp a workout's last-completed timestamp
    ///
    /// A missing workout is tolerated: sessions may outlive their
    /// workout, in which case the cascade has nothing to update.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub(super) async fn set_workout_last_completed(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        workout_id: i64,
        completed_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query("UPDATE workouts SET last_completed_at = $2 WHERE id = $1")
            .bind(workout_id)
            .bind(completed_at)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// List a workout's exercise entries ordered by `order_index`, each
    /// annotated with its catalog exercise
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or an entry references a
    /// missing catalog exercise.
    pub async fn get_workout_exercises(
        &self,
        workout_id: i64,
    ) -> Result<Vec<WorkoutExerciseDetail>> {
        let entries = self.get_workout_exercise_rows(workout_id).await?;

        let mut details = Vec::with_capacity(entries.len());
        for entry in entries {
            let exercise = self.get_exercise(entry.exercise_id).await?.ok_or_else(|| {
                anyhow!(
                    "workout exercise {} references missing exercise {}",
                    entry.id,
                    entry.exercise_id
                )
            })?;
            details.push(WorkoutExerciseDetail {
                workout_exercise: entry,
                exercise,
            });
        }

        Ok(details)
    }

    /// List a workout's raw exercise entries ordered by `order_index`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub(super) async fn get_workout_exercise_rows(
        &self,
        workout_id: i64,
    ) -> Result<Vec<WorkoutExercise>> {
        let rows = sqlx::query(
            r"
            SELECT id, workout_id, exercise_id, sets, reps, weight, order_index
            FROM workout_exercises WHERE workout_id = $1 ORDER BY order_index ASC
            ",
        )
        .bind(workout_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_workout_exercise).collect()
    }

    /// Add one exercise entry to a workout
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_workout_exercise(
        &self,
        entry: &NewWorkoutExercise,
    ) -> Result<WorkoutExercise> {
        let result = sqlx::query(
            r"
            INSERT INTO workout_exercises (workout_id, exercise_id, sets, reps, weight, order_index)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(entry.workout_id)
        .bind(entry.exercise_id)
        .bind(entry.sets)
        .bind(&entry.reps)
        .bind(&entry.weight)
        .bind(entry.order_index)
        .execute(&self.pool)
        .await?;

        Ok(WorkoutExercise {
            id: result.last_insert_rowid(),
            workout_id: entry.workout_id,
            exercise_id: entry.exercise_id,
            sets: entry.sets,
            reps: entry.reps.clone(),
            weight: entry.weight.clone(),
            order_index: entry.order_index,
        })
    }

    /// Apply a partial update to a workout-exercise entry
    ///
    /// Returns the updated entry, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn update_workout_exercise(
        &self,
        workout_exercise_id: i64,
        update: &UpdateWorkoutExercise,
    ) -> Result<Option<WorkoutExercise>> {
        let row = sqlx::query(
            r"
            SELECT id, workout_id, exercise_id, sets, reps, weight, order_index
            FROM workout_exercises WHERE id = $1
            ",
        )
        .bind(workout_exercise_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(existing) = row.as_ref().map(Self::row_to_workout_exercise).transpose()? else {
            return Ok(None);
        };

        let merged = WorkoutExercise {
            id: existing.id,
            workout_id: existing.workout_id,
            exercise_id: update.exercise_id.unwrap_or(existing.exercise_id),
            sets: update.sets.unwrap_or(existing.sets),
            reps: update.reps.clone().unwrap_or(existing.reps),
            weight: update.weight.clone().or(existing.weight),
            order_index: update.order_index.unwrap_or(existing.order_index),
        };

        sqlx::query(
            r"
            UPDATE workout_exercises SET
                exercise_id = $2,
                sets = $3,
                reps = $4,
                weight = $5,
                order_index = $6
            WHERE id = $1
            ",
        )
        .bind(merged.id)
        .bind(merged.exercise_id)
        .bind(merged.sets)
        .bind(&merged.reps)
        .bind(&merged.weight)
        .bind(merged.order_index)
        .execute(&self.pool)
        .await?;

        Ok(Some(merged))
    }

    /// Delete one workout-exercise entry, returning whether it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn delete_workout_exercise(&self, workout_exercise_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM workout_exercises WHERE id = $1")
            .bind(workout_exercise_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every exercise entry under a workout
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn delete_workout_exercises_by_workout(&self, workout_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM workout_exercises WHERE workout_id = $1")
            .bind(workout_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Replace a workout's exercise list atomically
    ///
    /// Existing entries are deleted and the new ones inserted in a
    /// single transaction, preserving submission order via the entries'
    /// `order_index` values.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub async fn replace_workout_exercises(
        &self,
        workout_id: i64,
        entries: &[NewWorkoutExercise],
    ) -> Result<Vec<WorkoutExercise>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM workout_exercises WHERE workout_id = $1")
            .bind(workout_id)
            .execute(&mut *tx)
            .await?;

        let mut created = Vec::with_capacity(entries.len());
        for entry in entries {
            let result = sqlx::query(
                r"
                INSERT INTO workout_exercises (workout_id, exercise_id, sets, reps, weight, order_index)
                VALUES ($1, $2, $3, $4, $5, $6)
                ",
            )
            .bind(workout_id)
            .bind(entry.exercise_id)
            .bind(entry.sets)
            .bind(&entry.reps)
            .bind(&entry.weight)
            .bind(entry.order_index)
            .execute(&mut *tx)
            .await?;

            created.push(WorkoutExercise {
                id: result.last_insert_rowid(),
                workout_id,
                exercise_id: entry.exercise_id,
                sets: entry.sets,
                reps: entry.reps.clone(),
                weight: entry.weight.clone(),
                order_index: entry.order_index,
            });
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Convert a database row to a Workout struct
    fn row_to_workout(row: &sqlx::sqlite::SqliteRow) -> Result<Workout> {
        Ok(Workout {
            id: row.get("id"),
            name: row.get("name"),
            user_id: row.get("user_id"),
            created_at: row.get("created_at"),
            last_completed_at: row.get("last_completed_at"),
        })
    }

    /// Convert a database row to a `WorkoutExercise` struct
    fn row_to_workout_exercise(row: &sqlx::sqlite::SqliteRow) -> Result<WorkoutExercise> {
        Ok(WorkoutExercise {
            id: row.get("id"),
            workout_id: row.get("workout_id"),
            exercise_id: row.get("exercise_id"),
            sets: row.get("sets"),
            reps: row.get("reps"),
            weight: row.get("weight"),
            order_index: row.get("order_index"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::create_test_db;
    use super::Database;
    use crate::models::{NewExercise, NewWorkout, NewWorkoutExercise};

    async fn seed_exercise(db: &Database, name: &str) -> i64 {
        db.create_exercise(&NewExercise {
            name: name.to_owned(),
            description: None,
            category: "Chest".to_owned(),
            target_muscles: None,
            equipment_type: None,
            exercise_type: None,
        })
        .await
        .unwrap()
        .id
    }

    fn entry(workout_id: i64, exercise_id: i64, order_index: i64) -> NewWorkoutExercise {
        NewWorkoutExercise {
            workout_id,
            exercise_id,
            sets: 3,
            reps: "8-10".to_owned(),
            weight: None,
            order_index,
        }
    }

    #[tokio::test]
    async fn test_workout_exercises_come_back_in_submission_order() {
        let db = create_test_db().await.unwrap();
        let first = seed_exercise(&db, "Bench Press").await;
        let second = seed_exercise(&db, "Incline Press").await;

        let workout = db
            .create_workout(&NewWorkout {
                name: "Push Day".to_owned(),
                user_id: 1,
            })
            .await
            .unwrap();

        db.create_workout_exercise(&entry(workout.id, first, 1))
            .await
            .unwrap();
        db.create_workout_exercise(&entry(workout.id, second, 2))
            .await
            .unwrap();

        let composite = db
            .get_workout_with_exercises(workout.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(composite.exercises.len(), 2);
        assert_eq!(composite.exercises[0].exercise.name, "Bench Press");
        assert_eq!(composite.exercises[1].exercise.name, "Incline Press");
    }

    #[tokio::test]
    async fn test_missing_catalog_exercise_is_an_integrity_error() {
        let db = create_test_db().await.unwrap();
        let workout = db
            .create_workout(&NewWorkout {
                name: "Push Day".to_owned(),
                user_id: 1,
            })
            .await
            .unwrap();

        db.create_workout_exercise(&entry(workout.id, 42, 1))
            .await
            .unwrap();

        assert!(db.get_workout_exercises(workout.id).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_workout_removes_its_entries() {
        let db = create_test_db().await.unwrap();
        let exercise_id = seed_exercise(&db, "Bench Press").await;
        let workout = db
            .create_workout(&NewWorkout {
                name: "Push Day".to_owned(),
                user_id: 1,
            })
            .await
            .unwrap();
        db.create_workout_exercise(&entry(workout.id, exercise_id, 1))
            .await
            .unwrap();

        assert!(db.delete_workout(workout.id).await.unwrap());
        assert!(db.get_workout(workout.id).await.unwrap().is_none());
        assert!(db
            .get_workout_exercise_rows(workout.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_replace_swaps_the_entry_list_atomically() {
        let db = create_test_db().await.unwrap();
        let first = seed_exercise(&db, "Bench Press").await;
        let second = seed_exercise(&db, "Incline Press").await;
        let workout = db
            .create_workout(&NewWorkout {
                name: "Push Day".to_owned(),
                user_id: 1,
            })
            .await
            .unwrap();
        db.create_workout_exercise(&entry(workout.id, first, 1))
            .await
            .unwrap();

        let replaced = db
            .replace_workout_exercises(workout.id, &[entry(workout.id, second, 1)])
            .await
            .unwrap();
        assert_eq!(replaced.len(), 1);
        assert_eq!(replaced[0].exercise_id, second);

        let rows = db.get_workout_exercise_rows(workout.id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].exercise_id, second);
    }
}
