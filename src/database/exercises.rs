// ABOUTME: Exercise catalog database operations
// ABOUTME: Handles catalog listing, category filtering, and exercise CRUD
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

use super::Database;
use crate::models::{Exercise, NewExercise, UpdateExercise};
use anyhow::Result;
use sqlx::Row;

impl Database {
    /// Create the exercises table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub(super) async fn migrate_exercises(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT,
                category TEXT NOT NULL,
                target_muscles TEXT,
                equipment_type TEXT,
                exercise_type TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_exercises_category ON exercises(category)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List every exercise in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_exercises(&self) -> Result<Vec<Exercise>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, description, category, target_muscles, equipment_type, exercise_type
            FROM exercises ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_exercise).collect()
    }

    /// List exercises in a single category, insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_exercises_by_category(&self, category: &str) -> Result<Vec<Exercise>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, description, category, target_muscles, equipment_type, exercise_type
            FROM exercises WHERE category = $1 ORDER BY id ASC
            ",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_exercise).collect()
    }

    /// Get an exercise by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_exercise(&self, exercise_id: i64) -> Result<Option<Exercise>> {
        let row = sqlx::query(
            r"
            SELECT id, name, description, category, target_muscles, equipment_type, exercise_type
            FROM exercises WHERE id = $1
            ",
        )
        .bind(exercise_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_exercise).transpose()
    }

    /// Create a new exercise
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_exercise(&self, exercise: &NewExercise) -> Result<Exercise> {
        let result = sqlx::query(
            r"
            INSERT INTO exercises (name, description, category, target_muscles, equipment_type, exercise_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&exercise.name)
        .bind(&exercise.description)
        .bind(&exercise.category)
        .bind(&exercise.target_muscles)
        .bind(&exercise.equipment_type)
        .bind(&exercise.exercise_type)
        .execute(&self.pool)
        .await?;

        Ok(Exercise {
            id: result.last_insert_rowid(),
            name: exercise.name.clone(),
            description: exercise.description.clone(),
            category: exercise.category.clone(),
            target_muscles: exercise.target_muscles.clone(),
            equipment_type: exercise.equipment_type.clone(),
            exercise_type: exercise.exercise_type.clone(),
        })
    }

    /// Apply a partial update to an exercise
    ///
    /// Returns the updated exercise, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn update_exercise(
        &self,
        exercise_id: i64,
        update: &UpdateExercise,
    ) -> Result<Option<Exercise>> {
        let Some(existing) = self.get_exercise(exercise_id).await? else {
            return Ok(None);
        };

        let merged = Exercise {
            id: existing.id,
            name: update.name.clone().unwrap_or(existing.name),
            description: update.description.clone().or(existing.description),
            category: update.category.clone().unwrap_or(existing.category),
            target_muscles: update.target_muscles.clone().or(existing.target_muscles),
            equipment_type: update.equipment_type.clone().or(existing.equipment_type),
            exercise_type: update.exercise_type.clone().or(existing.exercise_type),
        };

        sqlx::query(
            r"
            UPDATE exercises SET
                name = $2,
                description = $3,
                category = $4,
                target_muscles = $5,
                equipment_type = $6,
                exercise_type = $7
            WHERE id = $1
            ",
        )
        .bind(merged.id)
        .bind(&merged.name)
        .bind(&merged.description)
        .bind(&merged.category)
        .bind(&merged.target_muscles)
        .bind(&merged.equipment_type)
        .bind(&merged.exercise_type)
        .execute(&self.pool)
        .await?;

        Ok(Some(merged))
    }

    /// Delete an exercise, returning whether a row was removed
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn delete_exercise(&self, exercise_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = $1")
            .bind(exercise_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Get total number of exercises
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_exercise_count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM exercises")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("count"))
    }

    /// Convert a database row to an Exercise struct
    pub(super) fn row_to_exercise(row: &sqlx::sqlite::SqliteRow) -> Result<Exercise> {
        Ok(Exercise {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            category: row.get("category"),
            target_muscles: row.get("target_muscles"),
            equipment_type: row.get("equipment_type"),
            exercise_type: row.get("exercise_type"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::create_test_db;
    use crate::models::{NewExercise, UpdateExercise};

    fn exercise(name: &str, category: &str) -> NewExercise {
        NewExercise {
            name: name.to_owned(),
            description: None,
            category: category.to_owned(),
            target_muscles: None,
            equipment_type: None,
            exercise_type: None,
        }
    }

    #[tokio::test]
    async fn test_category_filter_returns_matching_subset() {
        let db = create_test_db().await.unwrap();
        db.create_exercise(&exercise("Bench Press", "Chest"))
            .await
            .unwrap();
        db.create_exercise(&exercise("Squat", "Legs")).await.unwrap();
        db.create_exercise(&exercise("Leg Press", "Legs"))
            .await
            .unwrap();

        let legs = db.get_exercises_by_category("Legs").await.unwrap();
        assert_eq!(legs.len(), 2);
        assert!(legs.iter().all(|e| e.category == "Legs"));

        let all = db.get_exercises().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "Bench Press");
    }

    #[tokio::test]
    async fn test_partial_update_merges_fields() {
        let db = create_test_db().await.unwrap();
        let created = db
            .create_exercise(&exercise("Bench Press", "Chest"))
            .await
            .unwrap();

        let updated = db
            .update_exercise(
                created.id,
                &UpdateExercise {
                    description: Some("Barbell press on a flat bench".to_owned()),
                    ..UpdateExercise::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Bench Press");
        assert_eq!(
            updated.description.as_deref(),
            Some("Barbell press on a flat bench")
        );

        assert!(db
            .update_exercise(999, &UpdateExercise::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_whether_row_existed() {
        let db = create_test_db().await.unwrap();
        let created = db
            .create_exercise(&exercise("Bench Press", "Chest"))
            .await
            .unwrap();

        assert!(db.delete_exercise(created.id).await.unwrap());
        assert!(!db.delete_exercise(created.id).await.unwrap());
        assert_eq!(db.get_exercise_count().await.unwrap(), 0);
    }
}
