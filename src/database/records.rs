// ABOUTME: Personal record database operations
// ABOUTME: Append-only record history per user and exercise, with annotated recent listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

use super::Database;
use crate::models::{NewPersonalRecord, PersonalRecord, PersonalRecordWithExercise};
use anyhow::{anyhow, Result};
use chrono::Utc;
use sqlx::Row;

impl Database {
    /// Create the personal records table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub(super) async fn migrate_records(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS personal_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                exercise_id INTEGER NOT NULL,
                weight REAL NOT NULL,
                reps INTEGER NOT NULL,
                date DATETIME NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_personal_records_user_exercise ON personal_records(user_id, exercise_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All records a user holds for one exercise
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_personal_records(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<Vec<PersonalRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, exercise_id, weight, reps, date
            FROM personal_records WHERE user_id = $1 AND exercise_id = $2 ORDER BY id ASC
            ",
        )
        .bind(user_id)
        .bind(exercise_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_personal_record).collect()
    }

    /// A user's most recent records across all exercises, annotated
    /// with catalog details
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails or a record references
    /// a missing catalog exercise.
    pub async fn get_recent_personal_records(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<PersonalRecordWithExercise>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, exercise_id, weight, reps, date
            FROM personal_records WHERE user_id = $1 ORDER BY date DESC, id ASC LIMIT $2
            ",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let records = rows
            .iter()
            .map(Self::row_to_personal_record)
            .collect::<Result<Vec<_>>>()?;

        let mut annotated = Vec::with_capacity(records.len());
        for record in records {
            let exercise = self
                .get_exercise(record.exercise_id)
                .await?
                .ok_or_else(|| {
                    anyhow!(
                        "personal record {} references missing exercise {}",
                        record.id,
                        record.exercise_id
                    )
                })?;
            annotated.push(PersonalRecordWithExercise { record, exercise });
        }

        Ok(annotated)
    }

    /// Append a personal record
    ///
    /// Records are never updated or pruned; history keeps every entry
    /// that was best at the moment it was set.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_personal_record(
        &self,
        record: &NewPersonalRecord,
    ) -> Result<PersonalRecord> {
        let date = record.date.unwrap_or_else(Utc::now);
        let result = sqlx::query(
            r"
            INSERT INTO personal_records (user_id, exercise_id, weight, reps, date)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(record.user_id)
        .bind(record.exercise_id)
        .bind(record.weight)
        .bind(record.reps)
        .bind(date)
        .execute(&self.pool)
        .await?;

        Ok(PersonalRecord {
            id: result.last_insert_rowid(),
            user_id: record.user_id,
            exercise_id: record.exercise_id,
            weight: record.weight,
            reps: record.reps,
            date,
        })
    }

    /// Convert a database row to a `PersonalRecord` struct
    pub(super) fn row_to_personal_record(row: &sqlx::sqlite::SqliteRow) -> Result<PersonalRecord> {
        Ok(PersonalRecord {
            id: row.get("id"),
            user_id: row.get("user_id"),
            exercise_id: row.get("exercise_id"),
            weight: row.get("weight"),
            reps: row.get("reps"),
            date: row.get("date"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::create_test_db;
    use crate::models::{NewExercise, NewPersonalRecord};
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_records_accumulate_instead_of_replacing() {
        let db = create_test_db().await.unwrap();
        let exercise = db
            .create_exercise(&NewExercise {
                name: "Deadlift".to_owned(),
                description: None,
                category: "Back".to_owned(),
                target_muscles: None,
                equipment_type: None,
                exercise_type: None,
            })
            .await
            .unwrap();

        for weight in [100.0, 110.0] {
            db.create_personal_record(&NewPersonalRecord {
                user_id: 1,
                exercise_id: exercise.id,
                weight,
                reps: 5,
                date: None,
            })
            .await
            .unwrap();
        }

        let records = db.get_personal_records(1, exercise.id).await.unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_recent_records_are_newest_first_with_exercise_details() {
        let db = create_test_db().await.unwrap();
        let now = Utc::now();

        let mut ids = Vec::new();
        for (name, offset_days) in [("Squat", 3), ("Bench Press", 1), ("Deadlift", 2)] {
            let exercise = db
                .create_exercise(&NewExercise {
                    name: name.to_owned(),
                    description: None,
                    category: "Strength".to_owned(),
                    target_muscles: None,
                    equipment_type: None,
                    exercise_type: None,
                })
                .await
                .unwrap();
            ids.push(exercise.id);
            db.create_personal_record(&NewPersonalRecord {
                user_id: 1,
                exercise_id: exercise.id,
                weight: 100.0,
                reps: 5,
                date: Some(now - Duration::days(offset_days)),
            })
            .await
            .unwrap();
        }

        let recent = db.get_recent_personal_records(1, 2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].exercise.name, "Bench Press");
        assert_eq!(recent[1].exercise.name, "Deadlift");
    }
}
