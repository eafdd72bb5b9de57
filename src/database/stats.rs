// ABOUTME: Aggregate training statistics queries
// ABOUTME: Weekly session counts, lifted-volume totals, and per-day volume breakdowns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

use super::Database;
use crate::models::DayWeight;
use crate::stats;
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use sqlx::Row;

impl Database {
    /// Completed sessions inside the week containing `now`
    ///
    /// The week runs Sunday midnight UTC to the following Sunday,
    /// half-open.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_weekly_workout_count(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<i64> {
        let (start, end) = stats::week_window(now);

        let row = sqlx::query(
            r"
            SELECT COUNT(*) AS count FROM workout_sessions
            WHERE user_id = $1 AND completed = 1 AND date >= $2 AND date < $3
            ",
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("count"))
    }

    /// Total volume lifted since `since`
    ///
    /// Counts weight times reps over completed sets of completed
    /// session exercises. The session's own completed flag does not
    /// gate inclusion, and sets missing weight or reps contribute
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_total_weight(&self, user_id: i64, since: DateTime<Utc>) -> Result<f64> {
        let row = sqlx::query(
            r"
            SELECT COALESCE(SUM(es.weight * es.reps), 0.0) AS total
            FROM exercise_sets es
            JOIN session_exercises se ON se.id = es.session_exercise_id
            JOIN workout_sessions ws ON ws.id = se.session_id
            WHERE ws.user_id = $1
              AND ws.date >= $2
              AND se.completed = 1
              AND es.completed = 1
              AND es.weight IS NOT NULL
              AND es.reps IS NOT NULL
            ",
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("total"))
    }

    /// Volume per elapsed-day bucket over a trailing window, oldest
    /// bucket first
    ///
    /// Buckets are whole 24-hour blocks counted back from `now`, and
    /// each carries the single-letter weekday label of its calendar
    /// day. Inclusion filters match [`Self::get_total_weight`].
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or `days` is
    /// negative.
    pub async fn get_weight_by_day(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
        days: i64,
    ) -> Result<Vec<DayWeight>> {
        let since = now - Duration::days(days);

        let rows = sqlx::query(
            r"
            SELECT ws.date AS date, es.weight AS weight, es.reps AS reps
            FROM exercise_sets es
            JOIN session_exercises se ON se.id = es.session_exercise_id
            JOIN workout_sessions ws ON ws.id = se.session_id
            WHERE ws.user_id = $1
              AND ws.date >= $2
              AND se.completed = 1
              AND es.completed = 1
              AND es.weight IS NOT NULL
              AND es.reps IS NOT NULL
            ",
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        let mut totals = vec![0.0_f64; usize::try_from(days)?];
        for row in &rows {
            let date: DateTime<Utc> = row.get("date");
            let bucket = stats::days_ago(now, date);
            if !(0..days).contains(&bucket) {
                continue;
            }
            let idx = usize::try_from(days - 1 - bucket)?;
            totals[idx] += stats::set_volume(row.get("weight"), row.get("reps"));
        }

        let breakdown = stats::day_labels(now, usize::try_from(days)?)
            .into_iter()
            .zip(totals)
            .map(|(day, weight)| DayWeight {
                day: day.to_owned(),
                weight,
            })
            .collect();

        Ok(breakdown)
    }
}
