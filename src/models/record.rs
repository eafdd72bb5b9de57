// ABOUTME: Personal record model, appended when a completed set is not dominated
// ABOUTME: Records are never updated or deleted by the evaluator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

use super::Exercise;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A personal record achievement
///
/// Created automatically when a completed set is not dominated by any
/// existing record for the same user and exercise (see
/// [`crate::stats::dominates`]). Append-only: existing records are never
/// rewritten, so distinct weight tiers each keep their own best-reps entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalRecord {
    /// Unique identifier, assigned by the store
    pub id: i64,
    /// Achieving user
    pub user_id: i64,
    /// Exercise the record was set on
    pub exercise_id: i64,
    /// Weight lifted in kg
    pub weight: f64,
    /// Repetitions performed at that weight
    pub reps: i64,
    /// When the record was achieved
    pub date: DateTime<Utc>,
}

/// Payload for appending a personal record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPersonalRecord {
    /// Achieving user
    pub user_id: i64,
    /// Exercise the record was set on
    pub exercise_id: i64,
    /// Weight lifted in kg
    pub weight: f64,
    /// Repetitions performed at that weight
    pub reps: i64,
    /// When the record was achieved; the store fills in "now" when absent
    pub date: Option<DateTime<Utc>>,
}

/// Personal record annotated with its exercise, for feed views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalRecordWithExercise {
    /// The record
    #[serde(flatten)]
    pub record: PersonalRecord,
    /// The exercise it was set on
    pub exercise: Exercise,
}
