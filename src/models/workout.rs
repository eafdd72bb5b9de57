// ABOUTME: Workout routine template and its ordered per-exercise target entries
// ABOUTME: Composite views annotate entries with the full catalog exercise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

use super::Exercise;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reusable workout routine template
///
/// Owns an ordered list of [`WorkoutExercise`] entries. `last_completed_at`
/// is only ever written by the session completion cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Unique identifier, assigned by the store
    pub id: i64,
    /// Routine name
    pub name: String,
    /// Owning user
    pub user_id: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Date of the most recent completed session, set by completion cascades
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_completed_at: Option<DateTime<Utc>>,
}

/// One exercise entry within a workout template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutExercise {
    /// Unique identifier, assigned by the store
    pub id: i64,
    /// Owning workout
    pub workout_id: i64,
    /// Catalog exercise this entry targets
    pub exercise_id: i64,
    /// Target number of sets (>= 1)
    pub sets: i64,
    /// Target reps, free text like "8-10" or "12"
    pub reps: String,
    /// Target weight, free text like "60" or "bodyweight"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    /// Display/execution position, unique within the workout
    pub order_index: i64,
}

/// Payload for creating a workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkout {
    /// Routine name
    pub name: String,
    /// Owning user
    pub user_id: i64,
}

/// Partial update for a workout; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWorkout {
    /// New routine name
    pub name: Option<String>,
}

/// Payload for creating a workout-exercise entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkoutExercise {
    /// Owning workout
    pub workout_id: i64,
    /// Catalog exercise
    pub exercise_id: i64,
    /// Target number of sets (>= 1)
    pub sets: i64,
    /// Target reps, free text
    pub reps: String,
    /// Target weight, free text
    pub weight: Option<String>,
    /// Display/execution position
    pub order_index: i64,
}

/// Partial update for a workout-exercise entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWorkoutExercise {
    /// New catalog exercise
    pub exercise_id: Option<i64>,
    /// New target set count
    pub sets: Option<i64>,
    /// New target reps
    pub reps: Option<String>,
    /// New target weight
    pub weight: Option<String>,
    /// New position
    pub order_index: Option<i64>,
}

/// Workout-exercise entry annotated with its full catalog exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutExerciseDetail {
    /// The template entry
    #[serde(flatten)]
    pub workout_exercise: WorkoutExercise,
    /// The catalog exercise it references
    pub exercise: Exercise,
}

/// Workout with its exercise entries ordered by `order_index` ascending
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutWithExercises {
    /// The workout template
    #[serde(flatten)]
    pub workout: Workout,
    /// Annotated entries, ordered by position
    pub exercises: Vec<WorkoutExerciseDetail>,
}
