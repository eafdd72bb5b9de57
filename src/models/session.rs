// ABOUTME: Workout session, per-session exercise records, and logged sets
// ABOUTME: Completion flags transition one way; cascades live in the storage layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

use super::{Exercise, Workout};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One performed instance of a workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
    /// Unique identifier, assigned by the store
    pub id: i64,
    /// The workout template this session performs
    pub workout_id: i64,
    /// Performing user
    pub user_id: i64,
    /// When the session took place (defaults to creation time)
    pub date: DateTime<Utc>,
    /// Session length in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    /// Free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Whether the user marked the session done
    pub completed: bool,
}

/// One exercise's performance record within a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionExercise {
    /// Unique identifier, assigned by the store
    pub id: i64,
    /// Owning session
    pub session_id: i64,
    /// Catalog exercise being performed
    pub exercise_id: i64,
    /// Whether every planned set is done
    pub completed: bool,
}

/// One logged attempt (weight x reps) within a session-exercise
///
/// Created empty at session start and filled in as the user lifts. Weight is
/// in kg throughout; there is no unit conversion anywhere in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseSet {
    /// Unique identifier, assigned by the store
    pub id: i64,
    /// Owning session-exercise
    pub session_exercise_id: i64,
    /// 1-based position within the session-exercise
    pub set_number: i64,
    /// Weight lifted in kg
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Repetitions performed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<i64>,
    /// Whether the set was performed
    pub completed: bool,
}

/// Payload for creating a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkoutSession {
    /// The workout template to perform
    pub workout_id: i64,
    /// Performing user
    pub user_id: i64,
    /// Session date; the store fills in "now" when absent
    pub date: Option<DateTime<Utc>>,
    /// Session length in minutes
    pub duration_minutes: Option<i64>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Create the session already marked done
    #[serde(default)]
    pub completed: bool,
}

/// Partial update for a session; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWorkoutSession {
    /// New session date
    pub date: Option<DateTime<Utc>>,
    /// New duration
    pub duration_minutes: Option<i64>,
    /// New notes
    pub notes: Option<String>,
    /// New completion flag (one-way; used by create-as-completed flows)
    pub completed: Option<bool>,
}

/// Payload for creating a session-exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSessionExercise {
    /// Owning session
    pub session_id: i64,
    /// Catalog exercise being performed
    pub exercise_id: i64,
}

/// Payload for creating an exercise set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExerciseSet {
    /// Owning session-exercise
    pub session_exercise_id: i64,
    /// 1-based position within the session-exercise
    pub set_number: i64,
    /// Weight lifted in kg
    pub weight: Option<f64>,
    /// Repetitions performed
    pub reps: Option<i64>,
}

/// Partial update for an exercise set; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExerciseSet {
    /// New weight in kg
    pub weight: Option<f64>,
    /// New rep count
    pub reps: Option<i64>,
}

/// Session annotated with its parent workout, for list views
///
/// The workout is optional: deleting a workout keeps its historical sessions,
/// which then carry a dangling reference that list views tolerate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionWithWorkout {
    /// The session
    #[serde(flatten)]
    pub session: WorkoutSession,
    /// Parent workout, when it still exists
    pub workout: Option<Workout>,
}

/// Session-exercise annotated with its exercise and ordered sets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionExerciseDetail {
    /// The performance record
    #[serde(flatten)]
    pub session_exercise: SessionExercise,
    /// The catalog exercise being performed
    pub exercise: Exercise,
    /// Logged sets ordered by set number
    pub sets: Vec<ExerciseSet>,
}

/// Full session view: session, parent workout, and per-exercise details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSessionDetail {
    /// The session
    #[serde(flatten)]
    pub session: WorkoutSession,
    /// Parent workout (the detail view requires it to exist)
    pub workout: Workout,
    /// Per-exercise performance records with their sets
    pub exercises: Vec<SessionExerciseDetail>,
}
