// ABOUTME: Workout template route handlers for routine CRUD and entry lists
// ABOUTME: Submitted exercise arrays become ordered entries, position plus one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! Workout template routes
//!
//! A workout is a reusable routine: a name plus an ordered list of exercise
//! entries with set/rep targets. Creation accepts the entry list inline, and
//! updates may replace it wholesale; in both cases entry order follows the
//! submitted array order.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use crate::constants::defaults;
use crate::database_plugins::DatabaseProvider;
use crate::errors::AppError;
use crate::models::{NewWorkout, NewWorkoutExercise, UpdateWorkout};
use crate::server::ServerResources;

/// Query parameters for the workout listing
#[derive(Debug, Deserialize)]
pub struct WorkoutListQuery {
    /// Owner; the single-user default applies when absent
    pub user_id: Option<i64>,
}

/// One exercise entry in a workout payload
#[derive(Debug, Deserialize)]
pub struct WorkoutExercisePayload {
    /// Catalog exercise to target
    pub exercise_id: i64,
    /// Target number of sets (>= 1)
    pub sets: i64,
    /// Target reps, free text like "8-10"
    pub reps: String,
    /// Target weight, free text like "60" or "bodyweight"
    pub weight: Option<String>,
}

/// Request body for creating a workout
#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRequest {
    /// Routine name
    pub name: String,
    /// Owner; the single-user default applies when absent
    pub user_id: Option<i64>,
    /// Exercise entries in execution order
    #[serde(default)]
    pub exercises: Vec<WorkoutExercisePayload>,
}

/// Request body for updating a workout
#[derive(Debug, Deserialize)]
pub struct UpdateWorkoutRequest {
    /// New routine name
    pub name: Option<String>,
    /// Replacement entry list; absent leaves existing entries alone
    pub exercises: Option<Vec<WorkoutExercisePayload>>,
}

/// Workout template routes
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout template routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workouts", get(Self::handle_list_workouts))
            .route("/api/workouts", post(Self::handle_create_workout))
            .route("/api/workouts/:id", get(Self::handle_get_workout))
            .route("/api/workouts/:id", put(Self::handle_update_workout))
            .route("/api/workouts/:id", delete(Self::handle_delete_workout))
            .with_state(resources)
    }

    /// Check entry targets and catalog references before any write happens
    async fn validate_entries(
        resources: &Arc<ServerResources>,
        payloads: &[WorkoutExercisePayload],
    ) -> Result<(), AppError> {
        for payload in payloads {
            if payload.sets < 1 {
                return Err(AppError::invalid_field("sets", "must be at least 1"));
            }
            let exists = resources
                .database
                .get_exercise(payload.exercise_id)
                .await
                .map_err(|e| AppError::database(format!("Failed to check exercise: {e}")))?
                .is_some();
            if !exists {
                return Err(AppError::invalid_field(
                    "exercise_id",
                    format!("exercise {} does not exist", payload.exercise_id),
                ));
            }
        }
        Ok(())
    }

    /// Entry payloads as storage rows, ordered by submission position
    fn entries_for(workout_id: i64, payloads: &[WorkoutExercisePayload]) -> Vec<NewWorkoutExercise> {
        (1_i64..)
            .zip(payloads.iter())
            .map(|(order_index, payload)| NewWorkoutExercise {
                workout_id,
                exercise_id: payload.exercise_id,
                sets: payload.sets,
                reps: payload.reps.clone(),
                weight: payload.weight.clone(),
                order_index,
            })
            .collect()
    }

    /// List a user's workouts
    async fn handle_list_workouts(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<WorkoutListQuery>,
    ) -> Result<Response, AppError> {
        let user_id = query.user_id.unwrap_or(defaults::USER_ID);
        let workouts = resources
            .database
            .get_workouts(user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        Ok((StatusCode::OK, Json(workouts)).into_response())
    }

    /// Fetch a workout with its ordered, annotated entries
    async fn handle_get_workout(
        State(resources): State<Arc<ServerResources>>,
        Path(workout_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let workout = resources
            .database
            .get_workout_with_exercises(workout_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to get workout: {e}")))?
            .ok_or_else(|| AppError::not_found("Workout"))?;

        Ok((StatusCode::OK, Json(workout)).into_response())
    }

    /// Create a workout, optionally with its exercise entries
    async fn handle_create_workout(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreateWorkoutRequest>,
    ) -> Result<Response, AppError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::missing_field("name"));
        }
        Self::validate_entries(&resources, &request.exercises).await?;

        let payload = NewWorkout {
            name: name.to_owned(),
            user_id: request.user_id.unwrap_or(defaults::USER_ID),
        };
        let workout = resources
            .database
            .create_workout(&payload)
            .await
            .map_err(|e| AppError::database(format!("Failed to create workout: {e}")))?;

        for entry in Self::entries_for(workout.id, &request.exercises) {
            resources
                .database
                .create_workout_exercise(&entry)
                .await
                .map_err(|e| AppError::database(format!("Failed to add workout entry: {e}")))?;
        }

        let view = resources
            .database
            .get_workout_with_exercises(workout.id)
            .await
            .map_err(|e| AppError::database(format!("Failed to load workout: {e}")))?
            .ok_or_else(|| AppError::internal("Created workout could not be read back"))?;

        info!(
            workout_id = workout.id,
            entries = view.exercises.len(),
            "Created workout"
        );
        Ok((StatusCode::CREATED, Json(view)).into_response())
    }

    /// Update a workout's name and, when supplied, replace its entry list
    async fn handle_update_workout(
        State(resources): State<Arc<ServerResources>>,
        Path(workout_id): Path<i64>,
        Json(request): Json<UpdateWorkoutRequest>,
    ) -> Result<Response, AppError> {
        if let Some(name) = &request.name {
            if name.trim().is_empty() {
                return Err(AppError::invalid_field("name", "must not be empty"));
            }
        }
        if let Some(payloads) = &request.exercises {
            Self::validate_entries(&resources, payloads).await?;
        }

        let update = UpdateWorkout {
            name: request.name.map(|name| name.trim().to_owned()),
        };
        resources
            .database
            .update_workout(workout_id, &update)
            .await
            .map_err(|e| AppError::database(format!("Failed to update workout: {e}")))?
            .ok_or_else(|| AppError::not_found("Workout"))?;

        if let Some(payloads) = &request.exercises {
            let entries = Self::entries_for(workout_id, payloads);
            resources
                .database
                .replace_workout_exercises(workout_id, &entries)
                .await
                .map_err(|e| {
                    AppError::database(format!("Failed to replace workout entries: {e}"))
                })?;
        }

        let view = resources
            .database
            .get_workout_with_exercises(workout_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to load workout: {e}")))?
            .ok_or_else(|| AppError::not_found("Workout"))?;

        Ok((StatusCode::OK, Json(view)).into_response())
    }

    /// Delete a workout and its entries
    async fn handle_delete_workout(
        State(resources): State<Arc<ServerResources>>,
        Path(workout_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let deleted = resources
            .database
            .delete_workout(workout_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete workout: {e}")))?;
        if !deleted {
            return Err(AppError::not_found("Workout"));
        }

        info!(workout_id, "Deleted workout");
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
