// ABOUTME: Exercise set route handlers for logging individual lifts
// ABOUTME: Completing a set triggers the personal-record evaluation in storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! Exercise set routes
//!
//! Sets are the unit of actual logging: the client fills in weight and reps,
//! then marks the set complete. Completion is where personal records get
//! detected, inside the storage layer. There is no standalone delete; sets
//! leave the system with their session.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{post, put},
    Json, Router,
};

use crate::database_plugins::DatabaseProvider;
use crate::errors::AppError;
use crate::models::{NewExerciseSet, UpdateExerciseSet};
use crate::server::ServerResources;

/// Exercise set routes
pub struct SetRoutes;

impl SetRoutes {
    /// Create all exercise set routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/exercise-sets", post(Self::handle_create_set))
            .route("/api/exercise-sets/:id", put(Self::handle_update_set))
            .route(
                "/api/exercise-sets/:id/complete",
                put(Self::handle_complete_set),
            )
            .with_state(resources)
    }

    /// Log an additional set under a session exercise
    async fn handle_create_set(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<NewExerciseSet>,
    ) -> Result<Response, AppError> {
        if request.set_number < 1 {
            return Err(AppError::invalid_field("set_number", "must be at least 1"));
        }

        let set = resources
            .database
            .create_exercise_set(&request)
            .await
            .map_err(|e| AppError::database(format!("Failed to create set: {e}")))?;

        Ok((StatusCode::CREATED, Json(set)).into_response())
    }

    /// Update a set's logged weight and reps
    async fn handle_update_set(
        State(resources): State<Arc<ServerResources>>,
        Path(set_id): Path<i64>,
        Json(update): Json<UpdateExerciseSet>,
    ) -> Result<Response, AppError> {
        let set = resources
            .database
            .update_exercise_set(set_id, &update)
            .await
            .map_err(|e| AppError::database(format!("Failed to update set: {e}")))?
            .ok_or_else(|| AppError::not_found("Exercise set"))?;

        Ok((StatusCode::OK, Json(set)).into_response())
    }

    /// Mark a set performed, evaluating it for a personal record
    async fn handle_complete_set(
        State(resources): State<Arc<ServerResources>>,
        Path(set_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let set = resources
            .database
            .complete_exercise_set(set_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to complete set: {e}")))?
            .ok_or_else(|| AppError::not_found("Exercise set"))?;

        Ok((StatusCode::OK, Json(set)).into_response())
    }
}
