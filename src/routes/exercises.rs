// ABOUTME: Exercise catalog route handlers for browsing and catalog maintenance
// ABOUTME: Category filters accept any case; "All" is a wildcard, never stored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! Exercise catalog routes
//!
//! The catalog is shared by every user. Categories come from the fixed
//! [`ExerciseCategory`] list; stored exercises always carry the canonical
//! spelling, so a filter for `chest` and one for `Chest` return the same
//! rows.

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

use crate::database_plugins::DatabaseProvider;
use crate::errors::AppError;
use crate::models::{Exercise, ExerciseCategory, NewExercise, UpdateExercise};
use crate::server::ServerResources;

/// Query parameters for the catalog listing
#[derive(Debug, Deserialize)]
pub struct ExerciseListQuery {
    /// Category filter; absent or `All` returns the whole catalog
    pub category: Option<String>,
}

/// Exercise catalog routes
pub struct ExerciseRoutes;

impl ExerciseRoutes {
    /// Create all exercise catalog routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/exercises", get(Self::handle_list_exercises))
            .route("/api/exercises", post(Self::handle_create_exercise))
            .route("/api/exercises/categories", get(Self::handle_list_categories))
            .route("/api/exercises/:id", get(Self::handle_get_exercise))
            .route("/api/exercises/:id", put(Self::handle_update_exercise))
            .route("/api/exercises/:id", delete(Self::handle_delete_exercise))
            .with_state(resources)
    }

    /// Parse a category filter or payload value into the fixed list
    fn parse_category(raw: &str) -> Result<ExerciseCategory, AppError> {
        raw.parse::<ExerciseCategory>()
            .map_err(|reason| AppError::invalid_field("category", reason))
    }

    /// A category that may be stored on an exercise (any but the wildcard)
    fn storable_category(raw: &str) -> Result<ExerciseCategory, AppError> {
        let category = Self::parse_category(raw)?;
        if category.is_wildcard() {
            return Err(AppError::invalid_field(
                "category",
                "\"All\" is a filter, not a storable category",
            ));
        }
        Ok(category)
    }

    /// List the catalog, optionally filtered by category
    async fn handle_list_exercises(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<ExerciseListQuery>,
    ) -> Result<Response, AppError> {
        let exercises: Vec<Exercise> = match query.category.as_deref() {
            None => resources.database.get_exercises().await,
            Some(raw) => {
                let category = Self::parse_category(raw)?;
                if category.is_wildcard() {
                    resources.database.get_exercises().await
                } else {
                    resources
                        .database
                        .get_exercises_by_category(category.as_str())
                        .await
                }
            }
        }
        .map_err(|e| AppError::database(format!("Failed to list exercises: {e}")))?;

        Ok((StatusCode::OK, Json(exercises)).into_response())
    }

    /// List every category name, wildcard first
    async fn handle_list_categories() -> Response {
        let categories: Vec<&'static str> = ExerciseCategory::ALL
            .iter()
            .map(|category| category.as_str())
            .collect();
        (StatusCode::OK, Json(categories)).into_response()
    }

    /// Look up one catalog exercise
    async fn handle_get_exercise(
        State(resources): State<Arc<ServerResources>>,
        Path(exercise_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let exercise = resources
            .database
            .get_exercise(exercise_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to get exercise: {e}")))?
            .ok_or_else(|| AppError::not_found("Exercise"))?;

        Ok((StatusCode::OK, Json(exercise)).into_response())
    }

    /// Add an exercise to the catalog
    async fn handle_create_exercise(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<NewExercise>,
    ) -> Result<Response, AppError> {
        if request.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }
        let category = Self::storable_category(&request.category)?;

        let payload = NewExercise {
            category: category.as_str().to_owned(),
            ..request
        };
        let exercise = resources
            .database
            .create_exercise(&payload)
            .await
            .map_err(|e| AppError::database(format!("Failed to create exercise: {e}")))?;

        info!(exercise_id = exercise.id, "Created catalog exercise");
        Ok((StatusCode::CREATED, Json(exercise)).into_response())
    }

    /// Apply a partial update to a catalog exercise
    async fn handle_update_exercise(
        State(resources): State<Arc<ServerResources>>,
        Path(exercise_id): Path<i64>,
        Json(request): Json<UpdateExercise>,
    ) -> Result<Response, AppError> {
        if let Some(name) = &request.name {
            if name.trim().is_empty() {
                return Err(AppError::invalid_field("name", "must not be empty"));
            }
        }
        let category = match &request.category {
            Some(raw) => Some(Self::storable_category(raw)?.as_str().to_owned()),
            None => None,
        };

        let update = UpdateExercise { category, ..request };
        let exercise = resources
            .database
            .update_exercise(exercise_id, &update)
            .await
            .map_err(|e| AppError::database(format!("Failed to update exercise: {e}")))?
            .ok_or_else(|| AppError::not_found("Exercise"))?;

        Ok((StatusCode::OK, Json(exercise)).into_response())
    }

    /// Remove an exercise from the catalog
    async fn handle_delete_exercise(
        State(resources): State<Arc<ServerResources>>,
        Path(exercise_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let deleted = resources
            .database
            .delete_exercise(exercise_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete exercise: {e}")))?;
        if !deleted {
            return Err(AppError::not_found("Exercise"));
        }

        info!(exercise_id, "Deleted catalog exercise");
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
