// ABOUTME: Workout session route handlers for logging performed training
// ABOUTME: Creation can materialize per-exercise records and empty sets upfront
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! Workout session routes
//!
//! A session is one performed instance of a workout. Creating one with
//! `add_exercises` pre-populates a session-exercise per template entry plus
//! that entry's target number of empty sets, so the client can log lifts by
//! filling in rows instead of creating them. Completion endpoints drive the
//! one-way completion flags and the workout's last-completed stamp.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use crate::constants::defaults;
use crate::database_plugins::DatabaseProvider;
use crate::errors::AppError;
use crate::models::{NewWorkoutSession, UpdateWorkoutSession};
use crate::server::ServerResources;

/// Query parameters for the session listing
#[derive(Debug, Deserialize)]
pub struct SessionListQuery {
    /// Performing user; the single-user default applies when absent
    pub user_id: Option<i64>,
}

/// Query parameters for the recent-sessions listing
#[derive(Debug, Deserialize)]
pub struct RecentSessionsQuery {
    /// Performing user; the single-user default applies when absent
    pub user_id: Option<i64>,
    /// Maximum entries to return, newest first
    pub limit: Option<i64>,
}

/// Request body for creating a session
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    /// The workout template being performed
    pub workout_id: i64,
    /// Performing user; the single-user default applies when absent
    pub user_id: Option<i64>,
    /// Session date; defaults to the creation time
    pub date: Option<DateTime<Utc>>,
    /// Session length in minutes
    pub duration_minutes: Option<i64>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Create the session already marked done
    #[serde(default)]
    pub completed: bool,
    /// Materialize session-exercises and empty sets from the workout
    #[serde(default)]
    pub add_exercises: bool,
}

/// Workout session routes
pub struct SessionRoutes;

impl SessionRoutes {
    /// Create all session routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workout-sessions", get(Self::handle_list_sessions))
            .route("/api/workout-sessions", post(Self::handle_create_session))
            .route(
                "/api/workout-sessions/recent",
                get(Self::handle_recent_sessions),
            )
            .route("/api/workout-sessions/:id", get(Self::handle_get_session))
            .route("/api/workout-sessions/:id", put(Self::handle_update_session))
            .route(
                "/api/workout-sessions/:id",
                delete(Self::handle_delete_session),
            )
            .route(
                "/api/workout-sessions/:id/complete",
                put(Self::handle_complete_session),
            )
            .route(
                "/api/session-exercises/:id/complete",
                put(Self::handle_complete_session_exercise),
            )
            .with_state(resources)
    }

    /// List a user's sessions, newest first
    async fn handle_list_sessions(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<SessionListQuery>,
    ) -> Result<Response, AppError> {
        let user_id = query.user_id.unwrap_or(defaults::USER_ID);
        let sessions = resources
            .database
            .get_workout_sessions(user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to list sessions: {e}")))?;

        Ok((StatusCode::OK, Json(sessions)).into_response())
    }

    /// The most recent sessions for a user
    async fn handle_recent_sessions(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<RecentSessionsQuery>,
    ) -> Result<Response, AppError> {
        let user_id = query.user_id.unwrap_or(defaults::USER_ID);
        let limit = query.limit.unwrap_or(defaults::RECENT_SESSIONS_LIMIT);
        if limit < 1 {
            return Err(AppError::invalid_field("limit", "must be at least 1"));
        }

        let sessions = resources
            .database
            .get_recent_sessions(user_id, limit)
            .await
            .map_err(|e| AppError::database(format!("Failed to list recent sessions: {e}")))?;

        Ok((StatusCode::OK, Json(sessions)).into_response())
    }

    /// Fetch a session with its workout, exercises, and sets
    async fn handle_get_session(
        State(resources): State<Arc<ServerResources>>,
        Path(session_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let detail = resources
            .database
            .get_session_detail(session_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to get session: {e}")))?
            .ok_or_else(|| AppError::not_found("Workout session"))?;

        Ok((StatusCode::OK, Json(detail)).into_response())
    }

    /// Start a session, optionally materializing its exercises and sets
    async fn handle_create_session(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreateSessionRequest>,
    ) -> Result<Response, AppError> {
        let workout = resources
            .database
            .get_workout(request.workout_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to check workout: {e}")))?;
        if workout.is_none() {
            return Err(AppError::invalid_field(
                "workout_id",
                format!("workout {} does not exist", request.workout_id),
            ));
        }

        let payload = NewWorkoutSession {
            workout_id: request.workout_id,
            user_id: request.user_id.unwrap_or(defaults::USER_ID),
            date: request.date,
            duration_minutes: request.duration_minutes,
            notes: request.notes,
            completed: request.completed,
        };
        let session = resources
            .database
            .create_workout_session(&payload, request.add_exercises)
            .await
            .map_err(|e| AppError::database(format!("Failed to create session: {e}")))?;

        let detail = resources
            .database
            .get_session_detail(session.id)
            .await
            .map_err(|e| AppError::database(format!("Failed to load session: {e}")))?
            .ok_or_else(|| AppError::internal("Created session could not be read back"))?;

        info!(
            session_id = session.id,
            workout_id = session.workout_id,
            add_exercises = request.add_exercises,
            "Created workout session"
        );
        Ok((StatusCode::CREATED, Json(detail)).into_response())
    }

    /// Apply a partial update to a session
    async fn handle_update_session(
        State(resources): State<Arc<ServerResources>>,
        Path(session_id): Path<i64>,
        Json(update): Json<UpdateWorkoutSession>,
    ) -> Result<Response, AppError> {
        let session = resources
            .database
            .update_workout_session(session_id, &update)
            .await
            .map_err(|e| AppError::database(format!("Failed to update session: {e}")))?
            .ok_or_else(|| AppError::not_found("Workout session"))?;

        Ok((StatusCode::OK, Json(session)).into_response())
    }

    /// Mark a session done and stamp its workout's last-completed time
    async fn handle_complete_session(
        State(resources): State<Arc<ServerResources>>,
        Path(session_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let session = resources
            .database
            .complete_workout_session(session_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to complete session: {e}")))?
            .ok_or_else(|| AppError::not_found("Workout session"))?;

        info!(session_id, "Completed workout session");
        Ok((StatusCode::OK, Json(session)).into_response())
    }

    /// Delete a session with its exercises and sets
    async fn handle_delete_session(
        State(resources): State<Arc<ServerResources>>,
        Path(session_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let deleted = resources
            .database
            .delete_workout_session(session_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete session: {e}")))?;
        if !deleted {
            return Err(AppError::not_found("Workout session"));
        }

        info!(session_id, "Deleted workout session");
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Mark one session exercise done; repeat calls are no-ops
    async fn handle_complete_session_exercise(
        State(resources): State<Arc<ServerResources>>,
        Path(session_exercise_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let entry = resources
            .database
            .complete_session_exercise(session_exercise_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to complete session exercise: {e}")))?
            .ok_or_else(|| AppError::not_found("Session exercise"))?;

        Ok((StatusCode::OK, Json(entry)).into_response())
    }
}
