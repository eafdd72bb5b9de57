// ABOUTME: User account route handlers for registration and profile lookup
// ABOUTME: Responses never carry password hashes, only public profile fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! User account routes
//!
//! Accounts are either registered directly here or created implicitly on
//! first external sign-in (see [`crate::identity`]). Password hashing is the
//! caller's concern; this service stores and serves accounts.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::database_plugins::DatabaseProvider;
use crate::errors::AppError;
use crate::models::{NewUser, User};
use crate::server::ServerResources;

/// Request body for registering a user
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Unique username
    pub username: String,
    /// Password hash for the new account
    pub password: Option<String>,
}

/// Public view of a user account
///
/// Password hashes stay server-side; everything else is shared.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// Unique identifier
    pub id: i64,
    /// Unique username
    pub username: String,
    /// Identity provider name for externally created accounts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Email address, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Profile photo URL, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo_url: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            provider: user.provider,
            email: user.email,
            profile_photo_url: user.profile_photo_url,
        }
    }
}

/// User account routes
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user account routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/users", post(Self::handle_create_user))
            .route("/api/users/:id", get(Self::handle_get_user))
            .with_state(resources)
    }

    /// Register a user account
    async fn handle_create_user(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreateUserRequest>,
    ) -> Result<Response, AppError> {
        let username = request.username.trim();
        if username.is_empty() {
            return Err(AppError::missing_field("username"));
        }

        let existing = resources
            .database
            .get_user_by_username(username)
            .await
            .map_err(|e| AppError::database(format!("Failed to check username: {e}")))?;
        if existing.is_some() {
            return Err(AppError::already_exists(format!(
                "Username '{username}' is already taken"
            )));
        }

        let payload = NewUser {
            username: username.to_owned(),
            password: request.password,
            provider: None,
            provider_user_id: None,
            email: None,
            profile_photo_url: None,
        };
        let user = resources
            .database
            .create_user(&payload)
            .await
            .map_err(|e| AppError::database(format!("Failed to create user: {e}")))?;

        info!(user_id = user.id, "Registered user");
        Ok((StatusCode::CREATED, Json(UserResponse::from(user))).into_response())
    }

    /// Look up a user by id
    async fn handle_get_user(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user = resources
            .database
            .get_user(user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?
            .ok_or_else(|| AppError::not_found("User"))?;

        Ok((StatusCode::OK, Json(UserResponse::from(user))).into_response())
    }
}
