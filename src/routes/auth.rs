// ABOUTME: Authentication route handlers for the sign-in capability surface
// ABOUTME: Lists the identity providers currently able to take part in login
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! Authentication routes
//!
//! The API only advertises which external identity providers are available;
//! token exchange and callback handling live outside this service. Clients
//! render one login button per entry and navigate to `auth_path`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::server::ServerResources;

/// One sign-in option, as shown on the login screen
#[derive(Debug, Serialize)]
pub struct ProviderInfo {
    /// Stable provider key, e.g. `google`
    pub name: String,
    /// Human-readable name for the login button
    pub display_name: String,
    /// Path that starts the sign-in flow
    pub auth_path: String,
}

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/providers", get(Self::handle_list_providers))
            .with_state(resources)
    }

    /// List the providers that are configured and enabled
    async fn handle_list_providers(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let providers: Vec<ProviderInfo> = resources
            .identity
            .enabled_providers()
            .iter()
            .map(|provider| ProviderInfo {
                name: provider.name().to_owned(),
                display_name: provider.display_name().to_owned(),
                auth_path: provider.auth_path(),
            })
            .collect();

        Ok((StatusCode::OK, Json(providers)).into_response())
    }
}
