// ABOUTME: Health check route for service monitoring and load balancers
// ABOUTME: Reports process uptime and the active storage backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! Health check route
//!
//! A single unauthenticated endpoint for monitoring and load balancer
//! health checks.

use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Instant;

use axum::{extract::State, routing::get, Json, Router};

use crate::server::ServerResources;

/// Process start time, captured when the router is first assembled.
static STARTED_AT: OnceLock<Instant> = OnceLock::new();

/// Health check routes
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health check route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        STARTED_AT.get_or_init(Instant::now);
        Router::new()
            .route("/api/health", get(Self::handle_health))
            .with_state(resources)
    }

    async fn handle_health(
        State(resources): State<Arc<ServerResources>>,
    ) -> Json<serde_json::Value> {
        let uptime_seconds = STARTED_AT.get().map_or(0, |started| started.elapsed().as_secs());
        Json(serde_json::json!({
            "status": "healthy",
            "database": resources.database.backend_name(),
            "uptime_seconds": uptime_seconds,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }))
    }
}
