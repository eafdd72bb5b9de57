// ABOUTME: HTTP server assembly wiring routes, middleware, and shared resources
// ABOUTME: Owns router construction, port binding, and graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! HTTP server entry point.
//!
//! [`ServerResources`] is the dependency-injection container shared by every
//! handler. [`HttpServer`] assembles the router from the per-domain route
//! groups and serves it until shutdown.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::database_plugins::factory::Database;
use crate::identity::IdentityRegistry;
use crate::middleware::{propagate_request_id, setup_cors};
use crate::routes::{
    AuthRoutes, ExerciseRoutes, HealthRoutes, SessionRoutes, SetRoutes, StatsRoutes, UserRoutes,
    WorkoutRoutes,
};

/// Centralized resource container for dependency injection.
///
/// Holds everything handlers need so expensive resources are created once at
/// startup and shared through axum state instead of being rebuilt per request.
#[derive(Clone)]
pub struct ServerResources {
    /// Storage backend shared by all handlers
    pub database: Arc<Database>,
    /// Server configuration loaded at startup
    pub config: Arc<ServerConfig>,
    /// External identity providers available for sign-in
    pub identity: Arc<IdentityRegistry>,
}

impl ServerResources {
    /// Wrap owned resources for shared handler access.
    #[must_use]
    pub fn new(database: Database, config: ServerConfig, identity: IdentityRegistry) -> Self {
        Self {
            database: Arc::new(database),
            config: Arc::new(config),
            identity: Arc::new(identity),
        }
    }
}

/// HTTP API server for workout tracking.
#[derive(Clone)]
pub struct HttpServer {
    resources: Arc<ServerResources>,
}

impl HttpServer {
    /// Create a server around the shared resource container.
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Assemble the full API router with middleware applied.
    #[must_use]
    pub fn router(&self) -> Router {
        let resources = &self.resources;
        Router::new()
            .merge(HealthRoutes::routes(resources.clone()))
            .merge(AuthRoutes::routes(resources.clone()))
            .merge(UserRoutes::routes(resources.clone()))
            .merge(ExerciseRoutes::routes(resources.clone()))
            .merge(WorkoutRoutes::routes(resources.clone()))
            .merge(SessionRoutes::routes(resources.clone()))
            .merge(SetRoutes::routes(resources.clone()))
            .merge(StatsRoutes::routes(resources.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(axum::middleware::from_fn(propagate_request_id))
            .layer(setup_cors(&resources.config))
    }

    /// Bind the configured port and serve until interrupted.
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be bound or the listener fails
    /// while serving.
    pub async fn run(self) -> Result<()> {
        let port = self.resources.config.http_port;
        let router = self.router();

        let listener = TcpListener::bind(("0.0.0.0", port))
            .await
            .with_context(|| format!("Failed to bind HTTP port {port}"))?;
        info!("HTTP server listening on port {port}");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server terminated unexpectedly")?;

        info!("HTTP server shut down");
        Ok(())
    }
}

/// Resolve once the process receives an interrupt signal.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database_plugins::DatabaseProvider;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn test_resources() -> Arc<ServerResources> {
        let database = Database::new("memory://").await.unwrap();
        let config = ServerConfig::default();
        let identity = IdentityRegistry::from_config(&config.identity);
        Arc::new(ServerResources::new(database, config, identity))
    }

    #[tokio::test]
    async fn test_router_serves_health_checks() {
        let server = HttpServer::new(test_resources().await);
        let response = server
            .router()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_paths_return_not_found() {
        let server = HttpServer::new(test_resources().await);
        let response = server
            .router()
            .oneshot(
                Request::builder()
                    .uri("/api/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
