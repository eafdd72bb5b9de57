// ABOUTME: Liftlog server binary wiring configuration, storage, and HTTP serving
// ABOUTME: Runs migrations and catalog seeding before accepting requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! # Liftlog Server Binary
//!
//! Starts the workout tracking API: loads configuration from the
//! environment, opens the configured storage backend, prepares the schema
//! and default catalog, then serves HTTP until interrupted.

use anyhow::Result;
use clap::Parser;
use liftlog_server::{
    config::{DatabaseUrl, ServerConfig},
    database_plugins::{factory::Database, DatabaseProvider},
    identity::IdentityRegistry,
    logging, seed,
    server::{HttpServer, ServerResources},
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "liftlog-server")]
#[command(about = "Liftlog - workout tracking backend")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (e.g. sqlite:./liftlog.db or memory://)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.http_port {
        config.http_port = port;
    }
    if let Some(url) = &args.database_url {
        config.database.url = DatabaseUrl::parse_url(url)?;
    }

    info!("Starting Liftlog server");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url.to_connection_string()).await?;
    info!("Database initialized: {} backend", database.backend_name());

    if config.database.auto_migrate {
        database.migrate().await?;
        info!("Database schema ready");
    }
    if config.database.auto_seed {
        seed::ensure_default_exercises(&database).await?;
    }

    let user_count = database.get_user_count().await?;
    info!(user_count, "User accounts loaded");

    let identity = IdentityRegistry::from_config(&config.identity);
    info!(
        enabled = identity.enabled_providers().len(),
        "Identity providers initialized"
    );

    display_available_endpoints(&config);
    info!("Ready to track workouts!");

    let resources = Arc::new(ServerResources::new(database, config, identity));
    let server = HttpServer::new(resources);

    if let Err(e) = server.run().await {
        error!("Server error: {e}");
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints with their ports
fn display_available_endpoints(config: &ServerConfig) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());

    info!("=== Available API Endpoints ===");
    display_catalog_endpoints(&host, config.http_port);
    display_workout_endpoints(&host, config.http_port);
    display_session_endpoints(&host, config.http_port);
    display_stats_endpoints(&host, config.http_port);
    info!("=== End of Endpoint List ===");
}

#[allow(clippy::cognitive_complexity)]
fn display_catalog_endpoints(host: &str, port: u16) {
    info!("Exercise Catalog:");
    info!("   List Exercises:    GET  http://{host}:{port}/api/exercises");
    info!("   Categories:        GET  http://{host}:{port}/api/exercises/categories");
    info!("   Create Exercise:   POST http://{host}:{port}/api/exercises");
}

#[allow(clippy::cognitive_complexity)]
fn display_workout_endpoints(host: &str, port: u16) {
    info!("Workout Templates:");
    info!("   List Workouts:     GET  http://{host}:{port}/api/workouts");
    info!("   Create Workout:    POST http://{host}:{port}/api/workouts");
    info!("   Get Workout:       GET  http://{host}:{port}/api/workouts/{{id}}");
}

#[allow(clippy::cognitive_complexity)]
fn display_session_endpoints(host: &str, port: u16) {
    info!("Workout Sessions:");
    info!("   List Sessions:     GET  http://{host}:{port}/api/workout-sessions");
    info!("   Recent Sessions:   GET  http://{host}:{port}/api/workout-sessions/recent");
    info!("   Start Session:     POST http://{host}:{port}/api/workout-sessions");
    info!("   Complete Session:  PUT  http://{host}:{port}/api/workout-sessions/{{id}}/complete");
    info!("   Log Set:           POST http://{host}:{port}/api/exercise-sets");
    info!("   Complete Set:      PUT  http://{host}:{port}/api/exercise-sets/{{id}}/complete");
}

#[allow(clippy::cognitive_complexity)]
fn display_stats_endpoints(host: &str, port: u16) {
    info!("Training Statistics:");
    info!("   Weekly Workouts:   GET  http://{host}:{port}/api/stats/weekly-workouts");
    info!("   Total Weight:      GET  http://{host}:{port}/api/stats/total-weight");
    info!("   Weight By Day:     GET  http://{host}:{port}/api/stats/weight-by-day");
    info!("   Personal Records:  GET  http://{host}:{port}/api/stats/personal-records");
}
