// ABOUTME: Training statistics route handlers for the dashboard widgets
// ABOUTME: Weekly goal progress, trailing-window totals, and the records feed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! Training statistics routes
//!
//! All aggregates are computed at request time from session data; nothing is
//! precomputed or cached. Each endpoint evaluates its window against the
//! current instant, so two calls straddling midnight can differ.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::constants::{defaults, goals};
use crate::database_plugins::DatabaseProvider;
use crate::errors::AppError;
use crate::models::{TotalWeight, WeeklyWorkouts};
use crate::server::ServerResources;
use crate::stats;

/// Query parameters for the weekly-workouts aggregate
#[derive(Debug, Deserialize)]
pub struct WeeklyWorkoutsQuery {
    /// User to aggregate; the single-user default applies when absent
    pub user_id: Option<i64>,
}

/// Query parameters for the trailing-window aggregates
#[derive(Debug, Deserialize)]
pub struct TrailingWindowQuery {
    /// User to aggregate; the single-user default applies when absent
    pub user_id: Option<i64>,
    /// Window length in days
    pub days: Option<i64>,
}

/// Query parameters for the personal-records feed
#[derive(Debug, Deserialize)]
pub struct RecordsFeedQuery {
    /// User whose records to list; the single-user default applies when absent
    pub user_id: Option<i64>,
    /// Maximum entries to return, newest first
    pub limit: Option<i64>,
}

/// Training statistics routes
pub struct StatsRoutes;

impl StatsRoutes {
    /// Create all statistics routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/stats/weekly-workouts",
                get(Self::handle_weekly_workouts),
            )
            .route("/api/stats/total-weight", get(Self::handle_total_weight))
            .route("/api/stats/weight-by-day", get(Self::handle_weight_by_day))
            .route(
                "/api/stats/personal-records",
                get(Self::handle_personal_records),
            )
            .with_state(resources)
    }

    /// Completed sessions this calendar week, against the fixed goal
    async fn handle_weekly_workouts(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<WeeklyWorkoutsQuery>,
    ) -> Result<Response, AppError> {
        let user_id = query.user_id.unwrap_or(defaults::USER_ID);
        let count = resources
            .database
            .get_weekly_workout_count(user_id, Utc::now())
            .await
            .map_err(|e| AppError::database(format!("Failed to count weekly sessions: {e}")))?;

        let count = u32::try_from(count).unwrap_or(u32::MAX);
        let goal = goals::WEEKLY_SESSION_GOAL;
        let body = WeeklyWorkouts {
            count,
            goal,
            percentage: stats::goal_percentage(count, goal),
        };
        Ok((StatusCode::OK, Json(body)).into_response())
    }

    /// Total weight lifted over a trailing window (default 30 days)
    async fn handle_total_weight(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<TrailingWindowQuery>,
    ) -> Result<Response, AppError> {
        let user_id = query.user_id.unwrap_or(defaults::USER_ID);
        let days = query.days.unwrap_or(defaults::TOTAL_WEIGHT_PERIOD_DAYS);
        if days < 1 {
            return Err(AppError::invalid_field("days", "must be at least 1"));
        }

        let window = Duration::try_days(days)
            .ok_or_else(|| AppError::invalid_field("days", "out of range"))?;
        let since = Utc::now()
            .checked_sub_signed(window)
            .ok_or_else(|| AppError::invalid_field("days", "out of range"))?;

        let total_weight = resources
            .database
            .get_total_weight(user_id, since)
            .await
            .map_err(|e| AppError::database(format!("Failed to total weight: {e}")))?;

        Ok((StatusCode::OK, Json(TotalWeight { total_weight })).into_response())
    }

    /// Per-day weight series over a trailing window (default 7 days)
    async fn handle_weight_by_day(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<TrailingWindowQuery>,
    ) -> Result<Response, AppError> {
        let user_id = query.user_id.unwrap_or(defaults::USER_ID);
        let days = query.days.unwrap_or(defaults::WEIGHT_BY_DAY_DAYS);
        if !(1..=365).contains(&days) {
            return Err(AppError::invalid_field("days", "must be between 1 and 365"));
        }

        let series = resources
            .database
            .get_weight_by_day(user_id, Utc::now(), days)
            .await
            .map_err(|e| AppError::database(format!("Failed to bucket weight by day: {e}")))?;

        Ok((StatusCode::OK, Json(series)).into_response())
    }

    /// A user's most recent personal records with exercise details
    async fn handle_personal_records(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<RecordsFeedQuery>,
    ) -> Result<Response, AppError> {
        let user_id = query.user_id.unwrap_or(defaults::USER_ID);
        let limit = query.limit.unwrap_or(defaults::RECENT_RECORDS_LIMIT);
        if limit < 1 {
            return Err(AppError::invalid_field("limit", "must be at least 1"));
        }

        let records = resources
            .database
            .get_recent_personal_records(user_id, limit)
            .await
            .map_err(|e| AppError::database(format!("Failed to list records: {e}")))?;

        Ok((StatusCode::OK, Json(records)).into_response())
    }
}
