// ABOUTME: Application constants organized by domain to eliminate magic numbers
// ABOUTME: Covers training goals, request defaults, and identity provider identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! Constants module
//!
//! Groups application constants by domain. Route handlers and storage
//! backends pull defaults from here so the two never disagree on a
//! fallback value.

/// Training goal constants
pub mod goals {
    /// Completed sessions per week considered a full training week
    pub const WEEKLY_SESSION_GOAL: u32 = 5;
}

/// Default values applied when a request omits an optional parameter
pub mod defaults {
    /// User id assumed when a request carries no `user_id` parameter
    pub const USER_ID: i64 = 1;

    /// Number of entries returned by the recent-sessions listing
    pub const RECENT_SESSIONS_LIMIT: i64 = 5;

    /// Number of entries returned by the personal-records listing
    pub const RECENT_RECORDS_LIMIT: i64 = 5;

    /// Trailing window, in days, for the total-weight aggregate
    pub const TOTAL_WEIGHT_PERIOD_DAYS: i64 = 30;

    /// Trailing window, in days, for the weight-by-day aggregate
    pub const WEIGHT_BY_DAY_DAYS: i64 = 7;

    /// Port the HTTP server binds when none is configured
    pub const HTTP_PORT: u16 = 5000;

    /// Database connection string used when none is configured
    pub const DATABASE_URL: &str = "sqlite:./liftlog.db";
}

/// Identity provider identifiers
pub mod identity_providers {
    /// Google OAuth provider identifier
    pub const GOOGLE: &str = "google";

    /// Facebook OAuth provider identifier
    pub const FACEBOOK: &str = "facebook";

    /// Instagram OAuth provider identifier
    pub const INSTAGRAM: &str = "instagram";

    /// Statically known provider identifiers, in registration order
    #[must_use]
    pub const fn all() -> &'static [&'static str] {
        &[GOOGLE, FACEBOOK, INSTAGRAM]
    }
}
