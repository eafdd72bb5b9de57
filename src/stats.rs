// ABOUTME: Canonical training statistics math shared by every storage backend
// ABOUTME: Week windows, day bucketing, goal percentages, and the record domination rule
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! # Training Statistics Primitives
//!
//! Pure functions behind the aggregate endpoints. Both storage backends
//! delegate to this module so the week boundary, day bucketing, and
//! personal-record domination rules cannot drift between them.
//!
//! ## Conventions
//!
//! - Weeks run Sunday through Saturday, anchored at UTC midnight.
//! - Day buckets are elapsed 24-hour blocks counted back from "now",
//!   not calendar days. Day labels, by contrast, come from the calendar
//!   weekday. The two agree for sessions stamped near the query time
//!   and intentionally follow the elapsed-time rule when they differ.
//! - A candidate lift is a new personal record only when no existing
//!   record dominates it; see [`dominates`].

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc, Weekday};

use crate::models::PersonalRecord;

/// Single-letter weekday labels indexed by days-from-Sunday
const DAY_LETTERS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

const MS_PER_DAY: i64 = 86_400_000;

/// Truncate an instant to UTC midnight of the same calendar day.
fn midnight(t: DateTime<Utc>) -> DateTime<Utc> {
    t.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Half-open window `[start, end)` of the week containing `now`.
///
/// The start is the most recent Sunday at UTC midnight; the end is
/// exactly seven days later. An instant on Sunday midnight itself
/// belongs to the week it opens.
#[must_use]
pub fn week_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let days_from_sunday = i64::from(now.weekday().num_days_from_sunday());
    let start = midnight(now) - Duration::days(days_from_sunday);
    (start, start + Duration::days(7))
}

/// Progress toward a goal as a whole percentage, capped at 100.
///
/// Rounds half away from zero, matching how the figure is displayed.
/// A zero goal counts as met.
#[must_use]
pub fn goal_percentage(count: u32, goal: u32) -> u32 {
    if goal == 0 {
        return 100;
    }
    let raw = (f64::from(count) / f64::from(goal) * 100.0).round() as u32;
    raw.min(100)
}

/// Single-letter label for a weekday, Sunday and Saturday both "S".
#[must_use]
pub fn day_letter(weekday: Weekday) -> &'static str {
    DAY_LETTERS[weekday.num_days_from_sunday() as usize]
}

/// Weekday labels for a trailing window of `days` days, oldest first.
///
/// The final label is the weekday of `now` itself.
#[must_use]
pub fn day_labels(now: DateTime<Utc>, days: usize) -> Vec<&'static str> {
    (0..days)
        .map(|i| {
            let offset = days - 1 - i;
            let date = now - Duration::days(offset as i64);
            day_letter(date.weekday())
        })
        .collect()
}

/// Number of whole 24-hour blocks elapsed between `date` and `now`.
///
/// Floors toward negative infinity, so an instant even slightly in the
/// future lands in block `-1` and is excluded by any `0..days` range
/// check. This mirrors bucketing by elapsed milliseconds rather than
/// by calendar day.
#[must_use]
pub fn days_ago(now: DateTime<Utc>, date: DateTime<Utc>) -> i64 {
    (now - date).num_milliseconds().div_euclid(MS_PER_DAY)
}

/// Whether an existing record makes a candidate lift redundant.
///
/// A record dominates when it is strictly heavier, or equally heavy
/// with at least as many reps. More reps at the same weight therefore
/// earns a new record, while more reps at a lower weight does not.
#[must_use]
pub fn dominates(existing_weight: f64, existing_reps: i64, weight: f64, reps: i64) -> bool {
    if existing_weight > weight {
        return true;
    }
    (existing_weight - weight).abs() < f64::EPSILON && existing_reps >= reps
}

/// Whether a candidate lift beats every existing record for the exercise.
///
/// Records are append-only; a candidate that survives this check is
/// inserted alongside the history, never in place of it.
#[must_use]
pub fn is_new_record(existing: &[PersonalRecord], weight: f64, reps: i64) -> bool {
    !existing
        .iter()
        .any(|record| dominates(record.weight, record.reps, weight, reps))
}

/// Volume contributed by one set, zero when weight or reps is missing.
#[must_use]
pub fn set_volume(weight: Option<f64>, reps: Option<i64>) -> f64 {
    match (weight, reps) {
        (Some(w), Some(r)) => w * r as f64,
        _ => 0.0,
    }
}
