// ABOUTME: Wire types for the statistics endpoints
// ABOUTME: Weekly goal progress, trailing-window weight totals, per-day weight series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

use serde::{Deserialize, Serialize};

/// Progress toward the weekly session goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyWorkouts {
    /// Completed sessions in the current calendar week (Sunday start)
    pub count: u32,
    /// Fixed weekly goal
    pub goal: u32,
    /// `min(round(count / goal * 100), 100)`
    pub percentage: u32,
}

/// Total weight lifted over a trailing window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalWeight {
    /// Sum of `weight * reps` over qualifying sets, in kg
    pub total_weight: f64,
}

/// One day's entry in the weight-by-day series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayWeight {
    /// Single-letter weekday label (Tue/Thu share "T", Sat/Sun share "S")
    pub day: String,
    /// Sum of `weight * reps` for that day, in kg
    pub weight: f64,
}
