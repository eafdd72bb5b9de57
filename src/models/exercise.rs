// ABOUTME: Exercise catalog entry and the fixed category enumeration
// ABOUTME: "All" is a query wildcard only and is rejected as a stored category
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Exercise categories
///
/// `All` is a query wildcard: filtering by it returns every exercise, and
/// validation rejects it as a stored category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExerciseCategory {
    /// Query wildcard matching every category
    All,
    /// Chest movements
    Chest,
    /// Back movements
    Back,
    /// Leg movements
    Legs,
    /// Shoulder movements
    Shoulders,
    /// Arm movements
    Arms,
    /// Core movements
    Core,
    /// Cardio work
    Cardio,
}

impl ExerciseCategory {
    /// All categories in display order, wildcard first
    pub const ALL: [Self; 8] = [
        Self::All,
        Self::Chest,
        Self::Back,
        Self::Legs,
        Self::Shoulders,
        Self::Arms,
        Self::Core,
        Self::Cardio,
    ];

    /// Whether this category is the query wildcard
    #[must_use]
    pub fn is_wildcard(self) -> bool {
        self == Self::All
    }

    /// Category name as stored and served
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Chest => "Chest",
            Self::Back => "Back",
            Self::Legs => "Legs",
            Self::Shoulders => "Shoulders",
            Self::Arms => "Arms",
            Self::Core => "Core",
            Self::Cardio => "Cardio",
        }
    }
}

impl fmt::Display for ExerciseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "chest" => Ok(Self::Chest),
            "back" => Ok(Self::Back),
            "legs" => Ok(Self::Legs),
            "shoulders" => Ok(Self::Shoulders),
            "arms" => Ok(Self::Arms),
            "core" => Ok(Self::Core),
            "cardio" => Ok(Self::Cardio),
            other => Err(format!("unknown exercise category: {other}")),
        }
    }
}

/// A catalog exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier, assigned by the store
    pub id: i64,
    /// Exercise name
    pub name: String,
    /// Free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Stored category (never "All")
    pub category: String,
    /// Free-text target muscle list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_muscles: Option<String>,
    /// Equipment used (e.g. "Barbell", "Bodyweight")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<String>,
    /// Kind of exercise (e.g. "Strength")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_type: Option<String>,
}

/// Payload for creating an exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExercise {
    /// Exercise name
    pub name: String,
    /// Free-text description
    pub description: Option<String>,
    /// Stored category (never "All")
    pub category: String,
    /// Free-text target muscle list
    pub target_muscles: Option<String>,
    /// Equipment used
    pub equipment_type: Option<String>,
    /// Kind of exercise
    pub exercise_type: Option<String>,
}

/// Partial update for an exercise; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExercise {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New category (never "All")
    pub category: Option<String>,
    /// New target muscle list
    pub target_muscles: Option<String>,
    /// New equipment type
    pub equipment_type: Option<String>,
    /// New exercise type
    pub exercise_type: Option<String>,
}
