// ABOUTME: Default exercise catalog seeding for fresh databases
// ABOUTME: Populates six starter exercises once, leaving populated catalogs untouched
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

use crate::database_plugins::DatabaseProvider;
use crate::models::NewExercise;
use anyhow::Result;
use tracing::{debug, info};

/// The starter catalog inserted into empty databases
fn default_catalog() -> Vec<NewExercise> {
    vec![
        NewExercise {
            name: "Bench Press".to_owned(),
            description: Some("Press a barbell upward while lying on a flat bench".to_owned()),
            category: "Chest".to_owned(),
            target_muscles: Some("Pectorals, Triceps, Deltoids".to_owned()),
            equipment_type: Some("Barbell".to_owned()),
            exercise_type: Some("Strength".to_owned()),
        },
        NewExercise {
            name: "Squat".to_owned(),
            description: Some("Lower the hips from standing with a barbell on the back".to_owned()),
            category: "Legs".to_owned(),
            target_muscles: Some("Quadriceps, Glutes, Hamstrings".to_owned()),
            equipment_type: Some("Barbell".to_owned()),
            exercise_type: Some("Strength".to_owned()),
        },
        NewExercise {
            name: "Deadlift".to_owned(),
            description: Some("Lift a loaded barbell from the floor to hip level".to_owned()),
            category: "Back".to_owned(),
            target_muscles: Some("Erector Spinae, Glutes, Hamstrings, Lats".to_owned()),
            equipment_type: Some("Barbell".to_owned()),
            exercise_type: Some("Strength".to_owned()),
        },
        NewExercise {
            name: "Pull-up".to_owned(),
            description: Some("Pull the body upward until the chin clears the bar".to_owned()),
            category: "Back".to_owned(),
            target_muscles: Some("Lats, Biceps, Rhomboids".to_owned()),
            equipment_type: Some("Bodyweight".to_owned()),
            exercise_type: Some("Strength".to_owned()),
        },
        NewExercise {
            name: "Shoulder Press".to_owned(),
            description: Some("Press dumbbells overhead from shoulder height".to_owned()),
            category: "Shoulders".to_owned(),
            target_muscles: Some("Deltoids, Triceps".to_owned()),
            equipment_type: Some("Dumbbell".to_owned()),
            exercise_type: Some("Strength".to_owned()),
        },
        NewExercise {
            name: "Leg Press".to_owned(),
            description: Some("Push a weighted platform away with both legs".to_owned()),
            category: "Legs".to_owned(),
            target_muscles: Some("Quadriceps, Glutes, Hamstrings".to_owned()),
            equipment_type: Some("Machine".to_owned()),
            exercise_type: Some("Strength".to_owned()),
        },
    ]
}

/// Insert the starter catalog when the exercise table is empty
///
/// Runs at startup after migration. A catalog with any rows at all is
/// left exactly as it is, so user edits and deletions survive
/// restarts.
///
/// # Errors
///
/// Returns an error if a storage operation fails.
pub async fn ensure_default_exercises<D: DatabaseProvider>(db: &D) -> Result<()> {
    if db.get_exercise_count().await? > 0 {
        debug!("Exercise catalog already populated, skipping seed");
        return Ok(());
    }

    let catalog = default_catalog();
    for exercise in &catalog {
        db.create_exercise(exercise).await?;
    }

    info!(count = catalog.len(), "Seeded default exercise catalog");
    Ok(())
}
