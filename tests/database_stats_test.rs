// ABOUTME: Storage conformance tests for the training statistics queries
// ABOUTME: Weekly counting and agreement between the daily series and the window total
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{DateTime, Duration, Utc};
use common::{all_backends, create_test_user, instant, seed_exercise, seed_workout};
use liftlog_server::database_plugins::{factory::Database, DatabaseProvider};
use liftlog_server::models::{NewExerciseSet, NewSessionExercise, NewWorkoutSession};

/// A completed session holding one fully logged set of `weight` x `reps`
async fn logged_session(
    db: &Database,
    user_id: i64,
    workout_id: i64,
    exercise_id: i64,
    date: DateTime<Utc>,
    weight: f64,
    reps: i64,
) {
    let session = db
        .create_workout_session(
            &NewWorkoutSession {
                workout_id,
                user_id,
                date: Some(date),
                duration_minutes: None,
                notes: None,
                completed: true,
            },
            false,
        )
        .await
        .unwrap();

    let entry = db
        .create_session_exercise(&NewSessionExercise {
            session_id: session.id,
            exercise_id,
        })
        .await
        .unwrap();
    let set = db
        .create_exercise_set(&NewExerciseSet {
            session_exercise_id: entry.id,
            set_number: 1,
            weight: Some(weight),
            reps: Some(reps),
        })
        .await
        .unwrap();
    db.complete_exercise_set(set.id).await.unwrap();
    db.complete_session_exercise(entry.id).await.unwrap();
}

async fn check_weekly_count_tracks_completed_sessions(db: Database) {
    let user = create_test_user(&db).await.unwrap();
    let bench = seed_exercise(&db, "Bench Press", "Chest").await.unwrap();
    let workout = seed_workout(&db, user.id, "Push Day", &[(bench, 1)])
        .await
        .unwrap();

    // 2025-03-12 is a Wednesday; its week runs 03-09 through 03-15
    let now = instant(2025, 3, 12, 15);

    for day in [9, 10, 11] {
        logged_session(&db, user.id, workout.id, bench, instant(2025, 3, day, 9), 60.0, 5).await;
    }

    // An incomplete session this week and a completed one last week
    db.create_workout_session(
        &NewWorkoutSession {
            workout_id: workout.id,
            user_id: user.id,
            date: Some(instant(2025, 3, 12, 9)),
            duration_minutes: None,
            notes: None,
            completed: false,
        },
        false,
    )
    .await
    .unwrap();
    logged_session(&db, user.id, workout.id, bench, instant(2025, 3, 5, 9), 60.0, 5).await;

    assert_eq!(db.get_weekly_workout_count(user.id, now).await.unwrap(), 3);
    assert_eq!(db.get_weekly_workout_count(9999, now).await.unwrap(), 0);
}

async fn check_daily_series_sums_to_the_window_total(db: Database) {
    let user = create_test_user(&db).await.unwrap();
    let bench = seed_exercise(&db, "Bench Press", "Chest").await.unwrap();
    let workout = seed_workout(&db, user.id, "Push Day", &[(bench, 1)])
        .await
        .unwrap();

    let now = instant(2025, 3, 12, 12);
    let window = [
        (now - Duration::hours(2), 100.0, 4),
        (now - Duration::hours(25), 100.0, 3),
        (now - Duration::days(6), 50.0, 2),
    ];
    for (date, weight, reps) in window {
        logged_session(&db, user.id, workout.id, bench, date, weight, reps).await;
    }
    // Outside the window, must appear in neither view
    logged_session(
        &db,
        user.id,
        workout.id,
        bench,
        now - Duration::days(9),
        100.0,
        10,
    )
    .await;

    let total = db
        .get_total_weight(user.id, now - Duration::days(7))
        .await
        .unwrap();
    assert!((total - 800.0).abs() < f64::EPSILON);

    let series = db.get_weight_by_day(user.id, now, 7).await.unwrap();
    assert_eq!(series.len(), 7);
    let sum: f64 = series.iter().map(|d| d.weight).sum();
    assert!((sum - total).abs() < f64::EPSILON);
}

async fn check_empty_history_yields_zeroes(db: Database) {
    let user = create_test_user(&db).await.unwrap();
    let now = Utc::now();

    assert_eq!(db.get_weekly_workout_count(user.id, now).await.unwrap(), 0);
    assert!(db
        .get_total_weight(user.id, now - Duration::days(30))
        .await
        .unwrap()
        .abs()
        < f64::EPSILON);

    let series = db.get_weight_by_day(user.id, now, 7).await.unwrap();
    assert_eq!(series.len(), 7);
    assert!(series.iter().all(|d| d.weight.abs() < f64::EPSILON));
}

// ============================================================================
// Conformance runs
// ============================================================================

#[tokio::test]
async fn test_weekly_count_tracks_completed_sessions() {
    for db in all_backends().await {
        check_weekly_count_tracks_completed_sessions(db).await;
    }
}

#[tokio::test]
async fn test_daily_series_sums_to_the_window_total() {
    for db in all_backends().await {
        check_daily_series_sums_to_the_window_total(db).await;
    }
}

#[tokio::test]
async fn test_empty_history_yields_zeroes() {
    for db in all_backends().await {
        check_empty_history_yields_zeroes(db).await;
    }
}
