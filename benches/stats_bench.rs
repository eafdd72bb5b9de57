// ABOUTME: Criterion benchmarks for the training statistics primitives
// ABOUTME: Measures record domination scans, day bucketing, and aggregate queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! Criterion benchmarks for the training statistics primitives.
//!
//! Measures the personal-record domination scan, day bucketing math,
//! and the aggregate queries over the in-memory backend.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use liftlog_server::database_plugins::{factory::Database, DatabaseProvider};
use liftlog_server::models::{
    NewExerciseSet, NewSessionExercise, NewUser, NewWorkoutSession, PersonalRecord,
};
use liftlog_server::stats;
use tokio::runtime::Runtime;

/// Deterministic record history spread over distinct weight tiers
fn generate_records(count: i64) -> Vec<PersonalRecord> {
    let base_date = Utc::now();
    (0..count)
        .map(|index| PersonalRecord {
            id: index + 1,
            user_id: 1,
            exercise_id: 1,
            weight: 40.0 + ((index * 5) % 120) as f64,
            reps: 1 + (index * 3) % 12,
            date: base_date - Duration::days(index),
        })
        .collect()
}

/// Benchmark the domination scan at varying history sizes
fn bench_record_domination(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_domination");

    for count in [10_i64, 100, 500] {
        let records = generate_records(count);
        group.throughput(Throughput::Elements(count as u64));

        // Candidate heavier than every tier, so the scan never short-circuits
        group.bench_with_input(
            BenchmarkId::new("new_record_full_scan", count),
            &records,
            |b, records| {
                b.iter(|| stats::is_new_record(black_box(records), black_box(200.0), black_box(1)));
            },
        );

        // Candidate dominated by a mid-tier record
        group.bench_with_input(
            BenchmarkId::new("dominated_candidate", count),
            &records,
            |b, records| {
                b.iter(|| stats::is_new_record(black_box(records), black_box(45.0), black_box(1)));
            },
        );
    }

    group.finish();
}

/// Benchmark weekly goal math
fn bench_weekly_goal(c: &mut Criterion) {
    let mut group = c.benchmark_group("weekly_goal");

    group.bench_function("goal_percentage_sweep", |b| {
        b.iter(|| {
            let mut acc = 0_u32;
            for count in 0..=10_u32 {
                acc += stats::goal_percentage(black_box(count), black_box(5));
            }
            acc
        });
    });

    group.bench_function("week_window", |b| {
        let now = Utc::now();
        b.iter(|| stats::week_window(black_box(now)));
    });

    group.finish();
}

/// Benchmark day bucketing over trailing windows
fn bench_day_bucketing(c: &mut Criterion) {
    let mut group = c.benchmark_group("day_bucketing");
    let now = Utc::now();

    for days in [7_usize, 30, 90] {
        group.bench_with_input(BenchmarkId::new("day_labels", days), &days, |b, &days| {
            b.iter(|| stats::day_labels(black_box(now), black_box(days)));
        });
    }

    let dates: Vec<_> = (0..365_i64)
        .map(|index| now - Duration::hours(index * 7))
        .collect();
    group.throughput(Throughput::Elements(dates.len() as u64));
    group.bench_function("days_ago_365_instants", |b| {
        b.iter(|| {
            let mut acc = 0_i64;
            for date in black_box(&dates) {
                acc += stats::days_ago(now, *date);
            }
            acc
        });
    });

    group.finish();
}

/// Benchmark volume summation over a logged history
fn bench_volume_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("volume");

    let sets: Vec<(Option<f64>, Option<i64>)> = (0..1000_i64)
        .map(|index| {
            // Every seventh set is missing its numbers
            if index % 7 == 0 {
                (None, None)
            } else {
                (Some(40.0 + (index % 80) as f64), Some(1 + index % 12))
            }
        })
        .collect();

    group.throughput(Throughput::Elements(sets.len() as u64));
    group.bench_function("sum_1000_sets", |b| {
        b.iter(|| {
            black_box(&sets)
                .iter()
                .map(|(weight, reps)| stats::set_volume(*weight, *reps))
                .sum::<f64>()
        });
    });

    group.finish();
}

/// Seed one fully completed set under a fresh session
async fn seed_logged_session(db: &Database, date: chrono::DateTime<Utc>, weight: f64, reps: i64) {
    let session = db
        .create_workout_session(
            &NewWorkoutSession {
                workout_id: 1,
                user_id: 1,
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
            exercise_id: 1,
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

/// Benchmark the aggregate queries over a seeded in-memory backend
fn bench_aggregate_queries(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("aggregate_queries");

    let db = rt.block_on(async {
        let db = Database::new("memory://").await.unwrap();
        db.create_user(&NewUser::local("bench", "bench_hash"))
            .await
            .unwrap();
        let now = Utc::now();
        for index in 0..30_i64 {
            seed_logged_session(
                &db,
                now - Duration::days(index),
                60.0 + (index % 40) as f64,
                5,
            )
            .await;
        }
        db
    });
    let now = Utc::now();

    group.bench_function("weekly_workout_count", |b| {
        b.iter(|| {
            rt.block_on(async { db.get_weekly_workout_count(black_box(1), black_box(now)).await })
        });
    });

    group.bench_function("total_weight_30_days", |b| {
        let since = now - Duration::days(30);
        b.iter(|| rt.block_on(async { db.get_total_weight(black_box(1), black_box(since)).await }));
    });

    for days in [7_i64, 30] {
        group.bench_with_input(
            BenchmarkId::new("weight_by_day", days),
            &days,
            |b, &days| {
                b.iter(|| {
                    rt.block_on(async {
                        db.get_weight_by_day(black_box(1), black_box(now), black_box(days))
                            .await
                    })
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_record_domination,
    bench_weekly_goal,
    bench_day_bucketing,
    bench_volume_sum,
    bench_aggregate_queries,
);
criterion_main!(benches);
