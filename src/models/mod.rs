// ABOUTME: Core data models for users, exercises, workouts, sessions, and records
// ABOUTME: Entities mirror the storage schema; composite views add joined annotations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! # Data Models
//!
//! This module contains the core data structures used throughout the Liftlog
//! server: the eight stored entity kinds, the payload types accepted on create
//! and update, and the composite read views assembled by the storage layer.
//!
//! ## Design Principles
//!
//! - **Backend Agnostic**: The same models flow through the in-memory and the
//!   SQLite backend, so behavior cannot diverge at the type level
//! - **Serializable**: All models support JSON serialization for the HTTP API
//! - **Type Safe**: Enumerated categories and typed timestamps prevent common
//!   data handling errors
//!
//! ## Core Models
//!
//! - [`User`]: Account record, locally created or linked to an identity provider
//! - [`Exercise`]: Catalog entry describing a movement
//! - [`Workout`] / [`WorkoutExercise`]: Reusable routine template and its
//!   ordered exercise entries
//! - [`WorkoutSession`] / [`SessionExercise`] / [`ExerciseSet`]: One performed
//!   instance of a workout and its logged sets
//! - [`PersonalRecord`]: A non-dominated weight/reps achievement

mod exercise;
mod record;
mod session;
mod stats;
mod user;
mod workout;

pub use exercise::{Exercise, ExerciseCategory, NewExercise, UpdateExercise};
pub use record::{NewPersonalRecord, PersonalRecord, PersonalRecordWithExercise};
pub use session::{
    ExerciseSet, NewExerciseSet, NewSessionExercise, NewWorkoutSession, SessionExercise,
    SessionExerciseDetail, SessionWithWorkout, UpdateExerciseSet, UpdateWorkoutSession,
    WorkoutSession, WorkoutSessionDetail,
};
pub use stats::{DayWeight, TotalWeight, WeeklyWorkouts};
pub use user::{NewUser, User};
pub use workout::{
    NewWorkout, NewWorkoutExercise, UpdateWorkout, UpdateWorkoutExercise, Workout,
    WorkoutExercise, WorkoutExerciseDetail, WorkoutWithExercises,
};
