// ABOUTME: In-memory implementation of the DatabaseProvider trait
// ABOUTME: HashMap stores behind one async lock, for tests and throwaway deployments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

use super::DatabaseProvider;
use crate::models::{
    DayWeight, Exercise, ExerciseSet, NewExercise, NewExerciseSet, NewPersonalRecord,
    NewSessionExercise, NewUser, NewWorkout, NewWorkoutExercise, NewWorkoutSession,
    PersonalRecord, PersonalRecordWithExercise, SessionExercise, SessionExerciseDetail,
    SessionWithWorkout, UpdateExercise, UpdateExerciseSet, UpdateWorkout, UpdateWorkoutExercise,
    UpdateWorkoutSession, User, Workout, WorkoutExercise, WorkoutExerciseDetail, WorkoutSession,
    WorkoutSessionDetail, WorkoutWithExercises,
};
use crate::stats;
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// In-memory database provider
///
/// Every store lives in one state struct behind a single `RwLock`, so
/// multi-step operations hold the write guard for their whole span and
/// observe the same atomicity the SQL backend gets from transactions.
/// Clones share state, matching connection-pool semantics.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    state: Arc<RwLock<MemoryState>>,
}

/// Identifier counters, one per store
///
/// Each store numbers its rows independently from 1, mirroring
/// per-table autoincrement columns.
struct NextIds {
    users: i64,
    exercises: i64,
    workouts: i64,
    workout_exercises: i64,
    sessions: i64,
    session_exercises: i64,
    exercise_sets: i64,
    personal_records: i64,
}

impl Default for NextIds {
    fn default() -> Self {
        Self {
            users: 1,
            exercises: 1,
            workouts: 1,
            workout_exercises: 1,
            sessions: 1,
            session_exercises: 1,
            exercise_sets: 1,
            personal_records: 1,
        }
    }
}

#[derive(Default)]
struct MemoryState {
    users: HashMap<i64, User>,
    exercises: HashMap<i64, Exercise>,
    workouts: HashMap<i64, Workout>,
    workout_exercises: HashMap<i64, WorkoutExercise>,
    sessions: HashMap<i64, WorkoutSession>,
    session_exercises: HashMap<i64, SessionExercise>,
    exercise_sets: HashMap<i64, ExerciseSet>,
    personal_records: HashMap<i64, PersonalRecord>,
    next_ids: NextIds,
}

fn next_id(counter: &mut i64) -> i64 {
    let id = *counter;
    *counter += 1;
    id
}

/// A workout's entries by position, annotated with catalog exercises
fn workout_exercise_details(
    state: &MemoryState,
    workout_id: i64,
) -> Result<Vec<WorkoutExerciseDetail>> {
    let mut entries: Vec<WorkoutExercise> = state
        .workout_exercises
        .values()
        .filter(|e| e.workout_id == workout_id)
        .cloned()
        .collect();
    entries.sort_by_key(|e| (e.order_index, e.id));

    entries
        .into_iter()
        .map(|entry| {
            let exercise = state
                .exercises
                .get(&entry.exercise_id)
                .cloned()
                .ok_or_else(|| {
                    anyhow!(
                        "workout exercise {} references missing exercise {}",
                        entry.id,
                        entry.exercise_id
                    )
                })?;
            Ok(WorkoutExerciseDetail {
                workout_exercise: entry,
                exercise,
            })
        })
        .collect()
}

/// A session exercise's sets ordered by set number
fn sets_of(state: &MemoryState, session_exercise_id: i64) -> Vec<ExerciseSet> {
    let mut sets: Vec<ExerciseSet> = state
        .exercise_sets
        .values()
        .filter(|s| s.session_exercise_id == session_exercise_id)
        .cloned()
        .collect();
    sets.sort_by_key(|s| (s.set_number, s.id));
    sets
}

/// A session's exercises with catalog details and ordered sets
fn session_exercise_details(
    state: &MemoryState,
    session_id: i64,
) -> Result<Vec<SessionExerciseDetail>> {
    let mut entries: Vec<SessionExercise> = state
        .session_exercises
        .values()
        .filter(|e| e.session_id == session_id)
        .cloned()
        .collect();
    entries.sort_by_key(|e| e.id);

    entries
        .into_iter()
        .map(|entry| {
            let exercise = state
                .exercises
                .get(&entry.exercise_id)
                .cloned()
                .ok_or_else(|| {
                    anyhow!(
                        "session exercise {} references missing exercise {}",
                        entry.id,
                        entry.exercise_id
                    )
                })?;
            let sets = sets_of(state, entry.id);
            Ok(SessionExerciseDetail {
                session_exercise: entry,
                exercise,
                sets,
            })
        })
        .collect()
}

/// A user's sessions newest first, annotated with surviving workouts
fn sessions_with_workouts(state: &MemoryState, user_id: i64) -> Vec<SessionWithWorkout> {
    let mut sessions: Vec<WorkoutSession> = state
        .sessions
        .values()
        .filter(|s| s.user_id == user_id)
        .cloned()
        .collect();
    sessions.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));

    sessions
        .into_iter()
        .map(|session| {
            let workout = state.workouts.get(&session.workout_id).cloned();
            SessionWithWorkout { session, workout }
        })
        .collect()
}

/// Whether a set counts toward volume statistics
///
/// The set and its session exercise must both be completed and the set
/// must carry weight and reps. The owning session's flag is not
/// consulted.
fn countable_volume(state: &MemoryState, set: &ExerciseSet) -> Option<(i64, DateTime<Utc>, f64)> {
    if !set.completed || set.weight.is_none() || set.reps.is_none() {
        return None;
    }
    let entry = state.session_exercises.get(&set.session_exercise_id)?;
    if !entry.completed {
        return None;
    }
    let session = state.sessions.get(&entry.session_id)?;
    Some((
        session.user_id,
        session.date,
        stats::set_volume(set.weight, set.reps),
    ))
}

#[async_trait]
impl DatabaseProvider for MemoryDatabase {
    async fn new(_database_url: &str) -> Result<Self> {
        Ok(Self::default())
    }

    async fn migrate(&self) -> Result<()> {
        // Nothing to set up; stores exist from construction
        Ok(())
    }

    // ================================
    // User Management
    // ================================

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.username == user.username) {
            bail!("username '{}' is already taken", user.username);
        }

        let id = next_id(&mut state.next_ids.users);
        let created = User {
            id,
            username: user.username.clone(),
            password: user.password.clone(),
            provider: user.provider.clone(),
            provider_user_id: user.provider_user_id.clone(),
            email: user.email.clone(),
            profile_photo_url: user.profile_photo_url.clone(),
        };
        state.users.insert(id, created.clone());
        Ok(created)
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.get(&user_id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn get_user_by_provider(
        &self,
        provider: &str,
        provider_user_id: &str,
    ) -> Result<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| {
                u.provider.as_deref() == Some(provider)
                    && u.provider_user_id.as_deref() == Some(provider_user_id)
            })
            .cloned())
    }

    async fn get_user_count(&self) -> Result<i64> {
        let state = self.state.read().await;
        Ok(i64::try_from(state.users.len())?)
    }

    // ================================
    // Exercise Catalog
    // ================================

    async fn get_exercises(&self) -> Result<Vec<Exercise>> {
        let state = self.state.read().await;
        let mut exercises: Vec<Exercise> = state.exercises.values().cloned().collect();
        exercises.sort_by_key(|e| e.id);
        Ok(exercises)
    }

    async fn get_exercises_by_category(&self, category: &str) -> Result<Vec<Exercise>> {
        let state = self.state.read().await;
        let mut exercises: Vec<Exercise> = state
            .exercises
            .values()
            .filter(|e| e.category == category)
            .cloned()
            .collect();
        exercises.sort_by_key(|e| e.id);
        Ok(exercises)
    }

    async fn get_exercise(&self, exercise_id: i64) -> Result<Option<Exercise>> {
        let state = self.state.read().await;
        Ok(state.exercises.get(&exercise_id).cloned())
    }

    async fn create_exercise(&self, exercise: &NewExercise) -> Result<Exercise> {
        let mut state = self.state.write().await;
        let id = next_id(&mut state.next_ids.exercises);
        let created = Exercise {
            id,
            name: exercise.name.clone(),
            description: exercise.description.clone(),
            category: exercise.category.clone(),
            target_muscles: exercise.target_muscles.clone(),
            equipment_type: exercise.equipment_type.clone(),
            exercise_type: exercise.exercise_type.clone(),
        };
        state.exercises.insert(id, created.clone());
        Ok(created)
    }

    async fn update_exercise(
        &self,
        exercise_id: i64,
        update: &UpdateExercise,
    ) -> Result<Option<Exercise>> {
        let mut state = self.state.write().await;
        let Some(existing) = state.exercises.get(&exercise_id).cloned() else {
            return Ok(None);
        };

        let merged = Exercise {
            id: existing.id,
            name: update.name.clone().unwrap_or(existing.name),
            description: update.description.clone().or(existing.description),
            category: update.category.clone().unwrap_or(existing.category),
            target_muscles: update.target_muscles.clone().or(existing.target_muscles),
            equipment_type: update.equipment_type.clone().or(existing.equipment_type),
            exercise_type: update.exercise_type.clone().or(existing.exercise_type),
        };
        state.exercises.insert(exercise_id, merged.clone());
        Ok(Some(merged))
    }

    async fn delete_exercise(&self, exercise_id: i64) -> Result<bool> {
        let mut state = self.state.write().await;
        Ok(state.exercises.remove(&exercise_id).is_some())
    }

    async fn get_exercise_count(&self) -> Result<i64> {
        let state = self.state.read().await;
        Ok(i64::try_from(state.exercises.len())?)
    }

    // ================================
    // Workout Templates
    // ================================

    async fn get_workouts(&self, user_id: i64) -> Result<Vec<Workout>> {
        let state = self.state.read().await;
        let mut workouts: Vec<Workout> = state
            .workouts
            .values()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect();
        workouts.sort_by_key(|w| w.id);
        Ok(workouts)
    }

    async fn get_workout(&self, workout_id: i64) -> Result<Option<Workout>> {
        let state = self.state.read().await;
        Ok(state.workouts.get(&workout_id).cloned())
    }

    async fn get_workout_with_exercises(
        &self,
        workout_id: i64,
    ) -> Result<Option<WorkoutWithExercises>> {
        let state = self.state.read().await;
        let Some(workout) = state.workouts.get(&workout_id).cloned() else {
            return Ok(None);
        };
        let exercises = workout_exercise_details(&state, workout_id)?;
        Ok(Some(WorkoutWithExercises { workout, exercises }))
    }

    async fn create_workout(&self, workout: &NewWorkout) -> Result<Workout> {
        let mut state = self.state.write().await;
        let id = next_id(&mut state.next_ids.workouts);
        let created = Workout {
            id,
            name: workout.name.clone(),
            user_id: workout.user_id,
            created_at: Utc::now(),
            last_completed_at: None,
        };
        state.workouts.insert(id, created.clone());
        Ok(created)
    }

    async fn update_workout(
        &self,
        workout_id: i64,
        update: &UpdateWorkout,
    ) -> Result<Option<Workout>> {
        let mut state = self.state.write().await;
        let Some(existing) = state.workouts.get(&workout_id).cloned() else {
            return Ok(None);
        };

        let merged = Workout {
            name: update.name.clone().unwrap_or(existing.name),
            ..existing
        };
        state.workouts.insert(workout_id, merged.clone());
        Ok(Some(merged))
    }

    async fn delete_workout(&self, workout_id: i64) -> Result<bool> {
        let mut state = self.state.write().await;
        let existed = state.workouts.remove(&workout_id).is_some();
        state
            .workout_exercises
            .retain(|_, e| e.workout_id != workout_id);
        Ok(existed)
    }

    // ================================
    // Workout Exercise Entries
    // ================================

    async fn get_workout_exercises(&self, workout_id: i64) -> Result<Vec<WorkoutExerciseDetail>> {
        let state = self.state.read().await;
        workout_exercise_details(&state, workout_id)
    }

    async fn create_workout_exercise(
        &self,
        entry: &NewWorkoutExercise,
    ) -> Result<WorkoutExercise> {
        let mut state = self.state.write().await;
        let id = next_id(&mut state.next_ids.workout_exercises);
        let created = WorkoutExercise {
            id,
            workout_id: entry.workout_id,
            exercise_id: entry.exercise_id,
            sets: entry.sets,
            reps: entry.reps.clone(),
            weight: entry.weight.clone(),
            order_index: entry.order_index,
        };
        state.workout_exercises.insert(id, created.clone());
        Ok(created)
    }

    async fn update_workout_exercise(
        &self,
        entry_id: i64,
        update: &UpdateWorkoutExercise,
    ) -> Result<Option<WorkoutExercise>> {
        let mut state = self.state.write().await;
        let Some(existing) = state.workout_exercises.get(&entry_id).cloned() else {
            return Ok(None);
        };

        let merged = WorkoutExercise {
            id: existing.id,
            workout_id: existing.workout_id,
            exercise_id: update.exercise_id.unwrap_or(existing.exercise_id),
            sets: update.sets.unwrap_or(existing.sets),
            reps: update.reps.clone().unwrap_or(existing.reps),
            weight: update.weight.clone().or(existing.weight),
            order_index: update.order_index.unwrap_or(existing.order_index),
        };
        state.workout_exercises.insert(entry_id, merged.clone());
        Ok(Some(merged))
    }

    async fn delete_workout_exercise(&self, entry_id: i64) -> Result<bool> {
        let mut state = self.state.write().await;
        Ok(state.workout_exercises.remove(&entry_id).is_some())
    }

    async fn delete_workout_exercises_by_workout(&self, workout_id: i64) -> Result<()> {
        let mut state = self.state.write().await;
        state
            .workout_exercises
            .retain(|_, e| e.workout_id != workout_id);
        Ok(())
    }

    async fn replace_workout_exercises(
        &self,
        workout_id: i64,
        entries: &[NewWorkoutExercise],
    ) -> Result<Vec<WorkoutExercise>> {
        let mut state = self.state.write().await;
        state
            .workout_exercises
            .retain(|_, e| e.workout_id != workout_id);

        let mut created = Vec::with_capacity(entries.len());
        for entry in entries {
            let id = next_id(&mut state.next_ids.workout_exercises);
            let row = WorkoutExercise {
                id,
                workout_id,
                exercise_id: entry.exercise_id,
                sets: entry.sets,
                reps: entry.reps.clone(),
                weight: entry.weight.clone(),
                order_index: entry.order_index,
            };
            state.workout_exercises.insert(id, row.clone());
            created.push(row);
        }
        Ok(created)
    }

    // ================================
    // Workout Sessions
    // ================================

    async fn get_workout_sessions(&self, user_id: i64) -> Result<Vec<SessionWithWorkout>> {
        let state = self.state.read().await;
        Ok(sessions_with_workouts(&state, user_id))
    }

    async fn get_recent_sessions(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<SessionWithWorkout>> {
        let state = self.state.read().await;
        let mut sessions = sessions_with_workouts(&state, user_id);
        sessions.truncate(usize::try_from(limit)?);
        Ok(sessions)
    }

    async fn get_workout_session(&self, session_id: i64) -> Result<Option<WorkoutSession>> {
        let state = self.state.read().await;
        Ok(state.sessions.get(&session_id).cloned())
    }

    async fn get_session_detail(&self, session_id: i64) -> Result<Option<WorkoutSessionDetail>> {
        let state = self.state.read().await;
        let Some(session) = state.sessions.get(&session_id).cloned() else {
            return Ok(None);
        };
        let Some(workout) = state.workouts.get(&session.workout_id).cloned() else {
            return Ok(None);
        };
        let exercises = session_exercise_details(&state, session_id)?;
        Ok(Some(WorkoutSessionDetail {
            session,
            workout,
            exercises,
        }))
    }

    async fn create_workout_session(
        &self,
        session: &NewWorkoutSession,
        add_exercises: bool,
    ) -> Result<WorkoutSession> {
        let date = session.date.unwrap_or_else(Utc::now);
        let mut state = self.state.write().await;

        let id = next_id(&mut state.next_ids.sessions);
        let created = WorkoutSession {
            id,
            workout_id: session.workout_id,
            user_id: session.user_id,
            date,
            duration_minutes: session.duration_minutes,
            notes: session.notes.clone(),
            completed: session.completed,
        };
        state.sessions.insert(id, created.clone());

        if add_exercises {
            let mut entries: Vec<WorkoutExercise> = state
                .workout_exercises
                .values()
                .filter(|e| e.workout_id == session.workout_id)
                .cloned()
                .collect();
            entries.sort_by_key(|e| (e.order_index, e.id));

            for entry in entries {
                let entry_id = next_id(&mut state.next_ids.session_exercises);
                state.session_exercises.insert(
                    entry_id,
                    SessionExercise {
                        id: entry_id,
                        session_id: id,
                        exercise_id: entry.exercise_id,
                        completed: false,
                    },
                );
                for set_number in 1..=entry.sets {
                    let set_id = next_id(&mut state.next_ids.exercise_sets);
                    state.exercise_sets.insert(
                        set_id,
                        ExerciseSet {
                            id: set_id,
                            session_exercise_id: entry_id,
                            set_number,
                            weight: None,
                            reps: None,
                            completed: false,
                        },
                    );
                }
            }
        }

        if session.completed {
            if let Some(workout) = state.workouts.get_mut(&session.workout_id) {
                workout.last_completed_at = Some(date);
            }
        }

        Ok(created)
    }

    async fn update_workout_session(
        &self,
        session_id: i64,
        update: &UpdateWorkoutSession,
    ) -> Result<Option<WorkoutSession>> {
        let mut state = self.state.write().await;
        let Some(existing) = state.sessions.get(&session_id).cloned() else {
            return Ok(None);
        };

        let merged = WorkoutSession {
            date: update.date.unwrap_or(existing.date),
            duration_minutes: update.duration_minutes.or(existing.duration_minutes),
            notes: update.notes.clone().or(existing.notes),
            completed: update.completed.unwrap_or(existing.completed),
            ..existing
        };
        state.sessions.insert(session_id, merged.clone());
        Ok(Some(merged))
    }

    async fn complete_workout_session(
        &self,
        session_id: i64,
    ) -> Result<Option<WorkoutSession>> {
        let mut state = self.state.write().await;
        let Some(session) = state.sessions.get(&session_id).cloned() else {
            return Ok(None);
        };

        let completed = WorkoutSession {
            completed: true,
            ..session
        };
        state.sessions.insert(session_id, completed.clone());

        if let Some(workout) = state.workouts.get_mut(&completed.workout_id) {
            workout.last_completed_at = Some(completed.date);
        }

        Ok(Some(completed))
    }

    async fn delete_workout_session(&self, session_id: i64) -> Result<bool> {
        let mut state = self.state.write().await;
        let existed = state.sessions.remove(&session_id).is_some();

        let entry_ids: Vec<i64> = state
            .session_exercises
            .values()
            .filter(|e| e.session_id == session_id)
            .map(|e| e.id)
            .collect();
        state
            .exercise_sets
            .retain(|_, s| !entry_ids.contains(&s.session_exercise_id));
        state
            .session_exercises
            .retain(|_, e| e.session_id != session_id);

        Ok(existed)
    }

    // ================================
    // Session Exercises
    // ================================

    async fn get_session_exercises(
        &self,
        session_id: i64,
    ) -> Result<Vec<SessionExerciseDetail>> {
        let state = self.state.read().await;
        session_exercise_details(&state, session_id)
    }

    async fn create_session_exercise(
        &self,
        entry: &NewSessionExercise,
    ) -> Result<SessionExercise> {
        let mut state = self.state.write().await;
        let id = next_id(&mut state.next_ids.session_exercises);
        let created = SessionExercise {
            id,
            session_id: entry.session_id,
            exercise_id: entry.exercise_id,
            completed: false,
        };
        state.session_exercises.insert(id, created.clone());
        Ok(created)
    }

    async fn complete_session_exercise(
        &self,
        session_exercise_id: i64,
    ) -> Result<Option<SessionExercise>> {
        let mut state = self.state.write().await;
        let Some(entry) = state.session_exercises.get(&session_exercise_id).cloned() else {
            return Ok(None);
        };

        if entry.completed {
            return Ok(Some(entry));
        }

        let completed = SessionExercise {
            completed: true,
            ..entry
        };
        state
            .session_exercises
            .insert(session_exercise_id, completed.clone());
        Ok(Some(completed))
    }

    // ================================
    // Exercise Sets
    // ================================

    async fn get_exercise_sets(&self, session_exercise_id: i64) -> Result<Vec<ExerciseSet>> {
        let state = self.state.read().await;
        Ok(sets_of(&state, session_exercise_id))
    }

    async fn create_exercise_set(&self, set: &NewExerciseSet) -> Result<ExerciseSet> {
        let mut state = self.state.write().await;
        let id = next_id(&mut state.next_ids.exercise_sets);
        let created = ExerciseSet {
            id,
            session_exercise_id: set.session_exercise_id,
            set_number: set.set_number,
            weight: set.weight,
            reps: set.reps,
            completed: false,
        };
        state.exercise_sets.insert(id, created.clone());
        Ok(created)
    }

    async fn update_exercise_set(
        &self,
        set_id: i64,
        update: &UpdateExerciseSet,
    ) -> Result<Option<ExerciseSet>> {
        let mut state = self.state.write().await;
        let Some(existing) = state.exercise_sets.get(&set_id).cloned() else {
            return Ok(None);
        };

        let merged = ExerciseSet {
            weight: update.weight.or(existing.weight),
            reps: update.reps.or(existing.reps),
            ..existing
        };
        state.exercise_sets.insert(set_id, merged.clone());
        Ok(Some(merged))
    }

    async fn complete_exercise_set(&self, set_id: i64) -> Result<Option<ExerciseSet>> {
        let mut state = self.state.write().await;
        let Some(set) = state.exercise_sets.get(&set_id).cloned() else {
            return Ok(None);
        };

        let completed = ExerciseSet {
            completed: true,
            ..set.clone()
        };
        state.exercise_sets.insert(set_id, completed.clone());

        if let (Some(weight), Some(reps)) = (set.weight, set.reps) {
            let (exercise_id, user_id) = state
                .session_exercises
                .get(&set.session_exercise_id)
                .and_then(|entry| {
                    state
                        .sessions
                        .get(&entry.session_id)
                        .map(|session| (entry.exercise_id, session.user_id))
                })
                .ok_or_else(|| {
                    anyhow!(
                        "exercise set {} has no resolvable session exercise {}",
                        set_id,
                        set.session_exercise_id
                    )
                })?;

            let records: Vec<PersonalRecord> = state
                .personal_records
                .values()
                .filter(|r| r.user_id == user_id && r.exercise_id == exercise_id)
                .cloned()
                .collect();

            if stats::is_new_record(&records, weight, reps) {
                let id = next_id(&mut state.next_ids.personal_records);
                state.personal_records.insert(
                    id,
                    PersonalRecord {
                        id,
                        user_id,
                        exercise_id,
                        weight,
                        reps,
                        date: Utc::now(),
                    },
                );
                info!(user_id, exercise_id, weight, reps, "New personal record");
            }
        }

        Ok(Some(completed))
    }

    async fn delete_exercise_set(&self, set_id: i64) -> Result<bool> {
        let mut state = self.state.write().await;
        Ok(state.exercise_sets.remove(&set_id).is_some())
    }

    // ================================
    // Personal Records
    // ================================

    async fn get_personal_records(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<Vec<PersonalRecord>> {
        let state = self.state.read().await;
        let mut records: Vec<PersonalRecord> = state
            .personal_records
            .values()
            .filter(|r| r.user_id == user_id && r.exercise_id == exercise_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.id);
        Ok(records)
    }

    async fn get_recent_personal_records(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<PersonalRecordWithExercise>> {
        let state = self.state.read().await;
        let mut records: Vec<PersonalRecord> = state
            .personal_records
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        records.truncate(usize::try_from(limit)?);

        records
            .into_iter()
            .map(|record| {
                let exercise = state
                    .exercises
                    .get(&record.exercise_id)
                    .cloned()
                    .ok_or_else(|| {
                        anyhow!(
                            "personal record {} references missing exercise {}",
                            record.id,
                            record.exercise_id
                        )
                    })?;
                Ok(PersonalRecordWithExercise { record, exercise })
            })
            .collect()
    }

    async fn create_personal_record(
        &self,
        record: &NewPersonalRecord,
    ) -> Result<PersonalRecord> {
        let mut state = self.state.write().await;
        let id = next_id(&mut state.next_ids.personal_records);
        let created = PersonalRecord {
            id,
            user_id: record.user_id,
            exercise_id: record.exercise_id,
            weight: record.weight,
            reps: record.reps,
            date: record.date.unwrap_or_else(Utc::now),
        };
        state.personal_records.insert(id, created.clone());
        Ok(created)
    }

    // ================================
    // Training Statistics
    // ================================

    async fn get_weekly_workout_count(&self, user_id: i64, now: DateTime<Utc>) -> Result<i64> {
        let (start, end) = stats::week_window(now);
        let state = self.state.read().await;
        let count = state
            .sessions
            .values()
            .filter(|s| s.user_id == user_id && s.completed && s.date >= start && s.date < end)
            .count();
        Ok(i64::try_from(count)?)
    }

    async fn get_total_weight(&self, user_id: i64, since: DateTime<Utc>) -> Result<f64> {
        let state = self.state.read().await;
        let total = state
            .exercise_sets
            .values()
            .filter_map(|set| countable_volume(&state, set))
            .filter(|(uid, date, _)| *uid == user_id && *date >= since)
            .map(|(_, _, volume)| volume)
            .sum();
        Ok(total)
    }

    async fn get_weight_by_day(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
        days: i64,
    ) -> Result<Vec<DayWeight>> {
        let since = now - Duration::days(days);
        let state = self.state.read().await;

        let mut totals = vec![0.0_f64; usize::try_from(days)?];
        for set in state.exercise_sets.values() {
            let Some((uid, date, volume)) = countable_volume(&state, set) else {
                continue;
            };
            if uid != user_id || date < since {
                continue;
            }
            let bucket = stats::days_ago(now, date);
            if !(0..days).contains(&bucket) {
                continue;
            }
            let idx = usize::try_from(days - 1 - bucket)?;
            totals[idx] += volume;
        }

        let breakdown = stats::day_labels(now, usize::try_from(days)?)
            .into_iter()
            .zip(totals)
            .map(|(day, weight)| DayWeight {
                day: day.to_owned(),
                weight,
            })
            .collect();

        Ok(breakdown)
    }
}
