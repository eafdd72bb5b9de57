// ABOUTME: End-to-end HTTP tests over the assembled router
// ABOUTME: Drives the API the way a client would, from registration to personal records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;

use axum::Router;
use helpers::axum_test::AxumTestRequest;
use liftlog_server::config::ServerConfig;
use liftlog_server::database_plugins::{factory::Database, DatabaseProvider};
use liftlog_server::identity::IdentityRegistry;
use liftlog_server::server::{HttpServer, ServerResources};
use serde_json::{json, Value};

/// A full router over a fresh in-memory database
async fn test_app() -> Router {
    common::init_test_logging();
    let database = Database::new("memory://").await.unwrap();
    let config = ServerConfig::default();
    let identity = IdentityRegistry::from_config(&config.identity);
    let resources = Arc::new(ServerResources::new(database, config, identity));
    HttpServer::new(resources).router()
}

async fn seed_exercise_http(app: &Router, name: &str, category: &str) -> i64 {
    let response = AxumTestRequest::post("/api/exercises")
        .json(&json!({ "name": name, "category": category }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    response.json::<Value>()["id"].as_i64().unwrap()
}

async fn seed_workout_http(app: &Router, name: &str, entries: &[(i64, i64)]) -> Value {
    let exercises: Vec<Value> = entries
        .iter()
        .map(|(exercise_id, sets)| {
            json!({ "exercise_id": exercise_id, "sets": sets, "reps": "8-10" })
        })
        .collect();
    let response = AxumTestRequest::post("/api/workouts")
        .json(&json!({ "name": name, "exercises": exercises }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    response.json()
}

// ============================================================================
// Health and identity surface
// ============================================================================

#[tokio::test]
async fn test_health_reports_backend_and_uptime() {
    let app = test_app().await;

    let response = AxumTestRequest::get("/api/health").send(app).await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "memory");
    assert!(body["uptime_seconds"].is_number());
}

#[tokio::test]
async fn test_provider_listing_is_empty_without_credentials() {
    let app = test_app().await;

    let response = AxumTestRequest::get("/api/auth/providers").send(app).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.json::<Value>(), json!([]));
}

// ============================================================================
// User registration
// ============================================================================

#[tokio::test]
async fn test_user_registration_flow() {
    let app = test_app().await;

    let response = AxumTestRequest::post("/api/users")
        .json(&json!({ "username": "anna", "password": "secret" }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json();
    assert_eq!(body["id"], 1);
    assert_eq!(body["username"], "anna");
    // Credentials never leave the server
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    let response = AxumTestRequest::get("/api/users/1").send(app.clone()).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.json::<Value>()["username"], "anna");

    let response = AxumTestRequest::post("/api/users")
        .json(&json!({ "username": "anna" }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 409);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");

    let response = AxumTestRequest::post("/api/users")
        .json(&json!({ "username": "   " }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
    assert_eq!(body["error"]["details"]["field"], "username");

    let response = AxumTestRequest::get("/api/users/999").send(app).await;
    assert_eq!(response.status(), 404);
}

// ============================================================================
// Exercise catalog
// ============================================================================

#[tokio::test]
async fn test_exercise_catalog_crud() {
    let app = test_app().await;

    let response = AxumTestRequest::get("/api/exercises").send(app.clone()).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 0);

    // Category case is canonicalized on the way in
    let response = AxumTestRequest::post("/api/exercises")
        .json(&json!({ "name": "Bench Press", "category": "chest" }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let bench: Value = response.json();
    assert_eq!(bench["category"], "Chest");
    let bench_id = bench["id"].as_i64().unwrap();

    seed_exercise_http(&app, "Squat", "Legs").await;

    let response = AxumTestRequest::get("/api/exercises").send(app.clone()).await;
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 2);

    let response = AxumTestRequest::get("/api/exercises?category=legs")
        .send(app.clone())
        .await;
    let listed: Value = response.json();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["name"], "Squat");

    // The wildcard behaves like no filter at all
    let response = AxumTestRequest::get("/api/exercises?category=All")
        .send(app.clone())
        .await;
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 2);

    let response = AxumTestRequest::get("/api/exercises?category=yoga")
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);
    assert_eq!(response.json::<Value>()["error"]["code"], "INVALID_INPUT");

    // The wildcard is not storable
    let response = AxumTestRequest::post("/api/exercises")
        .json(&json!({ "name": "Everything", "category": "All" }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);
    assert!(response.json::<Value>()["error"]["message"]
        .as_str()
        .unwrap()
        .contains("filter"));

    let response = AxumTestRequest::get("/api/exercises/categories")
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.json::<Value>(),
        json!(["All", "Chest", "Back", "Legs", "Shoulders", "Arms", "Core", "Cardio"])
    );

    let response = AxumTestRequest::put(&format!("/api/exercises/{bench_id}"))
        .json(&json!({ "description": "Flat barbell press" }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let updated: Value = response.json();
    assert_eq!(updated["name"], "Bench Press");
    assert_eq!(updated["description"], "Flat barbell press");

    let response = AxumTestRequest::put("/api/exercises/999")
        .json(&json!({ "description": "nope" }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 404);

    let response = AxumTestRequest::delete(&format!("/api/exercises/{bench_id}"))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 204);
    let response = AxumTestRequest::get(&format!("/api/exercises/{bench_id}"))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 404);
    let response = AxumTestRequest::delete(&format!("/api/exercises/{bench_id}"))
        .send(app)
        .await;
    assert_eq!(response.status(), 404);
}

// ============================================================================
// Workout templates
// ============================================================================

#[tokio::test]
async fn test_workout_creation_builds_ordered_entries() {
    let app = test_app().await;
    let bench = seed_exercise_http(&app, "Bench Press", "Chest").await;
    let squat = seed_exercise_http(&app, "Squat", "Legs").await;

    let response = AxumTestRequest::post("/api/workouts")
        .json(&json!({
            "name": "Push Day",
            "exercises": [
                { "exercise_id": bench, "sets": 4, "reps": "8-10", "weight": "60" },
                { "exercise_id": squat, "sets": 5, "reps": "5" }
            ]
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let workout: Value = response.json();
    assert_eq!(workout["name"], "Push Day");

    let entries = workout["exercises"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["order_index"], 1);
    assert_eq!(entries[0]["exercise"]["name"], "Bench Press");
    assert_eq!(entries[0]["weight"], "60");
    assert_eq!(entries[1]["order_index"], 2);
    assert_eq!(entries[1]["exercise"]["name"], "Squat");

    let workout_id = workout["id"].as_i64().unwrap();
    let response = AxumTestRequest::get(&format!("/api/workouts/{workout_id}"))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);

    // Listings default to the single-user id
    let response = AxumTestRequest::get("/api/workouts").send(app.clone()).await;
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 1);
    let response = AxumTestRequest::get("/api/workouts?user_id=2")
        .send(app.clone())
        .await;
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 0);

    // Supplying exercises on update replaces the whole list
    let response = AxumTestRequest::put(&format!("/api/workouts/{workout_id}"))
        .json(&json!({
            "exercises": [{ "exercise_id": squat, "sets": 3, "reps": "10" }]
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let updated: Value = response.json();
    assert_eq!(updated["name"], "Push Day");
    let entries = updated["exercises"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["order_index"], 1);
    assert_eq!(entries[0]["exercise"]["name"], "Squat");

    let response = AxumTestRequest::delete(&format!("/api/workouts/{workout_id}"))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 204);
    let response = AxumTestRequest::get(&format!("/api/workouts/{workout_id}"))
        .send(app)
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_workout_validation_rejects_bad_entries() {
    let app = test_app().await;
    let bench = seed_exercise_http(&app, "Bench Press", "Chest").await;

    let response = AxumTestRequest::post("/api/workouts")
        .json(&json!({ "name": "   " }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);
    assert_eq!(
        response.json::<Value>()["error"]["details"]["field"],
        "name"
    );

    let response = AxumTestRequest::post("/api/workouts")
        .json(&json!({
            "name": "Bad",
            "exercises": [{ "exercise_id": 999, "sets": 3, "reps": "8" }]
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);
    assert_eq!(
        response.json::<Value>()["error"]["details"]["field"],
        "exercise_id"
    );

    let response = AxumTestRequest::post("/api/workouts")
        .json(&json!({
            "name": "Bad",
            "exercises": [{ "exercise_id": bench, "sets": 0, "reps": "8" }]
        }))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
    assert_eq!(response.json::<Value>()["error"]["details"]["field"], "sets");
}

// ============================================================================
// Sessions, sets, and the record feed
// ============================================================================

#[tokio::test]
async fn test_session_lifecycle_end_to_end() {
    let app = test_app().await;
    let bench = seed_exercise_http(&app, "Bench Press", "Chest").await;
    let workout = seed_workout_http(&app, "Push Day", &[(bench, 2)]).await;
    let workout_id = workout["id"].as_i64().unwrap();

    // Start a session with materialized exercises and empty sets
    let response = AxumTestRequest::post("/api/workout-sessions")
        .json(&json!({
            "workout_id": workout_id,
            "add_exercises": true,
            "notes": "first heavy day"
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let session: Value = response.json();
    let session_id = session["id"].as_i64().unwrap();
    assert_eq!(session["workout"]["id"].as_i64().unwrap(), workout_id);
    assert_eq!(session["completed"], false);

    let exercises = session["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 1);
    let session_exercise_id = exercises[0]["id"].as_i64().unwrap();
    let sets = exercises[0]["sets"].as_array().unwrap();
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0]["set_number"], 1);
    let set_id = sets[0]["id"].as_i64().unwrap();

    // Log the lift, then complete set, exercise, and session
    let response = AxumTestRequest::put(&format!("/api/exercise-sets/{set_id}"))
        .json(&json!({ "weight": 100.0, "reps": 5 }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let logged = response.json::<Value>()["weight"].as_f64().unwrap();
    assert!((logged - 100.0).abs() < f64::EPSILON);

    let response = AxumTestRequest::put(&format!("/api/exercise-sets/{set_id}/complete"))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.json::<Value>()["completed"], true);

    let response =
        AxumTestRequest::put(&format!("/api/session-exercises/{session_exercise_id}/complete"))
            .send(app.clone())
            .await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.json::<Value>()["completed"], true);

    let response = AxumTestRequest::put(&format!("/api/workout-sessions/{session_id}/complete"))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.json::<Value>()["completed"], true);

    // The completed 100x5 set opened a personal record
    let response = AxumTestRequest::get("/api/stats/personal-records")
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let records: Value = response.json();
    assert_eq!(records.as_array().unwrap().len(), 1);
    assert_eq!(records[0]["exercise"]["name"], "Bench Press");
    assert!((records[0]["weight"].as_f64().unwrap() - 100.0).abs() < f64::EPSILON);
    assert_eq!(records[0]["reps"], 5);

    // And the completed session counts toward the weekly goal
    let response = AxumTestRequest::get("/api/stats/weekly-workouts")
        .send(app.clone())
        .await;
    let weekly: Value = response.json();
    assert_eq!(weekly["count"], 1);
    assert_eq!(weekly["goal"], 5);
    assert_eq!(weekly["percentage"], 20);

    let response = AxumTestRequest::get("/api/workout-sessions/recent")
        .send(app.clone())
        .await;
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 1);

    let response = AxumTestRequest::get("/api/workout-sessions")
        .send(app.clone())
        .await;
    let listed: Value = response.json();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["workout"]["id"].as_i64().unwrap(), workout_id);

    let response = AxumTestRequest::put(&format!("/api/workout-sessions/{session_id}"))
        .json(&json!({ "notes": "pr day" }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.json::<Value>()["notes"], "pr day");

    let response = AxumTestRequest::delete(&format!("/api/workout-sessions/{session_id}"))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 204);
    let response = AxumTestRequest::get(&format!("/api/workout-sessions/{session_id}"))
        .send(app)
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_session_creation_requires_an_existing_workout() {
    let app = test_app().await;

    let response = AxumTestRequest::post("/api/workout-sessions")
        .json(&json!({ "workout_id": 999 }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);
    assert_eq!(
        response.json::<Value>()["error"]["details"]["field"],
        "workout_id"
    );

    let response = AxumTestRequest::get("/api/workout-sessions/recent?limit=0")
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_set_routes_validation_and_method_guard() {
    let app = test_app().await;
    let bench = seed_exercise_http(&app, "Bench Press", "Chest").await;
    let workout = seed_workout_http(&app, "Push Day", &[(bench, 1)]).await;

    let response = AxumTestRequest::post("/api/workout-sessions")
        .json(&json!({ "workout_id": workout["id"], "add_exercises": true }))
        .send(app.clone())
        .await;
    let session: Value = response.json();
    let session_exercise_id = session["exercises"][0]["id"].as_i64().unwrap();
    let set_id = session["exercises"][0]["sets"][0]["id"].as_i64().unwrap();

    // An extra set beyond the planned ones
    let response = AxumTestRequest::post("/api/exercise-sets")
        .json(&json!({
            "session_exercise_id": session_exercise_id,
            "set_number": 2,
            "weight": 50.0,
            "reps": 8
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    assert_eq!(response.json::<Value>()["set_number"], 2);

    let response = AxumTestRequest::post("/api/exercise-sets")
        .json(&json!({ "session_exercise_id": session_exercise_id, "set_number": 0 }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);
    assert_eq!(
        response.json::<Value>()["error"]["details"]["field"],
        "set_number"
    );

    let response = AxumTestRequest::put("/api/exercise-sets/999")
        .json(&json!({ "weight": 1.0 }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 404);
    let response = AxumTestRequest::put("/api/exercise-sets/999/complete")
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 404);

    // Sets cannot be deleted individually; they go with their session
    let response = AxumTestRequest::delete(&format!("/api/exercise-sets/{set_id}"))
        .send(app)
        .await;
    assert_eq!(response.status(), 405);
}

// ============================================================================
// Statistics endpoints
// ============================================================================

#[tokio::test]
async fn test_stats_defaults_and_validation() {
    let app = test_app().await;

    let response = AxumTestRequest::get("/api/stats/weekly-workouts").send(app.clone()).await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.json::<Value>(),
        json!({ "count": 0, "goal": 5, "percentage": 0 })
    );

    let response = AxumTestRequest::get("/api/stats/total-weight").send(app.clone()).await;
    assert_eq!(response.status(), 200);
    assert!(response.json::<Value>()["total_weight"].as_f64().unwrap().abs() < f64::EPSILON);

    let response = AxumTestRequest::get("/api/stats/total-weight?days=0")
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    let response = AxumTestRequest::get("/api/stats/weight-by-day").send(app.clone()).await;
    assert_eq!(response.status(), 200);
    let series: Value = response.json();
    assert_eq!(series.as_array().unwrap().len(), 7);
    assert!(series[0]["day"].is_string());
    assert!(series[0]["weight"].is_number());

    let response = AxumTestRequest::get("/api/stats/weight-by-day?days=14")
        .send(app.clone())
        .await;
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 14);

    let response = AxumTestRequest::get("/api/stats/weight-by-day?days=0")
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);
    let response = AxumTestRequest::get("/api/stats/weight-by-day?days=366")
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    let response = AxumTestRequest::get("/api/stats/personal-records")
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.json::<Value>(), json!([]));

    let response = AxumTestRequest::get("/api/stats/personal-records?limit=0")
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
}
