// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chu_server::config::Config;
use chu_server::db::DocumentStore;
use chu_server::routes::create_router;
use chu_server::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test app backed by the in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with_config(Config::default())
}

/// Create an in-memory test app with a custom configuration.
#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (Router, Arc<AppState>) {
    let store = DocumentStore::in_memory(config.database_name.clone());
    let state = Arc::new(AppState::new(config, store));
    (create_router(state.clone()), state)
}

/// Create a test app whose store fails every operation.
#[allow(dead_code)]
pub fn create_offline_app() -> (Router, Arc<AppState>) {
    let config = Config::default();
    let store = DocumentStore::offline(config.database_name.clone());
    let state = Arc::new(AppState::new(config, store));
    (create_router(state.clone()), state)
}

/// The user record from the API documentation.
#[allow(dead_code)]
pub fn valid_user() -> Value {
    json!({
        "username": "a",
        "password": "b",
        "clientId": "c1",
        "fitbitAccessToken": "t1",
        "age": 30,
        "gender": "f",
        "height": 170,
        "weight": 60,
        "memberSince": "2020",
        "averageDailySteps": 5000
    })
}

#[allow(dead_code)]
pub fn heart_rate(user_id: &str, rate: u32, timestamp: &str) -> Value {
    json!({ "userId": user_id, "rate": rate, "timestamp": timestamp })
}

/// Send a request and return the status and the JSON body (`Null` if empty).
#[allow(dead_code)]
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}
