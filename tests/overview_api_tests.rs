// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Root route and health check tests.

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{create_test_app, heart_rate, send, valid_user};

#[tokio::test]
async fn test_overview_of_empty_database() {
    let (app, _state) = create_test_app();

    let (status, body) = send(&app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the Camel Health Union server");
    assert_eq!(body["database"], "CHU_database");
    assert_eq!(body["collections"], json!({}));
}

#[tokio::test]
async fn test_overview_dumps_every_collection() {
    let (app, _state) = create_test_app();

    send(&app, "POST", "/users", Some(valid_user())).await;
    send(
        &app,
        "POST",
        "/heartrates",
        Some(heart_rate("u1", 72, "2026-01-01T10:00:00Z")),
    )
    .await;
    send(
        &app,
        "POST",
        "/heartrates",
        Some(heart_rate("u1", 74, "2026-01-01T10:05:00Z")),
    )
    .await;

    let (status, body) = send(&app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    let collections = body["collections"].as_object().unwrap();
    assert_eq!(
        collections.keys().collect::<Vec<_>>(),
        vec!["heartrates", "users"]
    );
    assert_eq!(collections["users"].as_array().unwrap().len(), 1);
    assert_eq!(collections["users"][0]["username"], "a");

    let readings = collections["heartrates"].as_array().unwrap();
    assert_eq!(readings.len(), 2);
    assert_eq!(readings[0]["rate"], 72);
    assert_eq!(readings[1]["rate"], 74);
}

#[tokio::test]
async fn test_health_check() {
    let (app, _state) = create_test_app();

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_responses_carry_security_headers() {
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    let (app, _state) = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/users").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("X-Content-Type-Options").unwrap(),
        "nosniff"
    );
    assert_eq!(response.headers().get("Cache-Control").unwrap(), "no-store");
}
