// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User routes.

use crate::db::{collections, Document};
use crate::error::Result;
use crate::models::user;
use crate::routes::WriteResponse;
use crate::services::UpsertStatus;
use crate::validation;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/users", get(list_users).post(post_user))
}

/// List every user document.
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Document>>> {
    let users = state.store.find_all(collections::USERS).await?;
    tracing::debug!(count = users.len(), "Fetched users");
    Ok(Json(users))
}

/// Create a user, or update the one with the same username and password.
///
/// Answers 201 on insert and 200 on update.
async fn post_user(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Document>, JsonRejection>,
) -> Result<(StatusCode, Json<WriteResponse>)> {
    let Json(record) = payload?;

    tracing::debug!(
        username = ?record.get(user::USERNAME),
        fields = record.len(),
        "Received user data"
    );

    validation::require_fields(
        &record,
        user::REQUIRED_FIELDS,
        user::MISSING_FIELDS_MESSAGE,
    )?;

    let outcome = state.users.upsert(record).await?;

    let (status, message) = match outcome.status {
        UpsertStatus::Created => (StatusCode::CREATED, "User created successfully"),
        UpsertStatus::Updated => (StatusCode::OK, "User updated successfully"),
    };

    Ok((
        status,
        Json(WriteResponse {
            message: message.to_string(),
            user_id: outcome.user_id,
        }),
    ))
}
