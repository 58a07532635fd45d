// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Heart-rate routes. Readings are append-only.

use crate::db::{collections, Document};
use crate::error::Result;
use crate::models::heart_rate;
use crate::routes::WriteResponse;
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
    Router::new().route("/heartrates", get(list_heart_rates).post(post_heart_rate))
}

async fn list_heart_rates(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Document>>> {
    let readings = state.store.find_all(collections::HEART_RATES).await?;
    tracing::debug!(count = readings.len(), "Fetched heart rates");
    Ok(Json(readings))
}

/// Record a reading. There is no dedup: every valid post is a new document.
///
/// The response's `userId` is the identifier of the new reading.
async fn post_heart_rate(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Document>, JsonRejection>,
) -> Result<(StatusCode, Json<WriteResponse>)> {
    let Json(reading) = payload?;

    validation::require_fields(
        &reading,
        heart_rate::REQUIRED_FIELDS,
        heart_rate::MISSING_FIELDS_MESSAGE,
    )?;

    let id = state.store.insert(collections::HEART_RATES, reading).await?;
    tracing::info!(id = %id, "Heart rate recorded");

    Ok((
        StatusCode::CREATED,
        Json(WriteResponse {
            message: "Heart rate recorded successfully".to_string(),
            user_id: id,
        }),
    ))
}
