// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Root route: dump of every collection in the database.

use crate::db::Document;
use crate::error::Result;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

const WELCOME_MESSAGE: &str = "Welcome to the Camel Health Union server";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(overview))
}

#[derive(Serialize)]
pub struct OverviewResponse {
    pub message: String,
    pub database: String,
    /// Every document of every collection, keyed by collection name.
    pub collections: BTreeMap<String, Vec<Document>>,
}

/// Fetch all documents of all collections.
///
/// This is an unbounded scan of the whole database on every request.
async fn overview(State(state): State<Arc<AppState>>) -> Result<Json<OverviewResponse>> {
    let names = state.store.list_collections().await?;

    let mut collections = BTreeMap::new();
    for name in names {
        let docs = state.store.find_all(&name).await?;
        tracing::debug!(collection = %name, count = docs.len(), "Fetched collection");
        collections.insert(name, docs);
    }

    Ok(Json(OverviewResponse {
        message: WELCOME_MESSAGE.to_string(),
        database: state.store.database_name().to_string(),
        collections,
    }))
}
