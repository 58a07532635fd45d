// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod heart_rates;
pub mod overview;
pub mod users;

use crate::AppState;
use axum::http::{header, HeaderValue, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Response for a successful document write.
///
/// `userId` carries the written document's identifier: the user's for
/// `POST /users`, the new reading's for `POST /heartrates`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteResponse {
    pub message: String,
    pub user_id: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// CORS policy: a single configured origin, or any origin when unset.
///
/// A request from any other origin gets no `Access-Control-Allow-Origin`.
fn cors_layer(allowed_origin: Option<&HeaderValue>) -> CorsLayer {
    match allowed_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(AllowOrigin::list([origin.clone()]))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT]),
        None => CorsLayer::permissive(),
    }
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(state.config.cors_allowed_origin.as_ref());

    Router::new()
        .route("/health", get(health_check))
        .merge(overview::routes())
        .merge(users::routes())
        .merge(heart_rates::routes())
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_response_uses_camel_case_id() {
        let response = WriteResponse {
            message: "Heart rate recorded successfully".to_string(),
            user_id: "0190f2".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"message": "Heart rate recorded successfully", "userId": "0190f2"})
        );
    }
}
