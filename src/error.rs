// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::db::StoreError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}: {}", .missing.join(", "))]
    MissingFields {
        message: &'static str,
        missing: Vec<String>,
    },

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::MissingFields { message, missing } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message: message.to_string(),
                    missing: Some(missing),
                    error: None,
                    stack: None,
                },
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message: msg,
                    missing: None,
                    error: None,
                    stack: None,
                },
            ),
            AppError::Store(err) => {
                let stack = error_chain(&err);
                tracing::error!(error = %err, stack = %stack, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        message: "Internal Server Error".to_string(),
                        missing: None,
                        error: Some(err.to_string()),
                        stack: Some(stack),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Render an error and its sources, one per line, outermost first.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut lines = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        lines.push(cause.to_string());
        source = cause.source();
    }
    lines.join("\n")
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
