// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Required-field checks for inbound records.
//!
//! A field counts as missing when it is absent, `null`, or the empty
//! string. Any other value, including `0` and `false`, is present.

use crate::db::Document;
use crate::error::AppError;
use serde_json::Value;

/// Whether `value` satisfies a required field.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Required fields missing from `record`, in the order of `required`.
pub fn missing_fields<'a>(record: &Document, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|field| !is_present(record.get(*field)))
        .collect()
}

/// Fail with [`AppError::MissingFields`] carrying `message` if any
/// required field is missing.
pub fn require_fields(
    record: &Document,
    required: &[&str],
    message: &'static str,
) -> Result<(), AppError> {
    let missing = missing_fields(record, required);
    if missing.is_empty() {
        return Ok(());
    }

    Err(AppError::MissingFields {
        message,
        missing: missing.into_iter().map(str::to_string).collect(),
    })
}
