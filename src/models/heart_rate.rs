//! Heart-rate reading fields.
//!
//! Readings are appended as posted; `userId` is not checked against the
//! users collection.

/// Fields every posted reading must carry.
pub const REQUIRED_FIELDS: &[&str] = &["userId", "rate", "timestamp"];

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields (userId, rate, timestamp)";
