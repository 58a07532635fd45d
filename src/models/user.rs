//! User record fields and identity.
//!
//! User documents are free-form JSON objects; only the fields below carry
//! meaning for the server.

use crate::db::Document;
use crate::error::AppError;
use std::fmt;

pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";

/// Fields every posted user record must carry.
pub const REQUIRED_FIELDS: &[&str] = &[
    USERNAME,
    PASSWORD,
    "clientId",
    "fitbitAccessToken",
    "age",
    "gender",
    "height",
    "weight",
    "memberSince",
    "averageDailySteps",
];

/// Fields overwritten when a post matches an existing user.
pub const PROFILE_FIELDS: &[&str] = &[
    "age",
    "gender",
    "height",
    "weight",
    "memberSince",
    "averageDailySteps",
    "fitbitAccessToken",
    "clientId",
];

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";

/// The (username, password) pair that identifies a user.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UserIdentity {
    pub username: String,
    password: String,
}

impl UserIdentity {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Extract the identity from a record whose required fields are present.
    ///
    /// Both fields must be JSON strings.
    pub fn from_record(record: &Document) -> Result<Self, AppError> {
        let field = |name: &str| {
            record
                .get(name)
                .and_then(|v| v.as_str())
                .ok_or_else(|| AppError::BadRequest(format!("'{}' must be a string", name)))
        };

        Ok(Self::new(field(USERNAME)?, field(PASSWORD)?))
    }

    /// Equality filter matching this identity.
    pub fn filter(&self) -> [(&str, &str); 2] {
        [(USERNAME, self.username.as_str()), (PASSWORD, self.password.as_str())]
    }
}

impl fmt::Debug for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserIdentity")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The subset of `record` written on update: the profile fields it carries.
pub fn profile_update(record: &Document) -> Document {
    PROFILE_FIELDS
        .iter()
        .filter_map(|&name| record.get(name).map(|v| (name.to_string(), v.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_identity_from_record() {
        let identity =
            UserIdentity::from_record(&doc(json!({"username": "a", "password": "b"}))).unwrap();

        assert_eq!(identity, UserIdentity::new("a", "b"));
        assert_eq!(identity.filter(), [("username", "a"), ("password", "b")]);
    }

    #[test]
    fn test_identity_requires_strings() {
        let err =
            UserIdentity::from_record(&doc(json!({"username": 42, "password": "b"}))).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", UserIdentity::new("alice", "hunter2"));
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_profile_update_excludes_identity_and_extras() {
        let record = doc(json!({
            "username": "a",
            "password": "b",
            "age": 30,
            "weight": 60,
            "nickname": "x",
        }));

        let update = profile_update(&record);

        assert_eq!(update.len(), 2);
        assert_eq!(update["age"], json!(30));
        assert_eq!(update["weight"], json!(60));
    }
}
