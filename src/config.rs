// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use axum::http::HeaderValue;
use std::env;
use std::str::FromStr;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_NAME: &str = "CHU_database";

/// Which document store backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Firestore,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(StoreBackend::Firestore),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(()),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Document store backend
    pub store_backend: StoreBackend,
    /// GCP project hosting the Firestore database
    pub gcp_project_id: Option<String>,
    /// Named Firestore database; the project default when unset
    pub firestore_database_id: Option<String>,
    /// Database name reported by `GET /`
    pub database_name: String,
    /// Only origin allowed by CORS; any origin when unset
    pub cors_allowed_origin: Option<HeaderValue>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            store_backend: StoreBackend::Memory,
            gcp_project_id: None,
            firestore_database_id: None,
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            cors_allowed_origin: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match var("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let store_backend = match var("STORE_BACKEND") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                var: "STORE_BACKEND",
                value: raw,
            })?,
            None => StoreBackend::Firestore,
        };

        let gcp_project_id = var("GCP_PROJECT_ID");
        if store_backend == StoreBackend::Firestore && gcp_project_id.is_none() {
            return Err(ConfigError::Missing("GCP_PROJECT_ID"));
        }

        let cors_allowed_origin = var("CORS_ALLOWED_ORIGIN")
            .map(|raw| {
                HeaderValue::from_str(&raw).map_err(|_| ConfigError::Invalid {
                    var: "CORS_ALLOWED_ORIGIN",
                    value: raw,
                })
            })
            .transpose()?;

        Ok(Self {
            port,
            store_backend,
            gcp_project_id,
            firestore_database_id: var("FIRESTORE_DATABASE_ID"),
            database_name: var("DATABASE_NAME")
                .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            cors_allowed_origin,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}
