// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Camel Health Union server.
//!
//! This crate provides a small JSON API over two document collections:
//! user profiles (upserted by username and password) and heart-rate
//! readings (append-only).

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod validation;

use config::Config;
use db::DocumentStore;
use services::UserService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: DocumentStore,
    pub users: UserService,
}

impl AppState {
    /// Build the state around an already-connected store.
    pub fn new(config: Config, store: DocumentStore) -> Self {
        let users = UserService::new(store.clone());
        Self {
            config,
            store,
            users,
        }
    }
}
