// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod users;

pub use users::{UpsertOutcome, UpsertStatus, UserService};
