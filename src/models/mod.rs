// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Record shapes for the two collections.

pub mod heart_rate;
pub mod user;

pub use user::UserIdentity;
