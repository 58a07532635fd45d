// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Upsert of user records keyed by (username, password).

use crate::db::{collections, document_id, Document, DocumentStore, StoreError, ID_FIELD};
use crate::error::AppError;
use crate::models::user::{profile_update, UserIdentity};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Per-identity locks serializing the find-then-write of an upsert.
pub type IdentityLocks = Arc<DashMap<UserIdentity, Arc<Mutex<()>>>>;

/// Removes an identity's lock entry when dropped, unless another request
/// still holds or waits on it.
struct LockEntry<'a> {
    locks: &'a DashMap<UserIdentity, Arc<Mutex<()>>>,
    identity: &'a UserIdentity,
}

impl Drop for LockEntry<'_> {
    fn drop(&mut self) {
        self.locks
            .remove_if(self.identity, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// Whether an upsert created a new user or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertStatus {
    Created,
    Updated,
}

/// Result of [`UserService::upsert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub user_id: String,
    pub status: UpsertStatus,
}

/// Resolves posted user records into inserts or in-place updates.
///
/// Two posts with the same identity never interleave within one process:
/// the lookup and the following write run under that identity's lock, so
/// the first post inserts and every later one updates.
#[derive(Clone)]
pub struct UserService {
    store: DocumentStore,
    locks: IdentityLocks,
}

impl UserService {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            locks: Arc::new(DashMap::new()),
        }
    }

    /// Insert `record` as a new user, or overwrite the profile fields of the
    /// user with the same username and password.
    ///
    /// `record` must already have passed required-field validation.
    pub async fn upsert(&self, record: Document) -> Result<UpsertOutcome, AppError> {
        let identity = UserIdentity::from_record(&record)?;

        // Declared before the lock handle so it drops after it, on return
        // or when the request is cancelled mid-upsert.
        let _entry = LockEntry {
            locks: &self.locks,
            identity: &identity,
        };
        let lock = self
            .locks
            .entry(identity.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let _guard = lock.lock().await;
        let outcome = self.upsert_locked(&identity, record).await;
        outcome
    }

    async fn upsert_locked(
        &self,
        identity: &UserIdentity,
        mut record: Document,
    ) -> Result<UpsertOutcome, AppError> {
        let existing = self
            .store
            .find_one_by(collections::USERS, &identity.filter())
            .await?;

        if let Some(existing) = existing {
            let user_id = document_id(&existing)
                .ok_or_else(|| StoreError::MissingId {
                    collection: collections::USERS.to_string(),
                })?
                .to_string();

            let update = profile_update(&record);
            let fields = update.len();
            self.store
                .update_fields(collections::USERS, &user_id, update)
                .await?;

            tracing::info!(
                username = %identity.username,
                user_id = %user_id,
                fields,
                "User updated"
            );

            return Ok(UpsertOutcome {
                user_id,
                status: UpsertStatus::Updated,
            });
        }

        record.remove(ID_FIELD);
        let user_id = self.store.insert(collections::USERS, record).await?;

        tracing::info!(username = %identity.username, user_id = %user_id, "User created");

        Ok(UpsertOutcome {
            user_id,
            status: UpsertStatus::Created,
        })
    }

    /// Number of identities currently holding an upsert lock.
    pub fn pending_identities(&self) -> usize {
        self.locks.len()
    }
}
