// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Document store layer.
//!
//! Documents are plain JSON objects. Every stored document carries its
//! identifier under [`ID_FIELD`]; identifiers are always assigned here on
//! insert, never taken from the client. Identifiers are UUID v7 in simple
//! form, so their string order is insertion order and Firestore, which
//! returns documents by id, lists a collection in the order it was written.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

use crate::config::{Config, StoreBackend};

/// A stored or inbound document.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Field holding the document identifier.
pub const ID_FIELD: &str = "_id";

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const HEART_RATES: &str = "heartrates";
}

/// Errors raised by the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to connect to document store: {0}")]
    Connection(String),

    #[error("{op} on collection '{collection}' failed")]
    Operation {
        op: &'static str,
        collection: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Document {id} not found in collection '{collection}'")]
    DocumentNotFound { collection: String, id: String },

    #[error("Document in collection '{collection}' has no _id")]
    MissingId { collection: String },

    #[error("Database not connected (offline mode)")]
    Offline,
}

impl StoreError {
    pub(crate) fn operation<E>(op: &'static str, collection: &str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Operation {
            op,
            collection: collection.to_string(),
            source: Box::new(source),
        }
    }
}

#[derive(Clone)]
enum Backend {
    Firestore(FirestoreStore),
    Memory(MemoryStore),
    Offline,
    /// Every operation waits forever.
    #[cfg(test)]
    Stalled,
}

/// Handle to the configured document database.
///
/// Cloning is cheap; all clones share one underlying client.
#[derive(Clone)]
pub struct DocumentStore {
    backend: Backend,
    database: String,
}

impl DocumentStore {
    /// Open the backend selected by `config`.
    ///
    /// Fails unless the store answered a collection listing, so the server
    /// never starts against a dead connection.
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        let backend = match config.store_backend {
            StoreBackend::Firestore => {
                let project_id = config.gcp_project_id.as_deref().ok_or_else(|| {
                    StoreError::Connection("GCP project id is not configured".to_string())
                })?;
                let store =
                    FirestoreStore::connect(project_id, config.firestore_database_id.as_deref())
                        .await?;
                store.ping().await?;
                Backend::Firestore(store)
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory document store; data is lost on exit");
                Backend::Memory(MemoryStore::new())
            }
        };

        Ok(Self {
            backend,
            database: config.database_name.clone(),
        })
    }

    /// Create a store backed by process memory.
    pub fn in_memory(database: impl Into<String>) -> Self {
        Self {
            backend: Backend::Memory(MemoryStore::new()),
            database: database.into(),
        }
    }

    /// Create a disconnected store for testing.
    ///
    /// All operations return [`StoreError::Offline`].
    pub fn offline(database: impl Into<String>) -> Self {
        Self {
            backend: Backend::Offline,
            database: database.into(),
        }
    }

    /// Create a store whose operations never complete.
    #[cfg(test)]
    pub(crate) fn stalled(database: impl Into<String>) -> Self {
        Self {
            backend: Backend::Stalled,
            database: database.into(),
        }
    }

    /// Name of the database reported to clients.
    pub fn database_name(&self) -> &str {
        &self.database
    }

    /// Names of all collections, sorted.
    pub async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let mut names = match &self.backend {
            Backend::Firestore(store) => store.list_collections().await?,
            Backend::Memory(store) => store.list_collections(),
            Backend::Offline => return Err(StoreError::Offline),
            #[cfg(test)]
            Backend::Stalled => std::future::pending().await,
        };
        names.sort();
        Ok(names)
    }

    /// Every document in `collection`.
    pub async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        match &self.backend {
            Backend::Firestore(store) => store.find_all(collection).await,
            Backend::Memory(store) => Ok(store.find_all(collection)),
            Backend::Offline => Err(StoreError::Offline),
            #[cfg(test)]
            Backend::Stalled => std::future::pending().await,
        }
    }

    /// First document whose string fields equal every `(field, value)` pair.
    pub async fn find_one_by(
        &self,
        collection: &str,
        filter: &[(&str, &str)],
    ) -> Result<Option<Document>, StoreError> {
        match &self.backend {
            Backend::Firestore(store) => store.find_one_by(collection, filter).await,
            Backend::Memory(store) => Ok(store.find_one_by(collection, filter)),
            Backend::Offline => Err(StoreError::Offline),
            #[cfg(test)]
            Backend::Stalled => std::future::pending().await,
        }
    }

    /// Insert `document` under a fresh identifier and return that identifier.
    ///
    /// Any `_id` already present in `document` is replaced.
    pub async fn insert(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<String, StoreError> {
        let id = uuid::Uuid::now_v7().simple().to_string();
        document.insert(ID_FIELD.to_string(), id.clone().into());

        match &self.backend {
            Backend::Firestore(store) => store.insert(collection, &id, &document).await?,
            Backend::Memory(store) => store.insert(collection, document),
            Backend::Offline => return Err(StoreError::Offline),
            #[cfg(test)]
            Backend::Stalled => std::future::pending().await,
        }

        tracing::debug!(collection, id = %id, "Document inserted");
        Ok(id)
    }

    /// Overwrite the given top-level fields of document `id`.
    ///
    /// Fields not named in `fields` are left as they are.
    pub async fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<(), StoreError> {
        match &self.backend {
            Backend::Firestore(store) => store.update_fields(collection, id, &fields).await,
            Backend::Memory(store) => {
                if store.update_fields(collection, id, fields) {
                    Ok(())
                } else {
                    Err(StoreError::DocumentNotFound {
                        collection: collection.to_string(),
                        id: id.to_string(),
                    })
                }
            }
            Backend::Offline => Err(StoreError::Offline),
            #[cfg(test)]
            Backend::Stalled => std::future::pending().await,
        }
    }

    /// Release the store at shutdown.
    pub async fn close(self) {
        match self.backend {
            Backend::Firestore(_) => tracing::info!(database = %self.database, "Firestore client closed"),
            Backend::Memory(store) => tracing::info!(
                database = %self.database,
                collections = store.list_collections().len(),
                "In-memory store dropped"
            ),
            Backend::Offline => {}
            #[cfg(test)]
            Backend::Stalled => {}
        }
    }
}

/// Document identifier, if the document has a string `_id`.
pub fn document_id(document: &Document) -> Option<&str> {
    document.get(ID_FIELD).and_then(|v| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_fresh_id() {
        let store = DocumentStore::in_memory("test");

        let id = store
            .insert(collections::HEART_RATES, doc(json!({"_id": "client", "rate": 60})))
            .await
            .unwrap();

        assert_ne!(id, "client");
        let stored = store.find_all(collections::HEART_RATES).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(document_id(&stored[0]), Some(id.as_str()));
    }

    #[tokio::test]
    async fn test_ids_sort_in_insertion_order() {
        let store = DocumentStore::in_memory("test");

        let mut ids = vec![];
        for rate in 60..80 {
            let id = store
                .insert(collections::HEART_RATES, doc(json!({"rate": rate})))
                .await
                .unwrap();
            ids.push(id);
        }

        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted, "Ids must sort in the order they were issued");
    }

    #[tokio::test]
    async fn test_update_missing_document_is_error() {
        let store = DocumentStore::in_memory("test");

        let err = store
            .update_fields(collections::USERS, "nope", doc(json!({"age": 1})))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::DocumentNotFound { .. }));
    }

    #[tokio::test]
    async fn test_offline_store_rejects_everything() {
        let store = DocumentStore::offline("test");

        assert!(matches!(
            store.list_collections().await,
            Err(StoreError::Offline)
        ));
        assert!(matches!(
            store.insert(collections::USERS, Document::new()).await,
            Err(StoreError::Offline)
        ));
    }

    #[tokio::test]
    async fn test_list_collections_sorted() {
        let store = DocumentStore::in_memory("test");
        store.insert("zeta", Document::new()).await.unwrap();
        store.insert("alpha", Document::new()).await.unwrap();

        assert_eq!(
            store.list_collections().await.unwrap(),
            vec!["alpha".to_string(), "zeta".to_string()]
        );
    }
}
