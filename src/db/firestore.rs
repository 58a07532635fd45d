// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore backend for the document store.
//!
//! Documents are written with their `_id` both as the Firestore document ID
//! and as a regular field, so reads need no special handling of Firestore
//! metadata beyond stripping the injected `_firestore_*` fields.

use super::{Document, StoreError};
use futures_util::StreamExt;

/// Prefix of the metadata fields the Firestore deserializer injects.
const FIRESTORE_META_PREFIX: &str = "_firestore_";

/// Field path Firestore uses for the document id in queries.
const DOCUMENT_NAME_PATH: &str = "__name__";

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreStore {
    client: firestore::FirestoreDb,
}

impl FirestoreStore {
    /// Connect to Firestore.
    ///
    /// `database_id` selects a named database; `None` uses the project's
    /// default database. For local development with the emulator, set
    /// FIRESTORE_EMULATOR_HOST.
    pub async fn connect(project_id: &str, database_id: Option<&str>) -> Result<Self, StoreError> {
        let mut options = firestore::FirestoreDbOptions::new(project_id.to_string());
        if let Some(database_id) = database_id {
            options = options.with_database_id(database_id.to_string());
        }

        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::connect_emulator(options).await;
        }

        let client = firestore::FirestoreDb::with_options(options)
            .await
            .map_err(|e| StoreError::Connection(format!("Firestore: {}", e)))?;

        tracing::info!(
            project = project_id,
            database = database_id.unwrap_or("(default)"),
            "Connected to Firestore"
        );

        Ok(Self { client })
    }

    /// Connect to the emulator with a dummy bearer token.
    async fn connect_emulator(options: firestore::FirestoreDbOptions) -> Result<Self, StoreError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| StoreError::Connection(format!("Firestore Emulator: {}", e)))?;

        tracing::info!("Connected to Firestore (Emulator/Unauthenticated)");

        Ok(Self { client })
    }

    /// Round-trip to the server to prove the connection is usable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let collections = self
            .list_collections()
            .await
            .map_err(|e| StoreError::Connection(format!("Firestore did not answer: {}", e)))?;
        tracing::debug!(collections = collections.len(), "Firestore ping succeeded");
        Ok(())
    }

    pub async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let names = self
            .client
            .fluent()
            .list()
            .collections()
            .stream_all()
            .await
            .map_err(|e| StoreError::operation("list collections", "*", e))?
            .collect::<Vec<String>>()
            .await;
        Ok(names)
    }

    /// Every document of `collection`, in document-id order.
    ///
    /// Ids are time-ordered, so this is the order the documents were inserted.
    pub async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let docs: Vec<Document> = self
            .client
            .fluent()
            .select()
            .from(collection)
            .order_by([(DOCUMENT_NAME_PATH, firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| StoreError::operation("find", collection, e))?;

        Ok(docs.into_iter().map(strip_metadata).collect())
    }

    pub async fn find_one_by(
        &self,
        collection: &str,
        filter: &[(&str, &str)],
    ) -> Result<Option<Document>, StoreError> {
        let docs: Vec<Document> = self
            .client
            .fluent()
            .select()
            .from(collection)
            .filter(|q| {
                q.for_all(
                    filter
                        .iter()
                        .map(|(field, value)| q.field(*field).eq(*value)),
                )
            })
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| StoreError::operation("find one", collection, e))?;

        Ok(docs.into_iter().next().map(strip_metadata))
    }

    pub async fn insert(
        &self,
        collection: &str,
        id: &str,
        document: &Document,
    ) -> Result<(), StoreError> {
        let _: Document = self
            .client
            .fluent()
            .insert()
            .into(collection)
            .document_id(id)
            .object(document)
            .execute()
            .await
            .map_err(|e| StoreError::operation("insert", collection, e))?;
        Ok(())
    }

    /// Write only the fields present in `fields` (Firestore update mask).
    pub async fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: &Document,
    ) -> Result<(), StoreError> {
        let mask: Vec<String> = fields.keys().cloned().collect();

        let _: Document = self
            .client
            .fluent()
            .update()
            .fields(mask)
            .in_col(collection)
            .document_id(id)
            .object(fields)
            .execute()
            .await
            .map_err(|e| StoreError::operation("update", collection, e))?;
        Ok(())
    }
}

fn strip_metadata(mut document: Document) -> Document {
    document.retain(|key, _| !key.starts_with(FIRESTORE_META_PREFIX));
    document
}
