// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-local document store.
//!
//! Used for local development and the test suite. Collections are created
//! on first insert, like in the real database.

use super::{Document, ID_FIELD};
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory collections keyed by name, documents kept in insertion order.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<DashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_collections(&self) -> Vec<String> {
        self.collections.iter().map(|c| c.key().clone()).collect()
    }

    pub fn find_all(&self, collection: &str) -> Vec<Document> {
        self.collections
            .get(collection)
            .map(|docs| docs.value().clone())
            .unwrap_or_default()
    }

    pub fn find_one_by(&self, collection: &str, filter: &[(&str, &str)]) -> Option<Document> {
        let docs = self.collections.get(collection)?;
        let found = docs
            .iter()
            .find(|doc| {
                filter
                    .iter()
                    .all(|(field, value)| doc.get(*field).and_then(|v| v.as_str()) == Some(*value))
            })
            .cloned();
        found
    }

    pub fn insert(&self, collection: &str, document: Document) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
    }

    /// Returns `false` if no document has identifier `id`.
    pub fn update_fields(&self, collection: &str, id: &str, fields: Document) -> bool {
        let Some(mut docs) = self.collections.get_mut(collection) else {
            return false;
        };

        let Some(doc) = docs
            .iter_mut()
            .find(|doc| doc.get(ID_FIELD).and_then(|v| v.as_str()) == Some(id))
        else {
            return false;
        };

        doc.extend(fields);
        true
    }
}
