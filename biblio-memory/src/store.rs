//! In-memory storage backend.
//!
//! Documents live as BSON documents in per-collection vectors behind an
//! async-aware read-write lock. Every lookup is a scan driven by the
//! expression evaluator, which is acceptable at catalog scale and matches
//! the addressing model the catalog uses (filters on application-chosen key
//! fields, never store-native identity).

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use bson::{Bson, Document};
use mea::rwlock::RwLock;

use biblio_core::{
    backend::{CatalogBackend, CatalogBackendBuilder},
    error::CatalogResult,
    query::{Expr, UpdateOp, UpdateOps},
};

use crate::evaluator::DocumentEvaluator;

type CollectionVec = Vec<Document>;
type StoreMap = HashMap<String, CollectionVec>;

/// Thread-safe in-memory catalog backend.
///
/// Cloneable; clones share the same underlying data through an `Arc`. Ideal
/// for tests and development; it makes no attempt at durability.
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder
    }
}

fn apply_update(document: &mut Document, update: &UpdateOps) {
    for op in update.ops() {
        match op {
            UpdateOp::Set { field, value } => {
                document.insert(field.clone(), value.clone());
            }
            UpdateOp::AddToSet { field, value } => match document.get_mut(field) {
                Some(Bson::Array(items)) => {
                    if !items.contains(value) {
                        items.push(value.clone());
                    }
                }
                // Missing or non-array fields become a one-element array.
                _ => {
                    document.insert(field.clone(), Bson::Array(vec![value.clone()]));
                }
            },
        }
    }
}

#[async_trait]
impl CatalogBackend for InMemoryStore {
    async fn insert_document(&self, document: Document, collection: &str) -> CatalogResult<()> {
        self.store
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(())
    }

    async fn find_documents(
        &self,
        filter: Option<Expr>,
        collection: &str,
    ) -> CatalogResult<Vec<Document>> {
        let store = self.store.read().await;
        let Some(documents) = store.get(collection) else {
            return Ok(vec![]);
        };

        match filter {
            Some(expr) => {
                let mut matching = Vec::new();
                for document in documents {
                    if DocumentEvaluator::matches(document, &expr)? {
                        matching.push(document.clone());
                    }
                }
                Ok(matching)
            }
            None => Ok(documents.clone()),
        }
    }

    async fn find_document(
        &self,
        filter: Expr,
        collection: &str,
    ) -> CatalogResult<Option<Document>> {
        let store = self.store.read().await;
        let Some(documents) = store.get(collection) else {
            return Ok(None);
        };

        for document in documents {
            if DocumentEvaluator::matches(document, &filter)? {
                return Ok(Some(document.clone()));
            }
        }

        Ok(None)
    }

    async fn update_document(
        &self,
        filter: Expr,
        update: UpdateOps,
        collection: &str,
    ) -> CatalogResult<u64> {
        let mut store = self.store.write().await;
        let Some(documents) = store.get_mut(collection) else {
            return Ok(0);
        };

        for document in documents.iter_mut() {
            if DocumentEvaluator::matches(document, &filter)? {
                apply_update(document, &update);
                return Ok(1);
            }
        }

        Ok(0)
    }

    async fn delete_documents(&self, filter: Expr, collection: &str) -> CatalogResult<u64> {
        let mut store = self.store.write().await;
        let Some(documents) = store.get_mut(collection) else {
            return Ok(0);
        };

        let mut kept = Vec::with_capacity(documents.len());
        let mut deleted = 0;
        for document in documents.drain(..) {
            if DocumentEvaluator::matches(&document, &filter)? {
                deleted += 1;
            } else {
                kept.push(document);
            }
        }
        *documents = kept;

        Ok(deleted)
    }
}

/// Builder for [`InMemoryStore`] instances. Building always succeeds.
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl CatalogBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    async fn build(self) -> CatalogResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}
