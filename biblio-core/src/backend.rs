//! Storage backend abstraction for the catalog.
//!
//! The [`CatalogBackend`] trait captures the document-store boundary the
//! catalog depends on: per-collection insert, find, update and delete with a
//! filter-predicate language (see [`crate::query`]) and update operators
//! including add-to-set. Nothing above this trait knows which driver is in
//! use.
//!
//! Implementations must be thread-safe (`Send + Sync`) and support concurrent
//! access from multiple async tasks; the exact concurrency model is
//! implementation-specific. No operation defines a timeout or cancellation of
//! its own; callers needing bounded latency impose their own deadline.

use async_trait::async_trait;
use bson::Document;
use std::fmt::Debug;

use crate::{
    error::CatalogResult,
    query::{Expr, UpdateOps},
};

/// Abstract interface for document storage backends.
///
/// Documents are raw BSON documents; addressing is always by filter, never by
/// a store-native identity, because the catalog keys its documents on
/// application-chosen fields.
#[async_trait]
pub trait CatalogBackend: Send + Sync + Debug {
    /// Inserts one document into a collection.
    ///
    /// The collection is created automatically if it does not exist. No
    /// uniqueness check is performed on any field; enforcing key uniqueness
    /// is the store's concern (e.g. through a unique index).
    async fn insert_document(&self, document: Document, collection: &str) -> CatalogResult<()>;

    /// Returns all documents matching the filter, or every document in the
    /// collection when no filter is given.
    ///
    /// A missing collection yields an empty result, not an error.
    async fn find_documents(
        &self,
        filter: Option<Expr>,
        collection: &str,
    ) -> CatalogResult<Vec<Document>>;

    /// Returns the first document matching the filter, if any.
    async fn find_document(
        &self,
        filter: Expr,
        collection: &str,
    ) -> CatalogResult<Option<Document>>;

    /// Applies the update operations to the first document matching the
    /// filter and returns the number of documents matched (0 or 1).
    ///
    /// A zero return is not an error at this level; callers decide whether
    /// an unmatched update is a not-found condition.
    async fn update_document(
        &self,
        filter: Expr,
        update: UpdateOps,
        collection: &str,
    ) -> CatalogResult<u64>;

    /// Deletes every document matching the filter and returns the number of
    /// documents removed.
    async fn delete_documents(&self, filter: Expr, collection: &str) -> CatalogResult<u64>;

    /// Cleanly shuts down the backend, releasing the session and any other
    /// resources it holds. Consumes the backend; there is no reconnect.
    async fn shutdown(self) -> CatalogResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// Factory trait for constructing connected backend instances.
///
/// Building performs whatever handshake the driver needs; a backend handed to
/// the catalog is already connected. Re-running `connect` against a live
/// session is therefore unrepresentable rather than guarded at runtime.
#[async_trait]
pub trait CatalogBackendBuilder {
    type Backend: CatalogBackend;

    async fn build(self) -> CatalogResult<Self::Backend>;
}
