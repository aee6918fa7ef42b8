//! MongoDB storage backend.

use async_trait::async_trait;
use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::{Client, Collection as MongoCollection, options::ClientOptions};

use biblio_core::{
    backend::{CatalogBackend, CatalogBackendBuilder},
    error::{CatalogError, CatalogResult},
    query::{Expr, QueryVisitor, UpdateOp, UpdateOps},
};

use crate::{config::MongoConfig, query::MongoQueryTranslator};

/// Catalog backend over a MongoDB database.
///
/// Collections hold raw BSON documents keyed on application-chosen id fields;
/// the store's native `_id` is left to the server. Every driver failure is
/// wrapped into [`CatalogError::Store`] with the original error preserved as
/// the source.
#[derive(Debug)]
pub struct MongoDbStore {
    client: Client,
    database: String,
}

impl MongoDbStore {
    /// Wraps an already constructed client.
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    /// Creates a builder that will connect to `dsn` and open `database`.
    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(collection_name)
    }
}

fn filter_to_document(filter: &Expr) -> CatalogResult<Document> {
    MongoQueryTranslator.visit_expr(filter)
}

fn update_to_document(update: &UpdateOps) -> Document {
    let mut set = Document::new();
    let mut add_to_set = Document::new();

    for op in update.ops() {
        match op {
            UpdateOp::Set { field, value } => {
                set.insert(field.clone(), value.clone());
            }
            UpdateOp::AddToSet { field, value } => {
                add_to_set.insert(field.clone(), value.clone());
            }
        }
    }

    let mut document = Document::new();
    if !set.is_empty() {
        document.insert("$set", set);
    }
    if !add_to_set.is_empty() {
        document.insert("$addToSet", add_to_set);
    }
    document
}

#[async_trait]
impl CatalogBackend for MongoDbStore {
    async fn insert_document(&self, document: Document, collection: &str) -> CatalogResult<()> {
        self.get_collection(collection)
            .insert_one(document)
            .await
            .map_err(CatalogError::store)?;

        Ok(())
    }

    async fn find_documents(
        &self,
        filter: Option<Expr>,
        collection: &str,
    ) -> CatalogResult<Vec<Document>> {
        let filter = match &filter {
            Some(expr) => filter_to_document(expr)?,
            None => doc! {},
        };

        self.get_collection(collection)
            .find(filter)
            .await
            .map_err(CatalogError::store)?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(CatalogError::store)
    }

    async fn find_document(
        &self,
        filter: Expr,
        collection: &str,
    ) -> CatalogResult<Option<Document>> {
        self.get_collection(collection)
            .find_one(filter_to_document(&filter)?)
            .await
            .map_err(CatalogError::store)
    }

    async fn update_document(
        &self,
        filter: Expr,
        update: UpdateOps,
        collection: &str,
    ) -> CatalogResult<u64> {
        let result = self
            .get_collection(collection)
            .update_one(filter_to_document(&filter)?, update_to_document(&update))
            .await
            .map_err(CatalogError::store)?;

        Ok(result.matched_count)
    }

    async fn delete_documents(&self, filter: Expr, collection: &str) -> CatalogResult<u64> {
        let result = self
            .get_collection(collection)
            .delete_many(filter_to_document(&filter)?)
            .await
            .map_err(CatalogError::store)?;

        Ok(result.deleted_count)
    }

    async fn shutdown(self) -> CatalogResult<()> {
        self.client.shutdown().await;

        Ok(())
    }
}

/// Builder that parses the DSN, constructs the client, and verifies the
/// session with a ping before handing the backend out.
pub struct MongoDbStoreBuilder {
    config: MongoConfig,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            config: MongoConfig {
                uri: dsn.to_string(),
                database: database.to_string(),
            },
        }
    }

    pub fn from_config(config: MongoConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl CatalogBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    async fn build(self) -> CatalogResult<Self::Backend> {
        let options = ClientOptions::parse(&self.config.uri)
            .await
            .map_err(CatalogError::store)?;
        let client = Client::with_options(options).map_err(CatalogError::store)?;

        let store = MongoDbStore::new(client, self.config.database);
        store
            .client
            .database(&store.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(CatalogError::store)?;
        tracing::debug!(database = %store.database, "connected to MongoDB");

        Ok(store)
    }
}
