//! MongoDB backend implementation for biblio.
//!
//! This crate maps the catalog's backend boundary onto the MongoDB driver:
//! filter expressions translate to native query documents, add-to-set updates
//! to `$addToSet`, and matched/deleted counts come straight from the driver's
//! results.
//!
//! To use this backend, include the `mongodb` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! biblio = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Connection
//!
//! The builder parses a connection string, constructs the client, and pings
//! the database before returning, so an unreachable server fails the build
//! instead of the first operation.
//!
//! # Example
//!
//! ```ignore
//! use biblio::{backend::CatalogBackendBuilder, mongodb::MongoDbStore, repo::Catalog};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = MongoDbStore::builder("mongodb://localhost:27017", "library")
//!         .build()
//!         .await?;
//!     let catalog = Catalog::new(backend);
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as biblio_mongodb;

pub mod config;
pub mod query;
pub mod store;

pub use config::MongoConfig;
pub use store::{MongoDbStore, MongoDbStoreBuilder};
