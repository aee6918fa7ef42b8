//! Main biblio crate: a bibliographic catalog persistence layer over
//! schema-less document stores.
//!
//! This crate is the primary entry point. It re-exports the core domain
//! model, repository, and backend abstraction, and provides access to the
//! storage backends.
//!
//! Books and authors live in a many-to-many relationship persisted as
//! embedded id arrays on two independent collections, with no join table and
//! no multi-document transaction. The repository enforces the relational
//! invariants the store cannot: relationship updates are idempotent
//! set-insertions, a partially failed link leaves a transient asymmetry, and
//! reads absorb it by skipping dangling references.
//!
//! # Quick Start
//!
//! ```ignore
//! use biblio::{memory::InMemoryStore, prelude::*};
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = InMemoryStore::builder().build().await?;
//!     let catalog = Catalog::new(backend);
//!
//!     let author = Author::new(1, "Ann", "Lee", NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
//!     catalog.add_author(&author).await?;
//!
//!     let book = Book::new(
//!         100,
//!         "1234567890",
//!         "Gone",
//!         NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
//!         4,
//!         Genre::Fiction,
//!     )?;
//!     catalog.add_book(&book).await?;
//!     catalog.add_author_to_book(&author, &book).await?;
//!
//!     let hits = catalog.search_books_by_author("Lee").await?;
//!     println!("found {} book(s)", hits.len());
//!
//!     catalog.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - in-memory storage for development and testing
//! - [`mongodb`] - persistent MongoDB backend (requires the `mongodb`
//!   feature)

pub mod prelude;

pub use biblio_core::{backend, criteria, error, mapper, model, query, repo};

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend implementations.
pub mod memory {
    pub use biblio_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use biblio_mongodb::{MongoConfig, MongoDbStore, MongoDbStoreBuilder};
}
