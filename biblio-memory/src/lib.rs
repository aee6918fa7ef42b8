//! In-memory catalog backend for biblio.
//!
//! This crate provides a thread-safe, in-memory implementation of the
//! [`CatalogBackend`](biblio_core::backend::CatalogBackend) trait. It uses
//! async-aware read-write locks for concurrent access and is what the test
//! suite and development setups run against; nothing persists past the
//! process.
//!
//! # Quick Start
//!
//! ```ignore
//! use biblio_core::{backend::CatalogBackendBuilder, repo::Catalog};
//! use biblio_memory::InMemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = InMemoryStore::builder().build().await?;
//!     let catalog = Catalog::new(backend);
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as biblio_memory;

pub mod evaluator;
pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
