//! Core of the biblio catalog: a persistence/query layer mapping books,
//! authors, and their many-to-many relationship onto a schema-less document
//! store.
//!
//! The store persists each side of the relationship as an independent
//! document with an embedded array of foreign identifiers: no join table, no
//! foreign keys, no multi-document transaction. The relational invariants are
//! therefore enforced here: relationship arrays are treated as idempotent
//! sets, link writes may leave transient asymmetry, and reads repair it
//! lazily by skipping dangling references.
//!
//! - **Domain model** ([`model`]) - books, authors, genres; no storage
//!   knowledge
//! - **Query translation** ([`criteria`]) - search criteria to store filter
//!   predicates
//! - **Document mapping** ([`mapper`]) - entity/document conversion and
//!   relationship rehydration
//! - **Repository facade** ([`repo`]) - the operations the presentation
//!   layer consumes
//! - **Backend abstraction** ([`backend`]) - the document-store driver
//!   boundary
//! - **Error handling** ([`error`]) - the uniform error taxonomy
//!
//! # Example
//!
//! ```ignore
//! use biblio_core::{model::{Author, Book, Genre}, repo::Catalog};
//!
//! let catalog = Catalog::new(backend);
//! let author = Author::new(1, "Ann", "Lee", birth_date);
//! catalog.add_author(&author).await?;
//!
//! let mut book = Book::new(100, "1234567890", "Gone", published, 4, Genre::Fiction)?;
//! catalog.add_book(&book).await?;
//! catalog.add_author_to_book(&author, &book).await?;
//!
//! let hits = catalog.search_books_by_author("Lee").await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as biblio_core;

pub mod backend;
pub mod criteria;
pub mod error;
pub mod mapper;
pub mod model;
pub mod query;
pub mod repo;
