//! The domain model: books, authors, and genres.
//!
//! Entities carry no storage knowledge. Identity is a caller-assigned
//! integer; ordering and equality follow the catalog's display rules (books
//! by title then id, authors by last name then id). The relationship caches
//! on both entities are rebuilt from the store on every fetch.

pub mod author;
pub mod book;
pub mod genre;

pub use author::Author;
pub use book::Book;
pub use genre::Genre;
