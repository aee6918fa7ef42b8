//! Error types and result types for catalog operations.
//!
//! The taxonomy distinguishes validation failures (raised before any store
//! access), not-found conditions (distinct and user-actionable), and store
//! failures (a uniform wrapper around whatever the driver raised). Use
//! [`CatalogResult<T>`] as the return type for fallible operations.

use bson::error::Error as BsonError;
use thiserror::Error;

/// Represents all possible errors raised by the catalog layer.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// An ISBN that is not exactly 10 or 13 ASCII digits.
    #[error("Invalid ISBN {0:?}: expected exactly 10 or 13 digits")]
    InvalidIsbn(String),
    /// A rating outside the inclusive 1..=5 range.
    #[error("Invalid rating {0}: expected a value between 1 and 5")]
    InvalidRating(i32),
    /// A genre token that does not name any catalog genre.
    #[error("Unrecognized genre: {0:?}")]
    UnknownGenre(String),
    /// No book document carries the given identifier.
    #[error("Book {0} not found")]
    BookNotFound(i32),
    /// No author document carries the given identifier.
    #[error("Author {0} not found")]
    AuthorNotFound(i32),
    /// Serialization/deserialization error when converting between entities
    /// and their document representation.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// A failure raised by the underlying store driver. The original cause
    /// is kept as the error source and never discarded.
    #[error("Store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CatalogError {
    /// Wraps a driver failure into the uniform [`CatalogError::Store`] shape.
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CatalogError::Store(Box::new(err))
    }
}

/// A specialized `Result` type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<BsonError> for CatalogError {
    fn from(err: BsonError) -> Self {
        CatalogError::Serialization(err.to_string())
    }
}
