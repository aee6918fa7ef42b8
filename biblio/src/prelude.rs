//! Convenient re-exports of commonly used types from biblio.
//!
//! ```ignore
//! use biblio::prelude::*;
//! ```

pub use biblio_core::{
    backend::{CatalogBackend, CatalogBackendBuilder},
    criteria::SearchCriteria,
    error::{CatalogError, CatalogResult},
    model::{Author, Book, Genre},
    query::{Expr, FieldOp, Filter, QueryVisitor, UpdateOp, UpdateOps},
    repo::Catalog,
};
