//! The repository facade consumed by the presentation layer.
//!
//! [`Catalog`] owns a connected backend and exposes the catalog's operations
//! in domain terms: entities and primitive search criteria in, entities out,
//! never raw documents. It composes the query translator
//! ([`crate::criteria`]) for reads and the document mapper
//! ([`crate::mapper`]) for writes, and applies the relationship-consistency
//! policy described on [`Catalog::add_author_to_book`].
//!
//! # Connection lifecycle
//!
//! A backend is built already connected by its
//! [`CatalogBackendBuilder`](crate::backend::CatalogBackendBuilder);
//! [`Catalog::new`] takes it by value and [`Catalog::close`] consumes the
//! repository to release the session. Connecting twice or disconnecting
//! without a session is therefore unrepresentable.
//!
//! # Failure propagation
//!
//! No operation catches and hides a failure: validation errors surface before
//! any store access, driver failures arrive wrapped as
//! [`CatalogError::Store`], and nothing is retried in the core.

use crate::{
    backend::CatalogBackend,
    criteria::{SearchCriteria, translate},
    error::{CatalogError, CatalogResult},
    mapper::{self, collections, fields},
    model::{Author, Book, book},
    query::{Expr, Filter, UpdateOps},
};

/// The data-access facade for books, authors, and their relationship.
#[derive(Debug)]
pub struct Catalog<B: CatalogBackend> {
    backend: B,
}

impl<B: CatalogBackend> Catalog<B> {
    /// Wraps a connected backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Releases the backend session. Consumes the repository.
    pub async fn close(self) -> CatalogResult<()> {
        self.backend.shutdown().await
    }

    /// Inserts a new book document: scalar fields plus the book's *current*
    /// author-identifier list.
    ///
    /// The identifier is not checked for uniqueness before insert; duplicate
    /// detection is the store's concern.
    pub async fn add_book(&self, book: &Book) -> CatalogResult<()> {
        self.backend
            .insert_document(mapper::book_to_document(book)?, collections::BOOKS)
            .await
    }

    /// Inserts a new author document with its current (at creation: empty)
    /// book-identifier list.
    pub async fn add_author(&self, author: &Author) -> CatalogResult<()> {
        self.backend
            .insert_document(mapper::author_to_document(author)?, collections::AUTHORS)
            .await
    }

    /// Links an author and a book on both sides of the relationship.
    ///
    /// Fails with a not-found error if either identifier is absent from the
    /// store at call time. The two relationship writes are independent and
    /// non-atomic: if the book side lands and the author side fails, the link
    /// is asymmetric until a retry completes it. Both writes are
    /// set-insertions, so the operation is idempotent and reads tolerate the
    /// divergence by skipping dangling references.
    pub async fn add_author_to_book(&self, author: &Author, book: &Book) -> CatalogResult<()> {
        if self
            .backend
            .find_document(Filter::eq(fields::BOOK_ID, book.id()), collections::BOOKS)
            .await?
            .is_none()
        {
            return Err(CatalogError::BookNotFound(book.id()));
        }
        if self
            .backend
            .find_document(
                Filter::eq(fields::AUTHOR_ID, author.id()),
                collections::AUTHORS,
            )
            .await?
            .is_none()
        {
            return Err(CatalogError::AuthorNotFound(author.id()));
        }

        tracing::debug!(author_id = author.id(), book_id = book.id(), "linking");

        let matched = self
            .backend
            .update_document(
                Filter::eq(fields::BOOK_ID, book.id()),
                UpdateOps::new().add_to_set(fields::AUTHOR_IDS, author.id()),
                collections::BOOKS,
            )
            .await?;
        if matched == 0 {
            return Err(CatalogError::BookNotFound(book.id()));
        }

        let matched = self
            .backend
            .update_document(
                Filter::eq(fields::AUTHOR_ID, author.id()),
                UpdateOps::new().add_to_set(fields::BOOK_IDS, book.id()),
                collections::AUTHORS,
            )
            .await?;
        if matched == 0 {
            return Err(CatalogError::AuthorNotFound(author.id()));
        }

        Ok(())
    }

    /// Removes the book document with the given identifier.
    ///
    /// Zero documents matched is a not-found error, not a silent no-op:
    /// a wrong identifier surfaces as an explicit failure. Relationship
    /// entries on author documents are left behind and absorbed at read time.
    pub async fn delete_book(&self, book_id: i32) -> CatalogResult<()> {
        let deleted = self
            .backend
            .delete_documents(Filter::eq(fields::BOOK_ID, book_id), collections::BOOKS)
            .await?;

        if deleted == 0 {
            return Err(CatalogError::BookNotFound(book_id));
        }

        Ok(())
    }

    /// Updates the persisted rating of a book.
    ///
    /// Out-of-range values are rejected before any store access; an unmatched
    /// identifier is a not-found error.
    pub async fn set_book_rating(&self, book_id: i32, rating: i32) -> CatalogResult<()> {
        book::validate_rating(rating)?;

        let matched = self
            .backend
            .update_document(
                Filter::eq(fields::BOOK_ID, book_id),
                UpdateOps::new().set(fields::RATING, rating),
                collections::BOOKS,
            )
            .await?;

        if matched == 0 {
            return Err(CatalogError::BookNotFound(book_id));
        }

        Ok(())
    }

    /// Returns the authors of the given book, in author order.
    ///
    /// Fails with a not-found error if the book itself is absent; author ids
    /// with no matching document are skipped, so a dangling reference shrinks
    /// the result instead of failing it.
    pub async fn get_authors_for_book(&self, book_id: i32) -> CatalogResult<Vec<Author>> {
        let document = self
            .backend
            .find_document(Filter::eq(fields::BOOK_ID, book_id), collections::BOOKS)
            .await?
            .ok_or(CatalogError::BookNotFound(book_id))?;

        let book = mapper::document_to_book(&self.backend, document).await?;
        Ok(book.authors().iter().cloned().collect())
    }

    /// Returns every author in the catalog. Full scan, no pagination.
    pub async fn get_all_authors(&self) -> CatalogResult<Vec<Author>> {
        self.backend
            .find_documents(None, collections::AUTHORS)
            .await?
            .into_iter()
            .map(mapper::document_to_author)
            .collect()
    }

    /// Searches books by the given criteria and returns fully rehydrated
    /// entities, never documents with unresolved author references.
    pub async fn search_books(&self, criteria: &SearchCriteria) -> CatalogResult<Vec<Book>> {
        let filter = match criteria {
            SearchCriteria::Title(title) => translate::title(title),
            SearchCriteria::Isbn(isbn) => translate::isbn(isbn),
            SearchCriteria::Genre(genre) => translate::genre(genre)?,
            SearchCriteria::Rating(rating) => translate::rating(*rating)?,
            SearchCriteria::AuthorName(name) => {
                // Two-stage: resolve matching author ids first, then select
                // books whose relationship array intersects that set.
                let author_ids = self.matching_author_ids(name).await?;
                if author_ids.is_empty() {
                    return Ok(vec![]);
                }
                translate::books_with_any_author(&author_ids)
            }
        };

        self.find_books(filter).await
    }

    pub async fn search_books_by_title(&self, title: &str) -> CatalogResult<Vec<Book>> {
        self.search_books(&SearchCriteria::Title(title.to_string()))
            .await
    }

    pub async fn search_books_by_author(&self, name: &str) -> CatalogResult<Vec<Book>> {
        self.search_books(&SearchCriteria::AuthorName(name.to_string()))
            .await
    }

    pub async fn search_books_by_genre(&self, genre: &str) -> CatalogResult<Vec<Book>> {
        self.search_books(&SearchCriteria::Genre(genre.to_string()))
            .await
    }

    pub async fn search_books_by_rating(&self, rating: i32) -> CatalogResult<Vec<Book>> {
        self.search_books(&SearchCriteria::Rating(rating)).await
    }

    pub async fn search_books_by_isbn(&self, isbn: &str) -> CatalogResult<Vec<Book>> {
        self.search_books(&SearchCriteria::Isbn(isbn.to_string()))
            .await
    }

    async fn matching_author_ids(&self, name: &str) -> CatalogResult<Vec<i32>> {
        Ok(self
            .backend
            .find_documents(Some(translate::author_name(name)), collections::AUTHORS)
            .await?
            .into_iter()
            .map(mapper::document_to_author)
            .collect::<CatalogResult<Vec<Author>>>()?
            .iter()
            .map(Author::id)
            .collect())
    }

    async fn find_books(&self, filter: Expr) -> CatalogResult<Vec<Book>> {
        let documents = self
            .backend
            .find_documents(Some(filter), collections::BOOKS)
            .await?;

        let mut books = Vec::with_capacity(documents.len());
        for document in documents {
            books.push(mapper::document_to_book(&self.backend, document).await?);
        }

        Ok(books)
    }
}
