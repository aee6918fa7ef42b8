//! Bidirectional conversion between domain entities and store documents.
//!
//! This module is the single place aware of the physical schema: collection
//! names, field names, and the flat record shapes persisted for books and
//! authors. The many-to-many relationship is represented only by the embedded
//! id arrays on both sides; there is no join table.
//!
//! The write direction flattens an entity to its record. The read direction
//! validates scalars on the way in (a corrupt rating or unrecognized genre
//! token in storage fails the read rather than producing an inconsistent
//! entity) and, for books, resolves the embedded author ids through one point
//! lookup each. An id with no matching document is skipped: a dangling
//! reference left behind by a partially failed link write degrades to a
//! smaller result set instead of an error.

use bson::{Bson, Document, de::deserialize_from_bson, ser::serialize_to_bson};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    backend::CatalogBackend,
    error::{CatalogError, CatalogResult},
    model::{Author, Book, Genre},
    query::Filter,
};

/// Collection names.
pub mod collections {
    pub const BOOKS: &str = "books";
    pub const AUTHORS: &str = "authors";
}

/// Document field names.
pub mod fields {
    pub const BOOK_ID: &str = "book_id";
    pub const ISBN: &str = "isbn";
    pub const TITLE: &str = "title";
    pub const PUBLISHED: &str = "published";
    pub const RATING: &str = "rating";
    pub const GENRE: &str = "genre";
    pub const AUTHOR_IDS: &str = "author_ids";

    pub const AUTHOR_ID: &str = "author_id";
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";
    pub const BIRTH_DATE: &str = "birth_date";
    pub const BOOK_IDS: &str = "book_ids";
}

/// The persisted shape of a book document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRecord {
    pub book_id: i32,
    pub isbn: String,
    pub title: String,
    pub published: NaiveDate,
    pub rating: i32,
    pub genre: String,
    pub author_ids: Vec<i32>,
}

/// The persisted shape of an author document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub author_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub book_ids: Vec<i32>,
}

fn encode<T: Serialize>(record: &T) -> CatalogResult<Document> {
    serialize_to_bson(record)?
        .as_document()
        .cloned()
        .ok_or_else(|| CatalogError::Serialization("expected a document".into()))
}

pub(crate) fn decode<T: DeserializeOwned>(document: Document) -> CatalogResult<T> {
    Ok(deserialize_from_bson(Bson::Document(document))?)
}

/// Flattens a book to its document: scalar fields plus the *current*
/// author-identifier list.
pub fn book_to_document(book: &Book) -> CatalogResult<Document> {
    encode(&BookRecord {
        book_id: book.id(),
        isbn: book.isbn().to_string(),
        title: book.title().to_string(),
        published: book.published(),
        rating: book.rating(),
        genre: book.genre().as_token().to_string(),
        author_ids: book.author_ids(),
    })
}

/// Flattens an author to its document, including the current (at creation:
/// empty) book-identifier list.
pub fn author_to_document(author: &Author) -> CatalogResult<Document> {
    encode(&AuthorRecord {
        author_id: author.id(),
        first_name: author.first_name().to_string(),
        last_name: author.last_name().to_string(),
        birth_date: author.birth_date(),
        book_ids: author.book_ids(),
    })
}

/// Rebuilds an author from its document. Authors carry no nested entities;
/// the book cache stays empty.
pub fn document_to_author(document: Document) -> CatalogResult<Author> {
    let record: AuthorRecord = decode(document)?;

    Ok(Author::new(
        record.author_id,
        record.first_name,
        record.last_name,
        record.birth_date,
    ))
}

/// Rebuilds a book from its document, validating scalars and resolving the
/// embedded author ids through one point lookup each.
///
/// Ids with no matching author document are skipped; see the module docs.
pub async fn document_to_book<B: CatalogBackend>(
    backend: &B,
    document: Document,
) -> CatalogResult<Book> {
    let record: BookRecord = decode(document)?;

    let genre = Genre::parse(&record.genre)?;
    let mut book = Book::new(
        record.book_id,
        record.isbn,
        record.title,
        record.published,
        record.rating,
        genre,
    )?;

    for author_id in record.author_ids {
        match backend
            .find_document(Filter::eq(fields::AUTHOR_ID, author_id), collections::AUTHORS)
            .await?
        {
            Some(author_doc) => book.add_author(document_to_author(author_doc)?),
            None => {
                tracing::debug!(
                    author_id,
                    book_id = book.id(),
                    "skipping dangling author reference"
                );
            }
        }
    }

    Ok(book)
}
