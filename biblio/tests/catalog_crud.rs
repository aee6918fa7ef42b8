use biblio::mapper::{collections, fields};
use biblio::memory::InMemoryStore;
use biblio::prelude::*;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ann_lee() -> Author {
    Author::new(1, "Ann", "Lee", date(1970, 1, 1))
}

fn gone() -> Book {
    Book::new(100, "1234567890", "Gone", date(2020, 6, 1), 4, Genre::Fiction).unwrap()
}

/// A catalog plus a handle on its shared backing store, for tests that need
/// to manufacture store states the repository itself would not produce.
fn fresh_catalog() -> (Catalog<InMemoryStore>, InMemoryStore) {
    let store = InMemoryStore::new();
    (Catalog::new(store.clone()), store)
}

#[tokio::test]
async fn book_round_trips_with_its_author_id_set() {
    let (catalog, _) = fresh_catalog();

    let author = ann_lee();
    catalog.add_author(&author).await.unwrap();

    let mut book = gone();
    book.add_author(author.clone());
    catalog.add_book(&book).await.unwrap();

    let hits = catalog.search_books_by_isbn("1234567890").await.unwrap();
    assert_eq!(hits.len(), 1);
    let loaded = &hits[0];
    assert_eq!(loaded, &book);
    assert_eq!(loaded.author_ids(), book.author_ids());
    assert_eq!(loaded.rating(), 4);
    assert_eq!(loaded.genre(), Genre::Fiction);
    assert_eq!(loaded.published(), date(2020, 6, 1));
}

#[tokio::test]
async fn linking_twice_equals_linking_once() {
    let (catalog, _) = fresh_catalog();

    let author = ann_lee();
    let book = gone();
    catalog.add_author(&author).await.unwrap();
    catalog.add_book(&book).await.unwrap();

    catalog.add_author_to_book(&author, &book).await.unwrap();
    catalog.add_author_to_book(&author, &book).await.unwrap();

    let authors = catalog.get_authors_for_book(book.id()).await.unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].id(), author.id());
}

#[tokio::test]
async fn linking_requires_both_documents_to_exist() {
    let (catalog, _) = fresh_catalog();
    let author = ann_lee();
    let book = gone();

    catalog.add_author(&author).await.unwrap();
    let err = catalog.add_author_to_book(&author, &book).await.unwrap_err();
    assert!(matches!(err, CatalogError::BookNotFound(100)));

    let (catalog, _) = fresh_catalog();
    catalog.add_book(&book).await.unwrap();
    let err = catalog.add_author_to_book(&author, &book).await.unwrap_err();
    assert!(matches!(err, CatalogError::AuthorNotFound(1)));
}

#[tokio::test]
async fn one_sided_link_still_resolves_at_read_time() {
    let (catalog, store) = fresh_catalog();

    let author = ann_lee();
    let book = gone();
    catalog.add_author(&author).await.unwrap();
    catalog.add_book(&book).await.unwrap();

    // Manufacture the divergent state a partially failed link leaves behind:
    // the book side landed, the author side never did.
    store
        .update_document(
            Filter::eq(fields::BOOK_ID, book.id()),
            UpdateOps::new().add_to_set(fields::AUTHOR_IDS, author.id()),
            collections::BOOKS,
        )
        .await
        .unwrap();

    let authors = catalog.get_authors_for_book(book.id()).await.unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].id(), author.id());

    // The author-name search also resolves through the book-side array.
    let hits = catalog.search_books_by_author("Lee").await.unwrap();
    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn opposite_divergence_shrinks_the_result_without_error() {
    let (catalog, store) = fresh_catalog();

    let author = ann_lee();
    let book = gone();
    catalog.add_author(&author).await.unwrap();
    catalog.add_book(&book).await.unwrap();

    // Only the author side carries the link; the book's array never got it.
    store
        .update_document(
            Filter::eq(fields::AUTHOR_ID, author.id()),
            UpdateOps::new().add_to_set(fields::BOOK_IDS, book.id()),
            collections::AUTHORS,
        )
        .await
        .unwrap();

    let authors = catalog.get_authors_for_book(book.id()).await.unwrap();
    assert!(authors.is_empty());
}

#[tokio::test]
async fn dangling_author_reference_is_skipped() {
    let (catalog, _) = fresh_catalog();

    // The book document references author 1, but no such author document
    // was ever written.
    let mut book = gone();
    book.add_author(ann_lee());
    catalog.add_book(&book).await.unwrap();

    let authors = catalog.get_authors_for_book(book.id()).await.unwrap();
    assert!(authors.is_empty());

    let hits = catalog.search_books_by_isbn("1234567890").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert!(hits[0].authors().is_empty());
}

#[tokio::test]
async fn deleting_a_missing_book_fails_and_modifies_nothing() {
    let (catalog, _) = fresh_catalog();

    let author = ann_lee();
    let book = gone();
    catalog.add_author(&author).await.unwrap();
    catalog.add_book(&book).await.unwrap();

    let err = catalog.delete_book(999).await.unwrap_err();
    assert!(matches!(err, CatalogError::BookNotFound(999)));

    assert_eq!(catalog.get_all_authors().await.unwrap().len(), 1);
    assert_eq!(
        catalog.search_books_by_isbn("1234567890").await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn deleting_a_book_removes_its_document() {
    let (catalog, _) = fresh_catalog();

    let book = gone();
    catalog.add_book(&book).await.unwrap();
    catalog.delete_book(book.id()).await.unwrap();

    assert!(
        catalog
            .search_books_by_isbn("1234567890")
            .await
            .unwrap()
            .is_empty()
    );
    let err = catalog.delete_book(book.id()).await.unwrap_err();
    assert!(matches!(err, CatalogError::BookNotFound(100)));
}

#[tokio::test]
async fn authors_for_a_missing_book_is_not_found() {
    let (catalog, _) = fresh_catalog();
    let err = catalog.get_authors_for_book(42).await.unwrap_err();
    assert!(matches!(err, CatalogError::BookNotFound(42)));
}

#[tokio::test]
async fn get_all_authors_scans_the_collection() {
    let (catalog, _) = fresh_catalog();
    assert!(catalog.get_all_authors().await.unwrap().is_empty());

    catalog.add_author(&ann_lee()).await.unwrap();
    catalog
        .add_author(&Author::new(2, "Bo", "Moss", date(1980, 3, 3)))
        .await
        .unwrap();

    let authors = catalog.get_all_authors().await.unwrap();
    assert_eq!(authors.len(), 2);
}

#[tokio::test]
async fn rating_update_round_trips_and_validates() {
    let (catalog, _) = fresh_catalog();

    let book = gone();
    catalog.add_book(&book).await.unwrap();

    catalog.set_book_rating(book.id(), 2).await.unwrap();
    let hits = catalog.search_books_by_isbn("1234567890").await.unwrap();
    assert_eq!(hits[0].rating(), 2);

    let err = catalog.set_book_rating(book.id(), 6).await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRating(6)));
    let hits = catalog.search_books_by_isbn("1234567890").await.unwrap();
    assert_eq!(hits[0].rating(), 2);

    let err = catalog.set_book_rating(999, 3).await.unwrap_err();
    assert!(matches!(err, CatalogError::BookNotFound(999)));
}

#[tokio::test]
async fn close_releases_the_session() {
    let (catalog, _) = fresh_catalog();
    catalog.close().await.unwrap();
}
