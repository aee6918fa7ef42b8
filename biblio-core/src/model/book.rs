//! The book entity and its construction-time validation.

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::{
    error::{CatalogError, CatalogResult},
    model::{author::Author, genre::Genre},
};

/// A book in the catalog.
///
/// Identity is the caller-assigned integer id. The ISBN and rating are
/// validated at construction; a malformed value fails with a validation
/// error before the book ever exists. The attached author set is a
/// convenience cache rebuilt from the store on every fetch.
///
/// Books order by title, tie-broken by id; equality follows ordering.
#[derive(Debug, Clone)]
pub struct Book {
    id: i32,
    isbn: String,
    title: String,
    published: NaiveDate,
    rating: i32,
    genre: Genre,
    authors: BTreeSet<Author>,
}

/// Checks the inclusive 1..=5 rating range shared by construction, the
/// rating update, and rating searches.
pub(crate) fn validate_rating(rating: i32) -> CatalogResult<()> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(CatalogError::InvalidRating(rating))
    }
}

fn validate_isbn(isbn: &str) -> CatalogResult<()> {
    let digits = isbn.len() == 10 || isbn.len() == 13;
    if digits && isbn.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(CatalogError::InvalidIsbn(isbn.to_string()))
    }
}

impl Book {
    /// Creates a book with an empty author set.
    ///
    /// Fails with [`CatalogError::InvalidIsbn`] unless the ISBN is exactly 10
    /// or 13 ASCII digits, and with [`CatalogError::InvalidRating`] unless
    /// the rating is between 1 and 5.
    pub fn new(
        id: i32,
        isbn: impl Into<String>,
        title: impl Into<String>,
        published: NaiveDate,
        rating: i32,
        genre: Genre,
    ) -> CatalogResult<Book> {
        let isbn = isbn.into();
        validate_isbn(&isbn)?;
        validate_rating(rating)?;

        Ok(Book {
            id,
            isbn,
            title: title.into(),
            published,
            rating,
            genre,
            authors: BTreeSet::new(),
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn published(&self) -> NaiveDate {
        self.published
    }

    pub fn rating(&self) -> i32 {
        self.rating
    }

    /// Updates the rating, rejecting out-of-range values.
    pub fn set_rating(&mut self, rating: i32) -> CatalogResult<()> {
        validate_rating(rating)?;
        self.rating = rating;
        Ok(())
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    /// The cached authors of this book.
    pub fn authors(&self) -> &BTreeSet<Author> {
        &self.authors
    }

    /// The identifiers of the cached authors, in author order.
    pub fn author_ids(&self) -> Vec<i32> {
        self.authors.iter().map(Author::id).collect()
    }

    /// Attaches an author to the cache. Set semantics: re-adding an equal
    /// author leaves the cache unchanged.
    pub fn add_author(&mut self, author: Author) {
        self.authors.insert(author);
    }
}

impl Ord for Book {
    fn cmp(&self, other: &Self) -> Ordering {
        self.title
            .cmp(&other.title)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Book {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Book {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn book(isbn: &str, rating: i32) -> CatalogResult<Book> {
        Book::new(1, isbn, "Title", date(2020, 1, 1), rating, Genre::Fiction)
    }

    #[test]
    fn accepts_ten_and_thirteen_digit_isbns() {
        assert!(book("1234567890", 3).is_ok());
        assert!(book("9781234567890", 3).is_ok());
    }

    #[test]
    fn rejects_malformed_isbns() {
        for isbn in ["123456789", "12345678901", "123456789X", "", "12345 67890"] {
            let err = book(isbn, 3).unwrap_err();
            assert!(matches!(err, CatalogError::InvalidIsbn(_)), "isbn {isbn:?}");
        }
    }

    #[test]
    fn rejects_out_of_range_ratings_on_construction() {
        for rating in [0, 6, -1, 100] {
            let err = book("1234567890", rating).unwrap_err();
            assert!(matches!(err, CatalogError::InvalidRating(r) if r == rating));
        }
        for rating in 1..=5 {
            assert_eq!(book("1234567890", rating).unwrap().rating(), rating);
        }
    }

    #[test]
    fn rejects_out_of_range_ratings_on_update() {
        let mut b = book("1234567890", 3).unwrap();
        assert!(b.set_rating(6).is_err());
        assert_eq!(b.rating(), 3);
        b.set_rating(5).unwrap();
        assert_eq!(b.rating(), 5);
    }

    #[test]
    fn orders_by_title_then_id() {
        let first = book("1234567890", 3).unwrap();
        let zebra = Book::new(2, "1234567890", "Zebra", date(2020, 1, 1), 3, Genre::Fiction)
            .unwrap();
        assert!(first < zebra);

        let same_title = Book::new(2, "9999999999", "Title", date(1999, 1, 1), 5, Genre::Mystery)
            .unwrap();
        assert!(first < same_title);
    }

    #[test]
    fn equality_follows_ordering() {
        let a = book("1234567890", 3).unwrap();
        let b = Book::new(1, "9999999999", "Title", date(1999, 1, 1), 5, Genre::Romance).unwrap();
        // Same title and id: equal regardless of the other fields.
        assert_eq!(a, b);
    }
}
