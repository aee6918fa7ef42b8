//! The author entity.

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::model::book::Book;

/// An author in the catalog.
///
/// Identity is the caller-assigned integer id. The attached book set is a
/// convenience cache for display, not the source of truth: it is rebuilt from
/// the store on every fetch and never assumed durable across calls.
///
/// Authors order by last name, tie-broken by id, and two authors are equal
/// exactly when that comparison is `Equal`.
#[derive(Debug, Clone)]
pub struct Author {
    id: i32,
    first_name: String,
    last_name: String,
    birth_date: NaiveDate,
    books: BTreeSet<Book>,
}

impl Author {
    /// Creates an author with an empty book set.
    pub fn new(
        id: i32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: NaiveDate,
    ) -> Author {
        Author {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date,
            books: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// The cached books written by this author.
    pub fn books(&self) -> &BTreeSet<Book> {
        &self.books
    }

    /// The identifiers of the cached books, in book order.
    pub fn book_ids(&self) -> Vec<i32> {
        self.books.iter().map(Book::id).collect()
    }

    /// Attaches a book to the cache. Set semantics: re-adding an equal book
    /// leaves the cache unchanged.
    pub fn add_book(&mut self, book: Book) {
        self.books.insert(book);
    }

    /// Detaches a book from the cache.
    pub fn remove_book(&mut self, book: &Book) {
        self.books.remove(book);
    }
}

impl Ord for Author {
    fn cmp(&self, other: &Self) -> Ordering {
        self.last_name
            .cmp(&other.last_name)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Author {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Author {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn orders_by_last_name_then_id() {
        let lee = Author::new(2, "Ann", "Lee", date(1970, 1, 1));
        let moss = Author::new(1, "Bo", "Moss", date(1970, 1, 1));
        assert!(lee < moss);

        let other_lee = Author::new(1, "Zed", "Lee", date(1980, 5, 5));
        assert!(other_lee < lee);
    }

    #[test]
    fn equality_follows_ordering() {
        let a = Author::new(1, "Ann", "Lee", date(1970, 1, 1));
        let b = Author::new(1, "Completely", "Lee", date(1999, 9, 9));
        // Same last name and id: equal regardless of the other fields.
        assert_eq!(a, b);
    }

    #[test]
    fn book_cache_has_set_semantics() {
        use crate::model::{Book, Genre};

        let mut author = Author::new(1, "Ann", "Lee", date(1970, 1, 1));
        let book = Book::new(100, "1234567890", "Gone", date(2020, 1, 1), 4, Genre::Fiction)
            .unwrap();
        author.add_book(book.clone());
        author.add_book(book.clone());
        assert_eq!(author.books().len(), 1);

        author.remove_book(&book);
        assert!(author.books().is_empty());
    }
}
