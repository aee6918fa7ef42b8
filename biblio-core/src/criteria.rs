//! Search criteria and their translation into store filter predicates.
//!
//! A search is one user-entered value routed by a user-selected mode; the
//! closed [`SearchCriteria`] variant set is that mode. Translation validates
//! first (an out-of-range rating or unknown genre fails before any store
//! access) and then builds an [`Expr`] over the books collection. Author-name
//! search is two-stage: an author-side predicate resolves matching author
//! ids, and a second predicate selects the books whose relationship array
//! intersects that id set.

use crate::{
    error::CatalogResult,
    mapper::fields,
    model::{Genre, book},
    query::{Expr, Filter},
};

/// A search request against the book catalog.
#[derive(Debug, Clone)]
pub enum SearchCriteria {
    /// Case-insensitive substring match against the full title.
    Title(String),
    /// Case-insensitive substring match against author first OR last name.
    AuthorName(String),
    /// Exact match after normalizing to the canonical genre token.
    Genre(String),
    /// Exact match; values outside 1..=5 fail validation before querying.
    Rating(i32),
    /// Exact match.
    Isbn(String),
}

pub(crate) mod translate {
    use super::*;

    /// A case-insensitive substring pattern for the literal input.
    fn substring_pattern(input: &str) -> String {
        regex::escape(input)
    }

    pub(crate) fn title(title: &str) -> Expr {
        Filter::matches(fields::TITLE, substring_pattern(title))
    }

    pub(crate) fn isbn(isbn: &str) -> Expr {
        Filter::eq(fields::ISBN, isbn)
    }

    pub(crate) fn genre(input: &str) -> CatalogResult<Expr> {
        let genre = Genre::parse(input)?;
        Ok(Filter::eq(fields::GENRE, genre.as_token()))
    }

    pub(crate) fn rating(rating: i32) -> CatalogResult<Expr> {
        book::validate_rating(rating)?;
        Ok(Filter::eq(fields::RATING, rating))
    }

    /// Stage one of author search: authors whose first OR last name contains
    /// the input.
    pub(crate) fn author_name(name: &str) -> Expr {
        let pattern = substring_pattern(name);
        Filter::or(vec![
            Filter::matches(fields::FIRST_NAME, pattern.clone()),
            Filter::matches(fields::LAST_NAME, pattern),
        ])
    }

    /// Stage two of author search: books whose relationship array intersects
    /// the resolved author ids.
    pub(crate) fn books_with_any_author(author_ids: &[i32]) -> Expr {
        Filter::any_of(fields::AUTHOR_IDS, author_ids.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::translate;
    use crate::{
        error::CatalogError,
        query::{Expr, FieldOp},
    };
    use bson::Bson;

    #[test]
    fn title_builds_an_escaped_substring_match() {
        let expr = translate::title("C++ in a day");
        match expr {
            Expr::Field { field, op, value } => {
                assert_eq!(field, "title");
                assert!(matches!(op, FieldOp::Matches));
                // Regex metacharacters in the input must not act as operators.
                assert_eq!(value, Bson::String(r"C\+\+ in a day".to_string()));
            }
            other => panic!("unexpected expr: {other:?}"),
        }
    }

    #[test]
    fn author_name_matches_either_name_half() {
        match translate::author_name("lee") {
            Expr::Or(parts) => {
                assert_eq!(parts.len(), 2);
            }
            other => panic!("unexpected expr: {other:?}"),
        }
    }

    #[test]
    fn rating_validates_before_building_a_filter() {
        assert!(translate::rating(3).is_ok());
        for rating in [0, 6] {
            let err = translate::rating(rating).unwrap_err();
            assert!(matches!(err, CatalogError::InvalidRating(r) if r == rating));
        }
    }

    #[test]
    fn genre_normalizes_to_the_canonical_token() {
        for input in ["mystery", "MYSTERY"] {
            match translate::genre(input).unwrap() {
                Expr::Field { value, .. } => {
                    assert_eq!(value, Bson::String("MYSTERY".to_string()));
                }
                other => panic!("unexpected expr: {other:?}"),
            }
        }
        assert!(matches!(
            translate::genre("western").unwrap_err(),
            CatalogError::UnknownGenre(_)
        ));
    }
}
