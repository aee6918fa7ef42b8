//! Filter expression evaluation for in-memory document matching.
//!
//! Implements the catalog's [`QueryVisitor`] over a single BSON document,
//! mirroring the semantics the MongoDB backend gets from its query engine:
//! equality, case-insensitive regex matching, and array membership.

use bson::{Bson, Document};
use regex::RegexBuilder;

use biblio_core::{
    error::{CatalogError, CatalogResult},
    query::{Expr, FieldOp, QueryVisitor},
};

/// Type-erased, comparable representation of BSON values.
///
/// Normalizes all numeric types to f64 so that, e.g., an `Int64` written by
/// one path compares equal to the `Int32` another path queries with.
#[derive(Debug, PartialEq)]
pub(crate) enum Comparable<'a> {
    Null,
    Bool(bool),
    Number(f64),
    String(&'a str),
    Array(Vec<Comparable<'a>>),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Number(*value as f64),
            Bson::Int64(value) => Comparable::Number(*value as f64),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::String(value) => Comparable::String(value),
            Bson::Array(arr) => Comparable::Array(arr.iter().map(Comparable::from).collect()),
            _ => Comparable::Null, // other types are not comparable
        }
    }
}

/// Evaluates a filter expression against one document.
pub(crate) struct DocumentEvaluator<'a> {
    document: &'a Document,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> CatalogResult<bool> {
        self.visit_expr(expr)
    }

    /// Whether the document satisfies the expression.
    pub fn matches(document: &Document, expr: &Expr) -> CatalogResult<bool> {
        DocumentEvaluator::new(document).evaluate(expr)
    }
}

impl<'a> QueryVisitor for DocumentEvaluator<'a> {
    type Output = bool;
    type Error = CatalogError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if !self.visit_expr(expr)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if self.visit_expr(expr)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn visit_field(
        &mut self,
        field: &str,
        op: &FieldOp,
        value: &Bson,
    ) -> Result<Self::Output, Self::Error> {
        let Some(field_value) = self.document.get(field) else {
            return Ok(false);
        };

        match op {
            FieldOp::Eq => Ok(Comparable::from(field_value) == Comparable::from(value)),
            FieldOp::Matches => match (field_value, value) {
                (Bson::String(haystack), Bson::String(pattern)) => Ok(RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(CatalogError::store)?
                    .is_match(haystack)),
                _ => Ok(false),
            },
            FieldOp::AnyOf => match (Comparable::from(field_value), Comparable::from(value)) {
                (Comparable::Array(array), Comparable::Array(values)) => {
                    for val in values {
                        if array.iter().any(|item| item == &val) {
                            return Ok(true);
                        }
                    }
                    Ok(false)
                }
                (Comparable::Array(array), single_value) => {
                    Ok(array.iter().any(|item| item == &single_value))
                }
                (single_value, Comparable::Array(values)) => {
                    Ok(values.iter().any(|val| val == &single_value))
                }
                _ => Ok(false),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biblio_core::query::Filter;
    use bson::doc;

    #[test]
    fn eq_compares_across_numeric_widths() {
        let document = doc! { "rating": 4_i64 };
        assert!(DocumentEvaluator::matches(&document, &Filter::eq("rating", 4_i32)).unwrap());
        assert!(!DocumentEvaluator::matches(&document, &Filter::eq("rating", 5_i32)).unwrap());
    }

    #[test]
    fn matches_is_a_case_insensitive_substring() {
        let document = doc! { "title": "The Long Goodbye" };
        for pattern in ["long", "LONG", "Goodbye"] {
            assert!(
                DocumentEvaluator::matches(&document, &Filter::matches("title", pattern)).unwrap()
            );
        }
        assert!(!DocumentEvaluator::matches(&document, &Filter::matches("title", "hello")).unwrap());
    }

    #[test]
    fn any_of_intersects_arrays() {
        let document = doc! { "author_ids": [1, 2, 3] };
        assert!(
            DocumentEvaluator::matches(&document, &Filter::any_of("author_ids", vec![3, 9]))
                .unwrap()
        );
        assert!(
            !DocumentEvaluator::matches(&document, &Filter::any_of("author_ids", vec![8, 9]))
                .unwrap()
        );
    }

    #[test]
    fn missing_fields_never_match() {
        let document = doc! { "title": "Gone" };
        assert!(!DocumentEvaluator::matches(&document, &Filter::eq("isbn", "1234567890")).unwrap());
    }

    #[test]
    fn and_or_combine() {
        let document = doc! { "title": "Gone", "rating": 4 };
        let both = Filter::and(vec![Filter::eq("rating", 4), Filter::matches("title", "gone")]);
        assert!(DocumentEvaluator::matches(&document, &both).unwrap());

        let either = Filter::or(vec![Filter::eq("rating", 1), Filter::matches("title", "gone")]);
        assert!(DocumentEvaluator::matches(&document, &either).unwrap());

        let neither = Filter::or(vec![Filter::eq("rating", 1), Filter::matches("title", "x")]);
        assert!(!DocumentEvaluator::matches(&document, &neither).unwrap());
    }
}
