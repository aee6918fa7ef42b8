//! Filter translation from the catalog's expression tree to MongoDB query
//! syntax.

use bson::{Bson, Document, doc};

use biblio_core::{
    error::CatalogError,
    query::{Expr, FieldOp, QueryVisitor},
};

/// Translates catalog filter expressions into MongoDB query documents.
pub(crate) struct MongoQueryTranslator;

impl QueryVisitor for MongoQueryTranslator {
    type Output = Document;
    type Error = CatalogError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            "$and": exprs
                .iter()
                .map(|expr| self.visit_expr(expr))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            "$or": exprs
                .iter()
                .map(|expr| self.visit_expr(expr))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    fn visit_field(
        &mut self,
        field: &str,
        op: &FieldOp,
        value: &Bson,
    ) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            field: match op {
                FieldOp::Eq => doc! { "$eq": value },
                FieldOp::Matches => match value {
                    Bson::String(pattern) => doc! { "$regex": pattern.clone(), "$options": "i" },
                    _ => return Err(CatalogError::Serialization(
                        "regex filter requires a string pattern".to_string(),
                    )),
                },
                FieldOp::AnyOf => doc! { "$in": value },
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biblio_core::query::Filter;

    fn translate(expr: &Expr) -> Document {
        MongoQueryTranslator.visit_expr(expr).unwrap()
    }

    #[test]
    fn equality_uses_eq() {
        assert_eq!(
            translate(&Filter::eq("book_id", 100)),
            doc! { "book_id": { "$eq": 100 } },
        );
    }

    #[test]
    fn matches_uses_a_case_insensitive_regex() {
        assert_eq!(
            translate(&Filter::matches("title", "gone")),
            doc! { "title": { "$regex": "gone", "$options": "i" } },
        );
    }

    #[test]
    fn any_of_uses_in() {
        assert_eq!(
            translate(&Filter::any_of("author_ids", vec![1, 2])),
            doc! { "author_ids": { "$in": [1, 2] } },
        );
    }

    #[test]
    fn or_nests_translated_branches() {
        let expr = Filter::or(vec![
            Filter::matches("first_name", "ann"),
            Filter::matches("last_name", "ann"),
        ]);
        assert_eq!(
            translate(&expr),
            doc! { "$or": [
                { "first_name": { "$regex": "ann", "$options": "i" } },
                { "last_name": { "$regex": "ann", "$options": "i" } },
            ] },
        );
    }
}
