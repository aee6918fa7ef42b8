//! Filter predicates and update operations understood by catalog backends.
//!
//! Filters form a small expression tree covering exactly what the catalog
//! needs from a document store: equality, case-insensitive regex matching,
//! array membership, and logical and/or. Backends walk the tree through the
//! [`QueryVisitor`] to produce their native representation.
//!
//! # Filter Expression API
//!
//! The [`Filter`] struct provides static constructors for filter expressions:
//!
//! ```ignore
//! use biblio_core::query::Filter;
//!
//! let expr = Filter::or(vec![
//!     Filter::matches("first_name", "ann"),
//!     Filter::matches("last_name", "ann"),
//! ]);
//! ```
//!
//! Updates are expressed as [`UpdateOps`], an ordered list of `$set`-like and
//! add-to-set operations. Add-to-set carries set semantics: applying the same
//! operation twice leaves the target array unchanged.

use bson::Bson;

use crate::error::CatalogError;

/// Field comparison operators for filter expressions.
#[derive(Debug, Clone)]
pub enum FieldOp {
    /// Exact match.
    Eq,
    /// Case-insensitive regular-expression match against a string field.
    /// The value is a regex pattern; an unanchored pattern matches any
    /// substring of the field.
    Matches,
    /// Array field contains any of the given values.
    AnyOf,
}

/// A filter expression for selecting documents.
///
/// Expressions combine through `And` and `Or` to build compound predicates.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Logical AND of multiple expressions (all must match).
    And(Vec<Expr>),
    /// Logical OR of multiple expressions (any must match).
    Or(Vec<Expr>),
    /// Field comparison expression.
    Field {
        /// The field name to compare.
        field: String,
        /// The comparison operator.
        op: FieldOp,
        /// The value to compare against.
        value: Bson,
    },
}

impl Expr {
    /// Creates a field comparison expression.
    pub fn field(field: String, op: FieldOp, value: Bson) -> Self {
        Expr::Field { field, op, value }
    }

    /// Combines this expression with another using logical AND.
    ///
    /// If this expression is already an AND, the other expression is appended
    /// to the list. Otherwise, a new AND expression is created.
    pub fn and(self, other: Expr) -> Self {
        match self {
            Expr::And(mut list) => {
                list.push(other);
                Expr::And(list)
            }
            _ => Expr::And(vec![self, other]),
        }
    }

    /// Combines this expression with another using logical OR.
    pub fn or(self, other: Expr) -> Self {
        match self {
            Expr::Or(mut list) => {
                list.push(other);
                Expr::Or(list)
            }
            _ => Expr::Or(vec![self, other]),
        }
    }
}

/// Helper struct for constructing filter expressions.
pub struct Filter;

impl Filter {
    /// Creates an equality filter expression.
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::field(field.into(), FieldOp::Eq, value.into())
    }

    /// Creates a case-insensitive regex filter expression.
    ///
    /// The pattern is matched anywhere in the string field; escape the input
    /// with [`regex::escape`] when a literal substring match is intended.
    pub fn matches(field: impl Into<String>, pattern: impl Into<String>) -> Expr {
        Expr::field(field.into(), FieldOp::Matches, Bson::String(pattern.into()))
    }

    /// Creates an array membership filter expression.
    ///
    /// Matches documents where the array field contains any of the values.
    pub fn any_of(field: impl Into<String>, values: impl Into<Bson>) -> Expr {
        Expr::field(field.into(), FieldOp::AnyOf, values.into())
    }

    /// Creates a logical AND filter expression.
    pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::And(exprs.into_iter().collect())
    }

    /// Creates a logical OR filter expression.
    pub fn or(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Or(exprs.into_iter().collect())
    }
}

/// Visitor over filter expressions.
///
/// Backends implement this to translate the expression tree into their own
/// filter representation (a BSON query document, an in-memory predicate, ...).
pub trait QueryVisitor {
    type Output;
    type Error: Into<CatalogError>;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error>;
    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error>;
    fn visit_field(
        &mut self,
        field: &str,
        op: &FieldOp,
        value: &Bson,
    ) -> Result<Self::Output, Self::Error>;

    fn visit_expr(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        match expr {
            Expr::And(exprs) => self.visit_and(exprs),
            Expr::Or(exprs) => self.visit_or(exprs),
            Expr::Field { field, op, value } => self.visit_field(field, op, value),
        }
    }
}

/// A single document update operation.
#[derive(Debug, Clone)]
pub enum UpdateOp {
    /// Overwrites the field with the given value.
    Set {
        /// The field name to write.
        field: String,
        /// The new value.
        value: Bson,
    },
    /// Appends the value to the array field unless already present.
    /// Missing fields are created as a one-element array.
    AddToSet {
        /// The array field name.
        field: String,
        /// The value to insert.
        value: Bson,
    },
}

/// An ordered collection of update operations applied to one document.
///
/// # Example
///
/// ```ignore
/// use biblio_core::query::UpdateOps;
///
/// let ops = UpdateOps::new().add_to_set("author_ids", 7);
/// ```
#[derive(Debug, Clone, Default)]
pub struct UpdateOps {
    ops: Vec<UpdateOp>,
}

impl UpdateOps {
    /// Creates an empty update.
    pub fn new() -> Self {
        UpdateOps::default()
    }

    /// Appends a field overwrite.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.ops.push(UpdateOp::Set {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Appends a set-insertion into an array field.
    pub fn add_to_set(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.ops.push(UpdateOp::AddToSet {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// The operations in application order.
    pub fn ops(&self) -> &[UpdateOp] {
        &self.ops
    }
}
