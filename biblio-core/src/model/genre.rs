//! The closed set of catalog genres and their canonical token form.

use std::fmt;

use crate::error::{CatalogError, CatalogResult};

/// A book genre.
///
/// Genres form a fixed enumerated set. Each variant has a canonical token
/// (`FICTION`, `SCI_FI`, ...) used in storage and comparisons; parsing
/// normalizes case and separators before matching, so `"mystery"`,
/// `"Mystery"` and `"MYSTERY"` all name the same genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Fiction,
    NonFiction,
    Mystery,
    SciFi,
    Fantasy,
    Biography,
    History,
    Romance,
}

impl Genre {
    /// Every genre, in display order. Useful for populating pickers.
    pub const ALL: [Genre; 8] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::Mystery,
        Genre::SciFi,
        Genre::Fantasy,
        Genre::Biography,
        Genre::History,
        Genre::Romance,
    ];

    /// The canonical token stored in documents and used for comparisons.
    pub fn as_token(&self) -> &'static str {
        match self {
            Genre::Fiction => "FICTION",
            Genre::NonFiction => "NON_FICTION",
            Genre::Mystery => "MYSTERY",
            Genre::SciFi => "SCI_FI",
            Genre::Fantasy => "FANTASY",
            Genre::Biography => "BIOGRAPHY",
            Genre::History => "HISTORY",
            Genre::Romance => "ROMANCE",
        }
    }

    /// Parses a genre from user or stored input.
    ///
    /// Normalizes to the canonical token form (uppercase, spaces and hyphens
    /// as underscores). An unrecognized token is a validation error, not an
    /// empty result.
    pub fn parse(input: &str) -> CatalogResult<Genre> {
        let token = input
            .trim()
            .to_ascii_uppercase()
            .replace([' ', '-'], "_");

        Genre::ALL
            .iter()
            .copied()
            .find(|genre| genre.as_token() == token)
            .ok_or_else(|| CatalogError::UnknownGenre(input.to_string()))
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}
