//! Connection settings for the MongoDB backend.

use serde::{Deserialize, Serialize};

fn default_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

/// Connection settings: the DSN and the database to open.
///
/// The URI defaults to a local server, so a bare `{ "database": "library" }`
/// is a complete configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// MongoDB connection string.
    #[serde(default = "default_uri")]
    pub uri: String,
    /// Name of the database holding the catalog collections.
    pub database: String,
}

impl MongoConfig {
    /// Settings for a named database on the default local server.
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            uri: default_uri(),
            database: database.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{Bson, doc, de::deserialize_from_bson};

    #[test]
    fn uri_defaults_to_localhost() {
        let config = MongoConfig::new("library");
        assert_eq!(config.uri, "mongodb://localhost:27017");
        assert_eq!(config.database, "library");
    }

    #[test]
    fn deserializes_with_defaulted_uri() {
        let config: MongoConfig =
            deserialize_from_bson(Bson::Document(doc! { "database": "library" })).unwrap();
        assert_eq!(config.uri, "mongodb://localhost:27017");
    }
}
