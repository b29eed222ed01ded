//! Errors raised while loading or validating a catalog.

use thiserror::Error;

/// Catalog loading and validation errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Catalog file could not be read.
    #[error("Failed to read catalog '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Catalog text is not a valid catalog document.
    #[error("Failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// An entry declares no parameters.
    #[error("Error '{name}' must have at least one parameter")]
    MissingParams {
        /// Name of the offending entry.
        name: String,
    },

    /// A required name is empty.
    #[error("Empty value for required field '{field}'")]
    EmptyName {
        /// Dotted location of the empty field.
        field: String,
    },

    /// Two entries share a name.
    #[error("Duplicate error name '{name}'")]
    DuplicateError { name: String },

    /// Two parameters of one entry share a name.
    #[error("Duplicate parameter '{param}' in error '{error}'")]
    DuplicateParam { error: String, param: String },
}
