//! Catalog definitions for generated error APIs.
//!
//! An error catalog is a JSON document listing every error a package exposes.
//! Each entry names the error, documents it, assigns a status code symbol and
//! a message template, and lists the typed parameters the generated
//! constructor accepts.
//!
//! ```json
//! {
//!   "errgen": {
//!     "path": "generated",
//!     "version": "1.0.0",
//!     "errors": [
//!       {
//!         "name": "NotExistent",
//!         "comment": "NotExistent returns an error when a file does not exist.",
//!         "code": "StatusCode::NOT_FOUND",
//!         "message": "file {} does not exist",
//!         "param": [
//!           { "name": "path", "comment": "path of the missing file", "type": "&str" }
//!         ]
//!       }
//!     ]
//!   }
//! }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::arity::Arity;
use crate::error::SchemaError;

/// On-disk wrapper holding the catalog under the `errgen` root key.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogDocument {
    errgen: ErrorCatalog,
}

/// A complete error catalog.
///
/// ## Examples
///
/// ```
/// use errgen_define::ErrorCatalog;
///
/// let json = r#"{
///   "errgen": {
///     "path": "out",
///     "version": "0.3.1",
///     "errors": [{
///       "name": "NotSet",
///       "comment": "NotSet is returned when a variable is unset.",
///       "code": "StatusCode::NOT_FOUND",
///       "message": "variable {} is not set",
///       "param": [{ "name": "var", "comment": "variable name", "type": "&str" }]
///     }]
///   }
/// }"#;
///
/// let catalog = ErrorCatalog::from_json(json).unwrap();
/// assert_eq!(catalog.version, "0.3.1");
/// assert_eq!(catalog.errors[0].params[0].ty, "&str");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCatalog {
    /// Output directory for the generated files.
    ///
    /// Relative paths are resolved against the directory of the catalog file.
    pub path: PathBuf,
    /// Version of the generated package.
    pub version: String,
    /// Errors in declaration order. The order drives slot numbering.
    pub errors: Vec<ErrorSpec>,
}

/// A single error definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSpec {
    /// Error name in PascalCase (e.g. "NotExistent").
    pub name: String,
    /// Documentation for the generated constructor.
    pub comment: String,
    /// Status code symbol, emitted as a path (e.g. "StatusCode::NOT_FOUND").
    pub code: String,
    /// Message template. Each `{}` is replaced by one argument, in order.
    #[serde(rename = "message")]
    pub message: String,
    /// Constructor parameters in declaration order.
    #[serde(rename = "param", default)]
    pub params: Vec<ParamSpec>,
}

/// A typed constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name in snake_case.
    pub name: String,
    /// Documentation for the parameter or holder field.
    pub comment: String,
    /// Rust type of the parameter (e.g. "&str", "i64").
    #[serde(rename = "type")]
    pub ty: String,
}

impl ErrorCatalog {
    /// Parses a catalog document from JSON text.
    ///
    /// ## Errors
    ///
    /// Returns `SchemaError::Json` if the text is not a valid catalog document.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Ok(doc.errgen)
    }

    /// Reads and parses a catalog file.
    ///
    /// The catalog's `path` is resolved against the file's parent directory
    /// when it is relative.
    ///
    /// ## Errors
    ///
    /// Returns `SchemaError::Read` if the file cannot be read and
    /// `SchemaError::Json` if its contents are not a valid catalog.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let json = fs::read_to_string(path).map_err(|source| SchemaError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut catalog = Self::from_json(&json)?;

        if catalog.path.is_relative()
            && let Some(parent) = path.parent()
        {
            catalog.path = parent.join(&catalog.path);
        }

        Ok(catalog)
    }

    /// Checks the structural invariants of the catalog.
    ///
    /// Every entry needs a non-empty name, at least one parameter and
    /// parameter names that are non-empty and unique within the entry.
    /// Entry names must be unique across the catalog.
    ///
    /// ## Errors
    ///
    /// Returns the first violation found, in declaration order.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut names = HashSet::new();
        for spec in &self.errors {
            spec.validate()?;
            if !names.insert(spec.name.as_str()) {
                return Err(SchemaError::DuplicateError {
                    name: spec.name.clone(),
                });
            }
        }
        Ok(())
    }
}

impl ErrorSpec {
    /// Classifies the entry by parameter count.
    pub fn arity(&self) -> Arity<'_> {
        Arity::of(&self.params)
    }

    /// Checks the invariants of a single entry.
    ///
    /// ## Errors
    ///
    /// - `SchemaError::EmptyName` when the entry or a parameter has no name
    /// - `SchemaError::MissingParams` when the entry has no parameters
    /// - `SchemaError::DuplicateParam` when two parameters share a name
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::EmptyName {
                field: "name".to_string(),
            });
        }
        if self.params.is_empty() {
            return Err(SchemaError::MissingParams {
                name: self.name.clone(),
            });
        }

        let mut seen = HashSet::new();
        for param in &self.params {
            if param.name.trim().is_empty() {
                return Err(SchemaError::EmptyName {
                    field: format!("{}.param.name", self.name),
                });
            }
            if !seen.insert(param.name.as_str()) {
                return Err(SchemaError::DuplicateParam {
                    error: self.name.clone(),
                    param: param.name.clone(),
                });
            }
        }
        Ok(())
    }
}
