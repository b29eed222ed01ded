//! Error types for the errgen generator.

use errgen_define::SchemaError;
use thiserror::Error;

use crate::fragment::BuildError;

/// Errors that can occur during code generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The catalog could not be loaded or violates a schema invariant.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A parameter type has no fixture, so no test can be generated for it.
    #[error("Unsupported parameter type '{ty}', supported types are [{supported}]")]
    UnsupportedType {
        /// The type that was requested.
        ty: String,
        /// Every supported type, sorted and comma separated.
        supported: String,
    },

    /// A generation strategy was invoked with a parameter count outside its
    /// precondition.
    #[error("Error '{name}' has {actual} parameters, expected {expected}")]
    ArityMismatch {
        name: String,
        /// Human readable precondition, e.g. "exactly 1".
        expected: &'static str,
        actual: usize,
    },

    /// A required argument was empty.
    #[error("Required argument '{field}' is empty")]
    EmptyArgument { field: String },

    /// A fragment builder chain was poisoned.
    #[error("Failed to build {what} for '{name}': {source}")]
    Build {
        /// Kind of fragment, e.g. "api function".
        what: &'static str,
        name: String,
        #[source]
        source: BuildError,
    },

    /// The assembled file is not valid Rust.
    #[error("Generated code in '{path}' is invalid: {source}")]
    Syntax {
        path: String,
        #[source]
        source: syn::Error,
    },

    /// A filesystem operation failed.
    #[error("{op} failed for '{path}': {source}")]
    Io {
        op: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Two catalog entries would generate the same item name.
    #[error(
        "Naming collision: '{first}' and '{second}' both generate '{generated}'. Suggestion: rename one of them"
    )]
    NamingCollision {
        first: String,
        second: String,
        generated: String,
    },

    /// A parameter name would shadow an item of the generated runtime.
    #[error(
        "Parameter '{param}' of error '{error}' shadows the runtime item of the same name. Suggestion: rename the parameter"
    )]
    ReservedParam { error: String, param: String },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// A failing step, wrapped with the operation and file involved.
    #[error("{op} '{path}': {source}")]
    Op {
        op: &'static str,
        path: String,
        #[source]
        source: Box<GeneratorError>,
    },
}

impl GeneratorError {
    /// Wraps `self` with the operation and file that failed.
    pub fn during(self, op: &'static str, path: impl Into<String>) -> Self {
        GeneratorError::Op {
            op,
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error, skipping every [`GeneratorError::Op`] layer.
    pub fn root(&self) -> &GeneratorError {
        match self {
            GeneratorError::Op { source, .. } => source.root(),
            other => other,
        }
    }
}
