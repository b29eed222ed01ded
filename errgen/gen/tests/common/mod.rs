//! Common test utilities for errgen integration tests.
//!
//! Builders for catalog entries that would otherwise be written out as JSON
//! in every test.

use std::path::PathBuf;

use errgen_define::{ErrorCatalog, ErrorSpec, ParamSpec};

/// Creates a parameter documented as "the {name}".
pub fn make_param(name: &str, ty: &str) -> ParamSpec {
    ParamSpec {
        name: name.to_string(),
        comment: format!("the {}", name),
        ty: ty.to_string(),
    }
}

/// Creates an entry with a `BAD_REQUEST` code and a one-placeholder template.
///
/// ## Arguments
///
/// * `name` - Error name in PascalCase
/// * `params` - Constructor parameters in declaration order
pub fn make_spec(name: &str, params: Vec<ParamSpec>) -> ErrorSpec {
    ErrorSpec {
        name: name.to_string(),
        comment: format!("{} error", name),
        code: "StatusCode::BAD_REQUEST".to_string(),
        message: "bad {}".to_string(),
        params,
    }
}

/// Creates a catalog writing to `path`, at version "1.0.0".
pub fn make_catalog(path: impl Into<PathBuf>, errors: Vec<ErrorSpec>) -> ErrorCatalog {
    ErrorCatalog {
        path: path.into(),
        version: "1.0.0".to_string(),
        errors,
    }
}
