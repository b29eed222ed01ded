//! Shared test utilities for errgen-gen unit tests.
//!
//! Helpers for building catalog entries and checking generated fragments,
//! used by the unit tests of every generator module. Integration tests have
//! their own copy of the entry builders in `tests/common`.

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

/// Creates a catalog writing to `path`.
pub fn make_catalog(path: impl Into<PathBuf>, errors: Vec<ErrorSpec>) -> ErrorCatalog {
    ErrorCatalog {
        path: path.into(),
        version: "1.0.0".to_string(),
        errors,
    }
}

/// Parses concatenated fragments as a Rust file.
///
/// ## Errors
///
/// Returns an error string if the fragments fail to parse.
pub fn parse_fragments(fragments: &[String]) -> Result<syn::File, String> {
    syn::parse_file(&fragments.concat()).map_err(|e| e.to_string())
}

/// Formats concatenated fragments using prettyplease.
///
/// ## Errors
///
/// Returns an error string if the fragments fail to parse.
pub fn format_fragments(fragments: &[String]) -> Result<String, String> {
    let file = parse_fragments(fragments)?;
    Ok(prettyplease::unparse(&file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_spec_creates_valid_entry() {
        let spec = make_spec("NotFound", vec![make_param("path", "&str")]);
        assert_eq!(spec.name, "NotFound");
        assert_eq!(spec.params[0].comment, "the path");
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn make_catalog_keeps_order() {
        let catalog = make_catalog(
            "out",
            vec![
                make_spec("A", vec![make_param("a", "&str")]),
                make_spec("B", vec![make_param("b", "&str")]),
            ],
        );
        assert_eq!(catalog.errors[0].name, "A");
        assert_eq!(catalog.errors[1].name, "B");
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn format_fragments_rejects_invalid_code() {
        let fragments = vec!["fn broken( {".to_string()];
        assert!(format_fragments(&fragments).is_err());
    }
}
