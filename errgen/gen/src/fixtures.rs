//! Test values for constructor parameters.
//!
//! Generated tests call every constructor with a fixed value per parameter
//! type. [`Fixtures`] maps a type name, exactly as written in the catalog, to
//! the Rust expression used for it. It is the only place parameter types are
//! checked for test generation.

use std::collections::BTreeMap;

use crate::errors::GeneratorError;

/// Type-name to fixture-expression table.
///
/// ## Examples
///
/// ```
/// use errgen_gen::fixtures::Fixtures;
///
/// let mut fixtures = Fixtures::default();
/// assert_eq!(fixtures.lookup("i64").unwrap(), "42");
///
/// fixtures.insert("u8", "7");
/// assert_eq!(fixtures.lookup("u8").unwrap(), "7");
///
/// let err = fixtures.lookup("Vec<u8>").unwrap_err();
/// assert!(err.to_string().contains("u8"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixtures {
    table: BTreeMap<String, String>,
}

impl Default for Fixtures {
    fn default() -> Self {
        let table = [
            ("&str", "\"foo\""),
            ("String", "String::from(\"foo\")"),
            ("i64", "42"),
            ("u64", "7"),
            ("f64", "2.5"),
            ("bool", "true"),
            ("&dyn std::error::Error", "&std::io::Error::other(\"foo\")"),
        ]
        .into_iter()
        .map(|(ty, expr)| (ty.to_string(), expr.to_string()))
        .collect();
        Self { table }
    }
}

impl Fixtures {
    /// A table without any supported type.
    pub fn empty() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    /// Adds or replaces the fixture for `ty`.
    pub fn insert(&mut self, ty: impl Into<String>, expr: impl Into<String>) -> &mut Self {
        self.table.insert(ty.into(), expr.into());
        self
    }

    /// Adds every entry of `other`, replacing existing ones.
    pub fn extend(&mut self, other: impl IntoIterator<Item = (String, String)>) -> &mut Self {
        self.table.extend(other);
        self
    }

    /// Supported type names in sorted order.
    pub fn supported(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    /// Returns the fixture expression for `ty`.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::UnsupportedType` listing every supported type
    /// when `ty` is not in the table.
    pub fn lookup(&self, ty: &str) -> Result<&str, GeneratorError> {
        self.table
            .get(ty)
            .map(String::as_str)
            .ok_or_else(|| GeneratorError::UnsupportedType {
                ty: ty.to_string(),
                supported: self.supported().collect::<Vec<_>>().join(", "),
            })
    }
}
