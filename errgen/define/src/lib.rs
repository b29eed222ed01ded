//! Errgen Definition Library
//!
//! This crate provides the catalog types consumed by the `errgen` generator:
//!
//! - [`ErrorCatalog`] - Root of a catalog: output path, version and entries
//! - [`ErrorSpec`] - One error: name, comment, status code, message, parameters
//! - [`ParamSpec`] - One typed constructor parameter
//! - [`Arity`] - Constructor shape derived from the parameter count
//! - [`MessageSlot`] - Numeric id tying a message constant to its constructor
//!
//! ## Examples
//!
//! ```
//! use errgen_define::{ErrorCatalog, assign_slots};
//!
//! let catalog = ErrorCatalog::from_json(
//!     r#"{"errgen": {"path": "out", "version": "1.0.0", "errors": []}}"#,
//! )
//! .unwrap();
//!
//! assert!(catalog.validate().is_ok());
//! assert_eq!(assign_slots(catalog.errors.len()).count(), 0);
//! ```

pub mod arity;
pub mod error;
pub mod schema;
pub mod slot;

pub use arity::Arity;
pub use error::SchemaError;
pub use schema::{ErrorCatalog, ErrorSpec, ParamSpec};
pub use slot::{MessageSlot, RESERVED_SLOT, assign_slots};
