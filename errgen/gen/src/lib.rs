//! errgen code generator library.
//!
//! This crate turns an error catalog defined with `errgen-define` into three
//! Rust source files:
//!
//! - `messages.rs` - one `ErrMsg` constant per error, holding its slot id,
//!   status code and message template
//! - `api.rs` - one constructor per error, plus an argument holder struct for
//!   errors with more than one parameter
//! - `api_tests.rs` - tests calling every constructor with fixture values
//!
//! Each file is framed by header and footer resources that define the
//! runtime the generated code relies on (`Error`, `ErrMsg`, `errorf`, ...).
//! The assembled file is parsed with `syn` and formatted with `prettyplease`
//! before it is written.
//!
//! ## Modules
//!
//! - [`fragment`] - Poisoning source builder used by every generator
//! - [`codegen`] - Per-entry generation, dispatched on arity
//! - [`fixtures`] - Test values per parameter type
//! - [`output`] - File assembly, validation and formatting
//! - [`generate`] - The generation entry point
//! - [`config`] - Target files, resources and the TOML configuration
//! - [`validation`] - Naming collision checks
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use errgen_gen::config::GeneratorConfig;
//! use errgen_gen::generate::generate;
//!
//! let written = generate(Path::new("errors.json"), &GeneratorConfig::default()).unwrap();
//! for path in written {
//!     println!("{}", path.display());
//! }
//! ```

pub mod codegen;
pub mod config;
pub mod errors;
pub mod fixtures;
pub mod fragment;
pub mod generate;
pub mod naming;
pub mod output;
pub mod validation;

#[cfg(test)]
mod test_utils;

pub use config::{GeneratorConfig, Resource, Target, TargetConfig};
pub use errors::GeneratorError;
pub use fixtures::Fixtures;
pub use generate::{generate, generate_catalog};
