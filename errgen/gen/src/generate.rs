//! Generation entry point.
//!
//! A run loads the catalog, validates it, then makes one pass per
//! [`Target`]. Each pass walks the entries in catalog order, assigns message
//! slots, dispatches on arity and appends the fragments to the target file.
//! The first failure aborts the run; files finished by earlier passes stay
//! on disk and the failing file is left as assembled so far.

use std::path::{Path, PathBuf};

use errgen_define::{ErrorCatalog, assign_slots};
use strum::IntoEnumIterator;
use tracing::{debug, info};

use crate::codegen::generate_fragments;
use crate::config::{GeneratorConfig, Target};
use crate::errors::GeneratorError;
use crate::output::OutputFile;
use crate::validation::validate_catalog;

/// Generates every target for the catalog at `schema_path`.
///
/// Returns the written file paths, in target order.
///
/// ## Errors
///
/// Returns the first error, wrapped with the operation and file involved.
/// See [`GeneratorError::root`] for the underlying cause.
pub fn generate(
    schema_path: &Path,
    config: &GeneratorConfig,
) -> Result<Vec<PathBuf>, GeneratorError> {
    let schema = schema_path.display().to_string();
    info!(schema = %schema, "loading catalog");

    let catalog = ErrorCatalog::load(schema_path)
        .map_err(|e| GeneratorError::from(e).during("load", &schema))?;
    validate_catalog(&catalog).map_err(|e| e.during("validate", &schema))?;

    generate_targets(&catalog, config).map_err(|e| e.during("generate", &schema))
}

/// Validates and generates every target for an already loaded catalog,
/// e.g. one built in code.
///
/// ## Errors
///
/// Returns the first error, wrapped with the operation and target file
/// involved.
pub fn generate_catalog(
    catalog: &ErrorCatalog,
    config: &GeneratorConfig,
) -> Result<Vec<PathBuf>, GeneratorError> {
    validate_catalog(catalog)?;
    generate_targets(catalog, config)
}

/// Writes every target of a validated catalog.
fn generate_targets(
    catalog: &ErrorCatalog,
    config: &GeneratorConfig,
) -> Result<Vec<PathBuf>, GeneratorError> {
    let output_dir = config.output.as_deref().unwrap_or(&catalog.path);
    info!(
        output = %output_dir.display(),
        version = %catalog.version,
        errors = catalog.errors.len(),
        "generating error API"
    );

    Target::iter()
        .map(|target| generate_target(catalog, config, output_dir, target))
        .collect()
}

fn generate_target(
    catalog: &ErrorCatalog,
    config: &GeneratorConfig,
    output_dir: &Path,
    target: Target,
) -> Result<PathBuf, GeneratorError> {
    let file = OutputFile::new(output_dir, target, config.target(target), &catalog.version);
    let path = file.path().display().to_string();

    file.start().map_err(|e| e.during("start", &path))?;
    for (spec, slot) in catalog.errors.iter().zip(assign_slots(catalog.errors.len())) {
        debug!(target_file = %target, error = %spec.name, slot = %slot, arity = %spec.arity(), "generating entry");
        let fragments = generate_fragments(target, spec, slot, &config.fixtures)
            .map_err(|e| e.during("write", &path))?;
        for fragment in &fragments {
            file.write_fragment(fragment)
                .map_err(|e| e.during("write", &path))?;
        }
    }
    let written = file.finish().map_err(|e| e.during("finish", &path))?;

    info!(path = %written.display(), "wrote {}", target);
    Ok(written)
}
