//! Pre-generation checks on a catalog.
//!
//! Schema invariants are checked by [`ErrorCatalog::validate`]. On top of
//! those, every item name the generator would emit is derived up front so
//! that two entries mapping to the same name (e.g. `NotFound` and
//! `Not_Found` both yield `not_found`) fail before any file is touched,
//! instead of as a compile error in the generated code. Parameter names are
//! checked against the runtime items too, since a parameter named `errorf`
//! would shadow the function the constructor body calls.
//!
//! ## Examples
//!
//! ```
//! use errgen_define::{ErrorCatalog, ErrorSpec, ParamSpec};
//! use errgen_gen::validation::validate_catalog;
//!
//! let param = ParamSpec {
//!     name: "path".to_string(),
//!     comment: "missing path".to_string(),
//!     ty: "&str".to_string(),
//! };
//! let entry = |name: &str| ErrorSpec {
//!     name: name.to_string(),
//!     comment: String::new(),
//!     code: "StatusCode::NOT_FOUND".to_string(),
//!     message: "{} not found".to_string(),
//!     params: vec![param.clone()],
//! };
//! let mut catalog = ErrorCatalog {
//!     path: "out".into(),
//!     version: "1".to_string(),
//!     errors: vec![entry("NotFound")],
//! };
//! assert!(validate_catalog(&catalog).is_ok());
//!
//! catalog.errors.push(entry("Not_Found"));
//! assert!(validate_catalog(&catalog).is_err());
//! ```

use std::collections::HashMap;

use errgen_define::{ErrorCatalog, ErrorSpec};

use crate::codegen::runtime;
use crate::errors::GeneratorError;
use crate::naming::{args_struct, function_name, message_const, nil_test_name, test_name};

/// Owner reported when an entry collides with a runtime item.
const RUNTIME_OWNER: &str = "errgen runtime";

/// Items defined by the header resources.
const RUNTIME_NAMES: &[&str] = &[
    runtime::ERROR,
    runtime::ERR_MSG,
    runtime::ERRORF,
    runtime::RENDER,
    runtime::NIL_ARGUMENT,
    runtime::NIL_ARGUMENT_MSG,
    runtime::ASSERT_VALID_JSON,
    "StatusCode",
];

/// Every item name generated for `spec`.
fn generated_names(spec: &ErrorSpec) -> Vec<String> {
    let mut names = vec![
        function_name(&spec.name),
        message_const(&spec.name),
        test_name(&spec.name),
    ];
    if spec.params.len() > 1 {
        names.push(args_struct(&spec.name));
        names.push(nil_test_name(&spec.name));
    }
    names
}

/// Validates a catalog before code generation.
///
/// ## Errors
///
/// Returns `GeneratorError::Schema` for the first schema violation,
/// `GeneratorError::NamingCollision` when two entries, or an entry and the
/// runtime, generate the same item name, and
/// `GeneratorError::ReservedParam` for a parameter named after a runtime
/// item.
pub fn validate_catalog(catalog: &ErrorCatalog) -> Result<(), GeneratorError> {
    catalog.validate()?;

    let mut owners: HashMap<String, &str> = RUNTIME_NAMES
        .iter()
        .map(|name| (name.to_string(), RUNTIME_OWNER))
        .collect();

    for spec in &catalog.errors {
        if let Some(param) = spec
            .params
            .iter()
            .find(|p| RUNTIME_NAMES.contains(&p.name.as_str()))
        {
            return Err(GeneratorError::ReservedParam {
                error: spec.name.clone(),
                param: param.name.clone(),
            });
        }
        for generated in generated_names(spec) {
            if let Some(first) = owners.get(&generated) {
                return Err(GeneratorError::NamingCollision {
                    first: first.to_string(),
                    second: spec.name.clone(),
                    generated,
                });
            }
            owners.insert(generated, &spec.name);
        }
    }

    Ok(())
}
