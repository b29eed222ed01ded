//! Code generation for catalog entries.
//!
//! Every entry is generated three times, once per [`Target`]. The message
//! target only depends on the entry's slot; the API and API test targets
//! depend on the entry's [`Arity`] and go through a single dispatch table,
//! [`strategy_for`], so both targets always agree on the constructor shape.
//!
//! ## Submodules
//!
//! - [`messages`] - Message slot constants
//! - [`single`] - Constructors and tests for one-parameter errors
//! - [`many`] - Argument holders, constructors and tests for multi-parameter errors
//! - [`assertions`] - Test body pieces shared by both arities
//!
//! ## Output Format
//!
//! Generators return source text built with
//! [`FragmentBuilder`](crate::fragment::FragmentBuilder). Fragments are not
//! formatted individually; [`crate::output`] validates and formats the
//! assembled file.

pub mod assertions;
pub mod many;
pub mod messages;
pub mod single;

use errgen_define::{Arity, ErrorSpec, MessageSlot, SchemaError};

use crate::config::Target;
use crate::errors::GeneratorError;
use crate::fixtures::Fixtures;
use crate::fragment::{BuildError, FragmentBuilder};

pub use many::ManyParams;
pub use single::SingleParam;

/// Runtime item names the generated code refers to. They are defined by the
/// header resources.
pub mod runtime {
    /// Error type returned by every constructor.
    pub const ERROR: &str = "Error";
    /// Message slot data type.
    pub const ERR_MSG: &str = "ErrMsg";
    /// Builds an [`ERROR`] from a message slot and arguments.
    pub const ERRORF: &str = "errorf";
    /// Substitutes arguments into a message template.
    pub const RENDER: &str = "render";
    /// Constructor of the nil-argument error.
    pub const NIL_ARGUMENT: &str = "nil_argument";
    /// Message slot of the nil-argument error.
    pub const NIL_ARGUMENT_MSG: &str = "ERRMSG_NIL_ARGUMENT";
    /// Test helper asserting an error renders valid JSON.
    pub const ASSERT_VALID_JSON: &str = "assert_valid_json";
}

/// Constructor shape for one arity, covering both the API and test targets.
pub trait ArityStrategy: Sync {
    /// Fragments for the API file.
    fn api(&self, spec: &ErrorSpec) -> Result<Vec<String>, GeneratorError>;

    /// Fragments for the API test file.
    fn api_tests(&self, spec: &ErrorSpec, fixtures: &Fixtures)
    -> Result<Vec<String>, GeneratorError>;
}

static SINGLE_PARAM: SingleParam = SingleParam;
static MANY_PARAMS: ManyParams = ManyParams;

/// Dispatch table from arity to generation strategy.
///
/// ## Errors
///
/// Returns `SchemaError::MissingParams` for entries without parameters.
pub fn strategy_for(spec: &ErrorSpec) -> Result<&'static dyn ArityStrategy, GeneratorError> {
    match spec.arity() {
        Arity::NoParam => Err(SchemaError::MissingParams {
            name: spec.name.clone(),
        }
        .into()),
        Arity::OneParam(_) => Ok(&SINGLE_PARAM),
        Arity::ManyParams(_) => Ok(&MANY_PARAMS),
    }
}

/// Generates the fragments of one entry for one target.
///
/// Entries without parameters are rejected for every target, so nothing is
/// emitted for them.
///
/// ## Errors
///
/// Returns the first error raised while generating the entry.
pub fn generate_fragments(
    target: Target,
    spec: &ErrorSpec,
    slot: MessageSlot,
    fixtures: &Fixtures,
) -> Result<Vec<String>, GeneratorError> {
    let strategy = strategy_for(spec)?;
    match target {
        Target::Messages => Ok(vec![messages::generate_message(spec, slot)?]),
        Target::Api => strategy.api(spec),
        Target::ApiTests => strategy.api_tests(spec, fixtures),
    }
}

/// Finishes a builder chain, attributing a failure to the entry.
pub(crate) fn finish(
    code: FragmentBuilder,
    what: &'static str,
    spec: &ErrorSpec,
) -> Result<String, GeneratorError> {
    code.finish()
        .map_err(|source: BuildError| GeneratorError::Build {
            what,
            name: spec.name.clone(),
            source,
        })
}
