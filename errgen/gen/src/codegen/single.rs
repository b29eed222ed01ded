//! Constructors and tests for errors with exactly one parameter.
//!
//! The constructor takes the parameter directly:
//!
//! ```ignore
//! /// NotExistent returns an error when a file does not exist.
//! ///
//! /// * `path` - path of the missing file
//! pub fn not_existent(path: &str) -> Error {
//!     errorf(&ERRMSG_NOT_EXISTENT, &[&path])
//! }
//! ```
//!
//! Its test calls it with the fixture for the parameter type:
//!
//! ```ignore
//! #[test]
//! fn test_not_existent() {
//!     let a = "foo";
//!     let em = &ERRMSG_NOT_EXISTENT;
//!     let expected = Error {
//!         id: em.id,
//!         code: em.code.as_u16(),
//!         message: render(em.message, &[&a]),
//!         args: vec![a.to_string()],
//!     };
//!     let err = not_existent(a);
//!     assert!(!err.message.is_empty(), "not_existent returned an empty error");
//!     assert_valid_json(&err);
//!     assert_eq!(err, expected);
//! }
//! ```

use errgen_define::{ErrorSpec, ParamSpec};

use super::assertions::{RESULT, bind_slot, expected_error, outcome_checks};
use super::{ArityStrategy, finish, runtime};
use crate::errors::GeneratorError;
use crate::fixtures::Fixtures;
use crate::fragment::{FragmentBuilder, FuncArgs, LetArgs, Param, Visibility};
use crate::naming::{function_name, message_const, test_name};

/// Binding holding the fixture value in generated tests.
const ARG: &str = "a";

/// Strategy for one-parameter errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleParam;

/// Returns the only parameter of `spec`.
fn only_param(spec: &ErrorSpec) -> Result<&ParamSpec, GeneratorError> {
    match spec.params.as_slice() {
        [param] => Ok(param),
        params => Err(GeneratorError::ArityMismatch {
            name: spec.name.clone(),
            expected: "exactly 1",
            actual: params.len(),
        }),
    }
}

/// Generates the constructor of a one-parameter error.
///
/// ## Errors
///
/// Returns `GeneratorError::ArityMismatch` unless `spec` has exactly one
/// parameter, and `GeneratorError::Build` if a name or type is not valid
/// Rust.
pub fn generate_api_function(spec: &ErrorSpec) -> Result<String, GeneratorError> {
    let param = only_param(spec)?;

    let mut code = FragmentBuilder::new();
    code.doc(&spec.comment)
        .doc("")
        .doc(&format!("* `{}` - {}", param.name, param.comment))
        .func(&FuncArgs {
            vis: Visibility::Public,
            name: &function_name(&spec.name),
            param: Some(Param {
                name: &param.name,
                ty: &param.ty,
            }),
            ret: Some(runtime::ERROR),
        })
        .call(runtime::ERRORF)
        .addr()
        .ident(&message_const(&spec.name))
        .list()
        .slice_open()
        .addr()
        .ident(&param.name)
        .bracket_end()
        .param_endln()
        .item_end();

    finish(code, "api function", spec)
}

/// Generates the test of a one-parameter constructor.
///
/// ## Errors
///
/// Returns `GeneratorError::ArityMismatch` unless `spec` has exactly one
/// parameter, `GeneratorError::UnsupportedType` if the parameter type has no
/// fixture, and `GeneratorError::Build` if the generated test is malformed.
pub fn generate_api_test(spec: &ErrorSpec, fixtures: &Fixtures) -> Result<String, GeneratorError> {
    let param = only_param(spec)?;
    let fixture = fixtures.lookup(&param.ty)?;
    let function = function_name(&spec.name);

    let mut code = FragmentBuilder::new();
    code.attr("test")
        .func(&FuncArgs {
            vis: Visibility::Private,
            name: &test_name(&spec.name),
            param: None,
            ret: None,
        })
        .let_expr(&LetArgs {
            name: ARG,
            expr: fixture,
        });
    bind_slot(&mut code, &message_const(&spec.name));
    expected_error(&mut code, &[ARG.to_string()])
        .let_bind(RESULT)
        .call(&function)
        .ident(ARG)
        .param_end()
        .semi();
    outcome_checks(&mut code, &function).item_end();

    finish(code, "api test", spec)
}

impl ArityStrategy for SingleParam {
    fn api(&self, spec: &ErrorSpec) -> Result<Vec<String>, GeneratorError> {
        Ok(vec![generate_api_function(spec)?])
    }

    fn api_tests(
        &self,
        spec: &ErrorSpec,
        fixtures: &Fixtures,
    ) -> Result<Vec<String>, GeneratorError> {
        Ok(vec![generate_api_test(spec, fixtures)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{format_fragments, make_param, make_spec};

    fn not_existent() -> ErrorSpec {
        make_spec("NotExistent", vec![make_param("path", "&str")])
    }

    #[test]
    fn api_function_signature_and_body() {
        let code = generate_api_function(&not_existent()).unwrap();
        assert!(format_fragments(&[code.clone()]).is_ok());

        assert!(code.contains("/// NotExistent error"));
        assert!(code.contains("/// * `path` - the path"));
        assert!(code.contains("pub fn not_existent(path: &str) -> Error {"));
        assert!(code.contains("errorf(&ERRMSG_NOT_EXISTENT, &[&path])"));
    }

    #[test]
    fn api_test_uses_fixture_and_shared_assertions() {
        let code = generate_api_test(&not_existent(), &Fixtures::default()).unwrap();
        assert!(format_fragments(&[code.clone()]).is_ok());

        assert!(code.contains("#[test]"));
        assert!(code.contains("fn test_not_existent() {"));
        assert!(code.contains("let a = \"foo\";"));
        assert!(code.contains("let em = &ERRMSG_NOT_EXISTENT;"));
        assert!(code.contains("let err = not_existent(a);"));
        assert!(code.contains("assert!(!err.message.is_empty()"));
        assert!(code.contains("assert_valid_json(&err);"));
        assert!(code.contains("message: render(em.message, &[&a]),"));
        assert!(code.contains("args: vec![a.to_string()],"));
        assert!(code.contains("assert_eq!(err, expected);"));

        let expected = code.find("let expected").unwrap();
        let call = code.find("let err").unwrap();
        assert!(expected < call);
    }

    #[test]
    fn owned_fixture_is_used_before_the_call() {
        let spec = make_spec("Owned", vec![make_param("name", "String")]);
        let code = generate_api_test(&spec, &Fixtures::default()).unwrap();
        assert!(code.contains("let a = String::from(\"foo\");"));
        let last_use = code.rfind("a.to_string()").unwrap();
        let call = code.find("owned(a)").unwrap();
        assert!(last_use < call);
    }

    #[test]
    fn api_test_rejects_unsupported_type() {
        let spec = make_spec("Odd", vec![make_param("value", "Vec<u8>")]);
        let err = generate_api_test(&spec, &Fixtures::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Vec<u8>"));
        for ty in Fixtures::default().supported() {
            assert!(message.contains(ty));
        }
    }

    #[test]
    fn arity_mismatch_is_reported() {
        let spec = make_spec("Pair", vec![make_param("a", "&str"), make_param("b", "i64")]);
        assert!(matches!(
            generate_api_function(&spec),
            Err(GeneratorError::ArityMismatch { expected: "exactly 1", actual: 2, .. })
        ));
        assert!(matches!(
            generate_api_test(&make_spec("None", vec![]), &Fixtures::default()),
            Err(GeneratorError::ArityMismatch { actual: 0, .. })
        ));
    }

    #[test]
    fn invalid_param_type_fails_build() {
        let spec = make_spec("Weird", vec![make_param("a", "&&&")]);
        assert!(matches!(
            generate_api_function(&spec),
            Err(GeneratorError::Build { what: "api function", .. })
        ));
    }
}
