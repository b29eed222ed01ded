//! Argument holders, constructors and tests for errors with two or more
//! parameters.
//!
//! Parameters travel in a holder struct, and the constructor guards against
//! a missing holder:
//!
//! ```ignore
//! /// NotEqualArgs holds the required arguments for the error function not_equal.
//! pub struct NotEqualArgs<'a> {
//!     /// path being compared
//!     pub path: &'a str,
//!     /// expected count
//!     pub count: i64,
//! }
//!
//! /// NotEqual returns an error when two values differ.
//! pub fn not_equal(a: Option<&NotEqualArgs<'_>>) -> Error {
//!     let Some(a) = a else {
//!         return nil_argument();
//!     };
//!     errorf(&ERRMSG_NOT_EQUAL, &[&a.path, &a.count])
//! }
//! ```
//!
//! Two tests are generated: one passing `None` and expecting the
//! nil-argument error, and one passing a holder built from fixtures.

use errgen_define::ErrorSpec;
use proc_macro2::Span;
use quote::ToTokens;

use super::assertions::{RESULT, bind_slot, expected_error, outcome_checks};
use super::{ArityStrategy, finish, runtime};
use crate::errors::GeneratorError;
use crate::fixtures::Fixtures;
use crate::fragment::{
    CmpOp, FieldArgs, FragmentBuilder, FuncArgs, IfArgs, KeyedArgs, LetElseArgs, Param,
    StructArgs, Visibility,
};
use crate::naming::{args_struct, function_name, message_const, nil_test_name, test_name};

/// Name of the holder parameter and of the holder binding in tests.
const HOLDER: &str = "a";

/// Lifetime added to holders that borrow.
const HOLDER_LIFETIME: &str = "'a";

/// Strategy for multi-parameter errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManyParams;

fn check_arity(spec: &ErrorSpec) -> Result<(), GeneratorError> {
    if spec.params.len() < 2 {
        return Err(GeneratorError::ArityMismatch {
            name: spec.name.clone(),
            expected: "at least 2",
            actual: spec.params.len(),
        });
    }
    Ok(())
}

/// Field type for a holder, and whether it borrows.
///
/// A top-level reference without a lifetime gets the holder lifetime.
/// Unparseable types are returned unchanged so the builder reports them.
fn holder_field_type(ty: &str) -> (String, bool) {
    match syn::parse_str::<syn::Type>(ty) {
        Ok(syn::Type::Reference(mut reference)) if reference.lifetime.is_none() => {
            reference.lifetime = Some(syn::Lifetime::new(HOLDER_LIFETIME, Span::call_site()));
            (reference.into_token_stream().to_string(), true)
        }
        _ => (ty.to_string(), false),
    }
}

fn holder_borrows(spec: &ErrorSpec) -> bool {
    spec.params.iter().any(|p| holder_field_type(&p.ty).1)
}

/// Generates the argument holder struct.
///
/// ## Errors
///
/// Returns `GeneratorError::ArityMismatch` for fewer than two parameters and
/// `GeneratorError::Build` if a name or type is not valid Rust.
pub fn generate_args_struct(spec: &ErrorSpec) -> Result<String, GeneratorError> {
    check_arity(spec)?;
    let holder = args_struct(&spec.name);

    let mut code = FragmentBuilder::new();
    code.doc(&format!(
        "{} holds the required arguments for the error function {}.",
        holder,
        function_name(&spec.name)
    ))
    .struct_open(&StructArgs {
        vis: Visibility::Public,
        name: &holder,
        lifetime: holder_borrows(spec).then_some(HOLDER_LIFETIME),
    });
    for param in &spec.params {
        let (ty, _) = holder_field_type(&param.ty);
        code.doc(&param.comment).field(&FieldArgs {
            vis: Visibility::Public,
            name: &param.name,
            ty: &ty,
        });
    }
    code.item_end();

    finish(code, "argument holder", spec)
}

/// Generates the constructor taking an optional holder.
///
/// ## Errors
///
/// Returns `GeneratorError::ArityMismatch` for fewer than two parameters and
/// `GeneratorError::Build` if a name is not valid Rust.
pub fn generate_api_function(spec: &ErrorSpec) -> Result<String, GeneratorError> {
    check_arity(spec)?;
    let holder = args_struct(&spec.name);
    let holder_ty = if holder_borrows(spec) {
        format!("Option<&{}<'_>>", holder)
    } else {
        format!("Option<&{}>", holder)
    };

    let mut code = FragmentBuilder::new();
    code.doc(&spec.comment)
        .func(&FuncArgs {
            vis: Visibility::Public,
            name: &function_name(&spec.name),
            param: Some(Param {
                name: HOLDER,
                ty: &holder_ty,
            }),
            ret: Some(runtime::ERROR),
        })
        .let_else_some(&LetElseArgs {
            binding: HOLDER,
            expr: HOLDER,
        })
        .ret()
        .call(runtime::NIL_ARGUMENT)
        .param_end()
        .semi()
        .block_end_semi()
        .call(runtime::ERRORF)
        .addr()
        .ident(&message_const(&spec.name))
        .list()
        .slice_open();
    for (i, param) in spec.params.iter().enumerate() {
        if i > 0 {
            code.list();
        }
        code.addr().expr(&format!("{}.{}", HOLDER, param.name));
    }
    code.bracket_end().param_endln().item_end();

    finish(code, "api function", spec)
}

/// Generates the test passing no holder.
///
/// ## Errors
///
/// Returns `GeneratorError::ArityMismatch` for fewer than two parameters and
/// `GeneratorError::Build` if a name is not valid Rust.
pub fn generate_nil_test(spec: &ErrorSpec) -> Result<String, GeneratorError> {
    check_arity(spec)?;

    let mut code = FragmentBuilder::new();
    code.attr("test")
        .func(&FuncArgs {
            vis: Visibility::Private,
            name: &nil_test_name(&spec.name),
            param: None,
            ret: None,
        })
        .let_bind(RESULT)
        .call(&function_name(&spec.name))
        .ident("None")
        .param_end()
        .semi()
        .if_cmp(&IfArgs {
            left: &format!("{}.id", RESULT),
            op: CmpOp::Ne,
            right: &format!("{}.id", runtime::NIL_ARGUMENT_MSG),
        })
        .macro_call("panic")
        .str_lit("expected the nil argument error, got {}")
        .list()
        .ident(RESULT)
        .param_end()
        .semi()
        .block_end()
        .item_end();

    finish(code, "api nil test", spec)
}

/// Generates the test passing a holder populated from fixtures.
///
/// ## Errors
///
/// Returns `GeneratorError::ArityMismatch` for fewer than two parameters,
/// `GeneratorError::UnsupportedType` for the first parameter type without a
/// fixture, and `GeneratorError::Build` if the generated test is malformed.
pub fn generate_api_test(spec: &ErrorSpec, fixtures: &Fixtures) -> Result<String, GeneratorError> {
    check_arity(spec)?;
    let values = spec
        .params
        .iter()
        .map(|p| fixtures.lookup(&p.ty))
        .collect::<Result<Vec<_>, _>>()?;
    let function = function_name(&spec.name);

    let mut code = FragmentBuilder::new();
    code.attr("test")
        .func(&FuncArgs {
            vis: Visibility::Private,
            name: &test_name(&spec.name),
            param: None,
            ret: None,
        })
        .let_bind(HOLDER)
        .composite(&args_struct(&spec.name));
    for (param, value) in spec.params.iter().zip(&values) {
        code.keyed(&KeyedArgs {
            key: &param.name,
            value,
        });
    }
    code.composite_end().semi();

    let args: Vec<String> = spec
        .params
        .iter()
        .map(|p| format!("{}.{}", HOLDER, p.name))
        .collect();
    bind_slot(&mut code, &message_const(&spec.name));
    expected_error(&mut code, &args)
        .let_bind(RESULT)
        .call(&function)
        .expr(&format!("Some(&{})", HOLDER))
        .param_end()
        .semi();
    outcome_checks(&mut code, &function).item_end();

    finish(code, "api test", spec)
}

impl ArityStrategy for ManyParams {
    fn api(&self, spec: &ErrorSpec) -> Result<Vec<String>, GeneratorError> {
        Ok(vec![generate_args_struct(spec)?, generate_api_function(spec)?])
    }

    fn api_tests(
        &self,
        spec: &ErrorSpec,
        fixtures: &Fixtures,
    ) -> Result<Vec<String>, GeneratorError> {
        Ok(vec![
            generate_nil_test(spec)?,
            generate_api_test(spec, fixtures)?,
        ])
    }
}
