//! Test body pieces shared by every arity.
//!
//! Success tests for one-parameter and multi-parameter constructors share
//! their shape: build the error expected from the message slot, call the
//! constructor, check the result is not empty, check it renders JSON, then
//! compare it field by field against the expected error. Both arities call
//! into this module so the shape cannot drift.
//!
//! The expected error is built before the call, since the call may move a
//! fixture value such as a `String`.

use super::runtime;
use crate::fragment::{FragmentBuilder, KeyedArgs, LetArgs, SelArgs};

/// Binding holding the constructor's result in generated tests.
pub const RESULT: &str = "err";

/// Binding holding the message slot in generated tests.
pub const SLOT: &str = "em";

/// Binding holding the expected error in generated tests.
const EXPECTED: &str = "expected";

/// Emits `let em = &ERRMSG_...;`.
pub fn bind_slot<'c>(code: &'c mut FragmentBuilder, message_const: &str) -> &'c mut FragmentBuilder {
    code.let_expr(&LetArgs {
        name: SLOT,
        expr: &format!("&{}", message_const),
    })
}

/// Emits the non-empty and valid-JSON checks on the result, then compares
/// it with the expected error.
pub fn outcome_checks<'c>(code: &'c mut FragmentBuilder, function: &str) -> &'c mut FragmentBuilder {
    code.macro_call("assert")
        .expr(&format!("!{}.message.is_empty()", RESULT))
        .list()
        .str_lit(&format!("{} returned an empty error", function))
        .param_end()
        .semi()
        .call(runtime::ASSERT_VALID_JSON)
        .addr()
        .ident(RESULT)
        .param_end()
        .semi()
        .macro_call("assert_eq")
        .ident(RESULT)
        .list()
        .ident(EXPECTED)
        .param_end()
        .semi()
}

/// Emits the expected error built from the slot and `args`.
///
/// `args` are the argument expressions in declaration order, e.g. `["a"]`
/// or `["a.path", "a.count"]`.
pub fn expected_error<'c>(code: &'c mut FragmentBuilder, args: &[String]) -> &'c mut FragmentBuilder {
    code.let_bind(EXPECTED)
        .composite(runtime::ERROR)
        .keyed(&KeyedArgs {
            key: "id",
            value: &format!("{}.id", SLOT),
        })
        .keyed(&KeyedArgs {
            key: "code",
            value: &format!("{}.code.as_u16()", SLOT),
        })
        .key("message")
        .call(runtime::RENDER)
        .sel_field(&SelArgs {
            val: SLOT,
            sel: "message",
        })
        .list()
        .slice_open();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            code.list();
        }
        code.addr().expr(arg);
    }
    code.bracket_end().param_end().listln().key("args").vec_open();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            code.list();
        }
        code.sel_method(&SelArgs {
            val: arg,
            sel: "to_string",
        })
        .param_end();
    }
    code.bracket_end().listln().composite_end().semi()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(args: &[&str]) -> String {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let mut code = FragmentBuilder::new();
        expected_error(&mut code, &args);
        code.finish().expect("balanced block")
    }

    #[test]
    fn single_argument_block() {
        let text = block(&["a"]);
        assert!(text.contains("let expected = Error {\n"));
        assert!(text.contains("id: em.id,\n"));
        assert!(text.contains("code: em.code.as_u16(),\n"));
        assert!(text.contains("message: render(em.message, &[&a]),\n"));
        assert!(text.contains("args: vec![a.to_string()],\n"));
        assert!(text.ends_with("};\n"));
    }

    #[test]
    fn multiple_argument_block_keeps_order() {
        let text = block(&["a.path", "a.count"]);
        assert!(text.contains("message: render(em.message, &[&a.path, &a.count]),\n"));
        assert!(text.contains("args: vec![a.path.to_string(), a.count.to_string()],\n"));
    }

    #[test]
    fn block_parses_as_statements() {
        let text = format!("fn f() {{\n{}}}", block(&["a.x", "a.y"]));
        assert!(syn::parse_file(&text).is_ok());
    }

    #[test]
    fn invalid_argument_expression_poisons() {
        let mut code = FragmentBuilder::new();
        expected_error(&mut code, &["a.".to_string()]);
        assert_eq!(code.text(), "");
        assert!(code.finish().is_err());
    }

    #[test]
    fn outcome_checks_reference_result() {
        let mut code = FragmentBuilder::new();
        outcome_checks(&mut code, "not_found");
        let text = code.finish().unwrap();
        assert_eq!(
            text,
            "assert!(!err.message.is_empty(), \"not_found returned an empty error\");\nassert_valid_json(&err);\nassert_eq!(err, expected);\n"
        );
    }
}
