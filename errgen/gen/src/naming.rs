//! Names of generated items.
//!
//! Catalog entries are named in PascalCase. Each entry produces a message
//! constant, a constructor, optionally an argument holder, and one or two
//! tests; this module derives all of those names from the entry name.

/// Prefix of message slot constants.
const MESSAGE_PREFIX: &str = "ERRMSG_";

/// Suffix of argument holder structs.
const ARGS_SUFFIX: &str = "Args";

/// Converts a PascalCase string to snake_case.
///
/// Runs of capitals are treated as one word, so acronyms stay together.
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if boundary {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Converts a PascalCase string to SCREAMING_SNAKE_CASE.
pub fn to_shouty_snake_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}

/// Constructor function name, e.g. `NotExistent` -> `not_existent`.
pub fn function_name(error: &str) -> String {
    to_snake_case(error)
}

/// Message constant name, e.g. `NotExistent` -> `ERRMSG_NOT_EXISTENT`.
pub fn message_const(error: &str) -> String {
    format!("{}{}", MESSAGE_PREFIX, to_shouty_snake_case(error))
}

/// Argument holder name, e.g. `NotEqual` -> `NotEqualArgs`.
pub fn args_struct(error: &str) -> String {
    format!("{}{}", error, ARGS_SUFFIX)
}

/// Success test name, e.g. `NotExistent` -> `test_not_existent`.
pub fn test_name(error: &str) -> String {
    format!("test_{}", to_snake_case(error))
}

/// Nil-holder test name, e.g. `NotEqual` -> `test_not_equal_nil`.
pub fn nil_test_name(error: &str) -> String {
    format!("test_{}_nil", to_snake_case(error))
}
