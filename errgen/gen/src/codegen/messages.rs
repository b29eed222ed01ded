//! Message slot constant generation.
//!
//! Each entry becomes one const item holding its slot id, status code and
//! message template:
//!
//! ```ignore
//! pub const ERRMSG_NOT_EXISTENT: ErrMsg = ErrMsg {
//!     id: 1,
//!     code: StatusCode::NOT_FOUND,
//!     message: "file {} does not exist",
//! };
//! ```

use errgen_define::{ErrorSpec, MessageSlot};

use super::{finish, runtime};
use crate::errors::GeneratorError;
use crate::fragment::{ConstArgs, FragmentBuilder, Visibility};
use crate::naming::{function_name, message_const};

/// Generates the message constant for `spec` at `slot`.
///
/// ## Errors
///
/// Returns `GeneratorError::Build` if the name or code symbol is not valid
/// Rust.
pub fn generate_message(spec: &ErrorSpec, slot: MessageSlot) -> Result<String, GeneratorError> {
    let mut code = FragmentBuilder::new();
    code.doc(&format!(
        "Message slot {} of `{}`.",
        slot,
        function_name(&spec.name)
    ))
    .const_item(&ConstArgs {
        vis: Visibility::Public,
        name: &message_const(&spec.name),
        ty: runtime::ERR_MSG,
    })
    .composite(runtime::ERR_MSG)
    .key("id")
    .int_lit(u64::from(slot.id()))
    .listln()
    .key("code")
    .path(&spec.code)
    .listln()
    .key("message")
    .str_lit(&spec.message)
    .listln()
    .composite_end()
    .semi()
    .newline();

    finish(code, "message constant", spec)
}
