//! Token-level source fragment builder.
//!
//! [`FragmentBuilder`] accumulates Rust source text one syntactic unit at a
//! time. Emitters take typed arguments (identifiers, types, paths,
//! expressions, literal values) and validate them with `syn` before writing
//! anything, so a fragment can only contain well-formed pieces.
//!
//! ## Poisoning
//!
//! The first failure poisons the builder: an invalid argument, a closing
//! delimiter that does not match the innermost open one, or a close with
//! nothing open. Every emitter called on a poisoned builder is a no-op, and
//! [`FragmentBuilder::text`] returns the empty string. Long chains therefore
//! need a single check at the end, through [`FragmentBuilder::finish`], which
//! also rejects fragments that leave delimiters open.
//!
//! ## Examples
//!
//! ```
//! use errgen_gen::fragment::{FragmentBuilder, FuncArgs, Param, Visibility};
//!
//! let mut code = FragmentBuilder::new();
//! code.doc("Returns the answer.")
//!     .func(&FuncArgs {
//!         vis: Visibility::Public,
//!         name: "answer",
//!         param: Some(Param { name: "scale", ty: "i64" }),
//!         ret: Some("i64"),
//!     })
//!     .expr("42 * scale")
//!     .newline()
//!     .item_end();
//!
//! let text = code.finish().unwrap();
//! assert!(text.starts_with("/// Returns the answer.\npub fn answer(scale: i64) -> i64 {\n"));
//!
//! // An invalid identifier poisons the whole chain.
//! let mut broken = FragmentBuilder::new();
//! broken.ident("not an ident").ident("ignored").semi();
//! assert_eq!(broken.text(), "");
//! assert!(broken.finish().is_err());
//! ```

use std::fmt;

use proc_macro2::Literal;
use thiserror::Error;

/// Reasons a builder becomes poisoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("invalid identifier '{0}'")]
    InvalidIdent(String),

    #[error("invalid type '{0}'")]
    InvalidType(String),

    #[error("invalid path '{0}'")]
    InvalidPath(String),

    #[error("invalid expression '{0}'")]
    InvalidExpr(String),

    #[error("invalid attribute '{0}'")]
    InvalidAttribute(String),

    #[error("invalid lifetime '{0}'")]
    InvalidLifetime(String),

    /// A closing delimiter does not match the innermost open one.
    #[error("expected '{expected}' but found '{found}'")]
    MismatchedClose { expected: char, found: char },

    /// A closing delimiter was emitted with nothing open.
    #[error("unexpected '{0}' with no open delimiter")]
    UnopenedClose(char),

    /// The fragment ended with delimiters still open.
    #[error("unclosed delimiters '{0}'")]
    Unclosed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delim {
    Brace,
    Paren,
    Bracket,
}

impl Delim {
    fn open(self) -> char {
        match self {
            Delim::Brace => '{',
            Delim::Paren => '(',
            Delim::Bracket => '[',
        }
    }

    fn close(self) -> char {
        match self {
            Delim::Brace => '}',
            Delim::Paren => ')',
            Delim::Bracket => ']',
        }
    }
}

/// Item visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

impl Visibility {
    fn prefix(self) -> &'static str {
        match self {
            Visibility::Public => "pub ",
            Visibility::Private => "",
        }
    }
}

/// A single named, typed function parameter.
#[derive(Debug, Clone, Copy)]
pub struct Param<'a> {
    pub name: &'a str,
    pub ty: &'a str,
}

/// Signature of a function taking at most one parameter.
#[derive(Debug, Clone, Copy)]
pub struct FuncArgs<'a> {
    pub vis: Visibility,
    pub name: &'a str,
    pub param: Option<Param<'a>>,
    pub ret: Option<&'a str>,
}

/// Header of a struct declaration.
#[derive(Debug, Clone, Copy)]
pub struct StructArgs<'a> {
    pub vis: Visibility,
    pub name: &'a str,
    /// Lifetime parameter such as `'a`.
    pub lifetime: Option<&'a str>,
}

/// A named struct field.
#[derive(Debug, Clone, Copy)]
pub struct FieldArgs<'a> {
    pub vis: Visibility,
    pub name: &'a str,
    pub ty: &'a str,
}

/// Left-hand side of a const item.
#[derive(Debug, Clone, Copy)]
pub struct ConstArgs<'a> {
    pub vis: Visibility,
    pub name: &'a str,
    pub ty: &'a str,
}

/// A complete `let` statement.
#[derive(Debug, Clone, Copy)]
pub struct LetArgs<'a> {
    pub name: &'a str,
    pub expr: &'a str,
}

/// A `let Some(binding) = expr else {` guard.
#[derive(Debug, Clone, Copy)]
pub struct LetElseArgs<'a> {
    pub binding: &'a str,
    pub expr: &'a str,
}

/// Receiver and member of a selector.
#[derive(Debug, Clone, Copy)]
pub struct SelArgs<'a> {
    pub val: &'a str,
    pub sel: &'a str,
}

/// A `key: value` element of a struct literal.
#[derive(Debug, Clone, Copy)]
pub struct KeyedArgs<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Binary comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    fn as_str(self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        }
    }
}

/// Condition of an `if` statement.
#[derive(Debug, Clone, Copy)]
pub struct IfArgs<'a> {
    pub left: &'a str,
    pub op: CmpOp,
    pub right: &'a str,
}

#[derive(Debug, Clone, Default)]
struct Buffer {
    text: String,
    open: Vec<Delim>,
}

impl Buffer {
    fn push_open(&mut self, delim: Delim) {
        self.open.push(delim);
    }

    fn pop_close(&mut self, delim: Delim) -> Result<(), BuildError> {
        match self.open.pop() {
            Some(top) if top == delim => Ok(()),
            Some(top) => Err(BuildError::MismatchedClose {
                expected: top.close(),
                found: delim.close(),
            }),
            None => Err(BuildError::UnopenedClose(delim.close())),
        }
    }
}

fn check_ident(value: &str) -> Result<&str, BuildError> {
    syn::parse_str::<syn::Ident>(value)
        .map(|_| value)
        .map_err(|_| BuildError::InvalidIdent(value.to_string()))
}

fn check_type(value: &str) -> Result<&str, BuildError> {
    syn::parse_str::<syn::Type>(value)
        .map(|_| value)
        .map_err(|_| BuildError::InvalidType(value.to_string()))
}

fn check_path(value: &str) -> Result<&str, BuildError> {
    syn::parse_str::<syn::Path>(value)
        .map(|_| value)
        .map_err(|_| BuildError::InvalidPath(value.to_string()))
}

fn check_expr(value: &str) -> Result<&str, BuildError> {
    syn::parse_str::<syn::Expr>(value)
        .map(|_| value)
        .map_err(|_| BuildError::InvalidExpr(value.to_string()))
}

fn check_meta(value: &str) -> Result<&str, BuildError> {
    syn::parse_str::<syn::Meta>(value)
        .map(|_| value)
        .map_err(|_| BuildError::InvalidAttribute(value.to_string()))
}

fn check_lifetime(value: &str) -> Result<&str, BuildError> {
    syn::parse_str::<syn::Lifetime>(value)
        .map(|_| value)
        .map_err(|_| BuildError::InvalidLifetime(value.to_string()))
}

/// Chainable, poison-on-first-failure source builder.
#[derive(Debug, Clone)]
pub struct FragmentBuilder {
    state: Result<Buffer, BuildError>,
}

impl Default for FragmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentBuilder {
    pub fn new() -> Self {
        Self {
            state: Ok(Buffer::default()),
        }
    }

    /// Runs `f` against the buffer unless the builder is already poisoned.
    fn emit<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut Buffer) -> Result<(), BuildError>,
    {
        let outcome = match &mut self.state {
            Ok(buf) => f(buf),
            Err(_) => return self,
        };
        if let Err(err) = outcome {
            self.state = Err(err);
        }
        self
    }

    /// Returns true until the first failure.
    pub fn is_valid(&self) -> bool {
        self.state.is_ok()
    }

    /// The failure that poisoned the builder, if any.
    pub fn error(&self) -> Option<&BuildError> {
        self.state.as_ref().err()
    }

    /// Text accumulated so far, or the empty string once poisoned.
    pub fn text(&self) -> &str {
        match &self.state {
            Ok(buf) => &buf.text,
            Err(_) => "",
        }
    }

    /// Consumes the builder, returning its text or the first failure.
    ///
    /// ## Errors
    ///
    /// Returns the error that poisoned the chain, or
    /// `BuildError::Unclosed` if delimiters are still open.
    pub fn finish(self) -> Result<String, BuildError> {
        let buf = self.state?;
        if buf.open.is_empty() {
            Ok(buf.text)
        } else {
            Err(BuildError::Unclosed(
                buf.open.iter().map(|d| d.open()).collect(),
            ))
        }
    }

    // ---------------------------------------------------------------------
    // Comments and attributes
    // ---------------------------------------------------------------------

    /// Doc comment; one `///` line per line of `text`.
    ///
    /// `\n`, `\r\n` and a lone `\r` all end a line, since a bare CR is not
    /// allowed inside a doc comment.
    pub fn doc(&mut self, text: &str) -> &mut Self {
        self.emit(|buf| {
            if text.is_empty() {
                buf.text.push_str("///\n");
            }
            let text = text.replace("\r\n", "\n").replace('\r', "\n");
            for line in text.lines() {
                let line = line.trim_end();
                if line.is_empty() {
                    buf.text.push_str("///\n");
                } else {
                    buf.text.push_str("/// ");
                    buf.text.push_str(line);
                    buf.text.push('\n');
                }
            }
            Ok(())
        })
    }

    /// Outer attribute, e.g. `test` or `derive(Debug)`.
    pub fn attr(&mut self, meta: &str) -> &mut Self {
        self.emit(|buf| {
            let meta = check_meta(meta)?;
            buf.text.push_str(&format!("#[{}]\n", meta));
            Ok(())
        })
    }

    // ---------------------------------------------------------------------
    // Items
    // ---------------------------------------------------------------------

    /// Opens a function with zero or one parameter.
    pub fn func(&mut self, args: &FuncArgs<'_>) -> &mut Self {
        self.emit(|buf| {
            let name = check_ident(args.name)?;
            let param = match args.param {
                Some(p) => format!("{}: {}", check_ident(p.name)?, check_type(p.ty)?),
                None => String::new(),
            };
            let ret = match args.ret {
                Some(ty) => format!(" -> {}", check_type(ty)?),
                None => String::new(),
            };
            buf.text.push_str(&format!(
                "{}fn {}({}){} {{\n",
                args.vis.prefix(),
                name,
                param,
                ret
            ));
            buf.push_open(Delim::Brace);
            Ok(())
        })
    }

    /// Opens a struct declaration.
    pub fn struct_open(&mut self, args: &StructArgs<'_>) -> &mut Self {
        self.emit(|buf| {
            let name = check_ident(args.name)?;
            let generics = match args.lifetime {
                Some(lt) => format!("<{}>", check_lifetime(lt)?),
                None => String::new(),
            };
            buf.text.push_str(&format!(
                "{}struct {}{} {{\n",
                args.vis.prefix(),
                name,
                generics
            ));
            buf.push_open(Delim::Brace);
            Ok(())
        })
    }

    /// Named field inside a struct declaration.
    pub fn field(&mut self, args: &FieldArgs<'_>) -> &mut Self {
        self.emit(|buf| {
            let name = check_ident(args.name)?;
            let ty = check_type(args.ty)?;
            buf.text
                .push_str(&format!("{}{}: {},\n", args.vis.prefix(), name, ty));
            Ok(())
        })
    }

    /// Const item up to and including `=`.
    pub fn const_item(&mut self, args: &ConstArgs<'_>) -> &mut Self {
        self.emit(|buf| {
            let name = check_ident(args.name)?;
            let ty = check_type(args.ty)?;
            buf.text
                .push_str(&format!("{}const {}: {} = ", args.vis.prefix(), name, ty));
            Ok(())
        })
    }

    /// Closes a block.
    pub fn block_end(&mut self) -> &mut Self {
        self.emit(|buf| {
            buf.pop_close(Delim::Brace)?;
            buf.text.push_str("}\n");
            Ok(())
        })
    }

    /// Closes a block that ends a statement, as in `let ... else { ... };`.
    pub fn block_end_semi(&mut self) -> &mut Self {
        self.emit(|buf| {
            buf.pop_close(Delim::Brace)?;
            buf.text.push_str("};\n");
            Ok(())
        })
    }

    /// Closes an item body and leaves a blank line after it.
    pub fn item_end(&mut self) -> &mut Self {
        self.emit(|buf| {
            buf.pop_close(Delim::Brace)?;
            buf.text.push_str("}\n\n");
            Ok(())
        })
    }

    // ---------------------------------------------------------------------
    // Statements
    // ---------------------------------------------------------------------

    /// `let name = expr;`
    pub fn let_expr(&mut self, args: &LetArgs<'_>) -> &mut Self {
        self.emit(|buf| {
            let name = check_ident(args.name)?;
            let expr = check_expr(args.expr)?;
            buf.text.push_str(&format!("let {} = {};\n", name, expr));
            Ok(())
        })
    }

    /// `let name = ` with the value emitted by the following calls.
    pub fn let_bind(&mut self, name: &str) -> &mut Self {
        self.emit(|buf| {
            let name = check_ident(name)?;
            buf.text.push_str(&format!("let {} = ", name));
            Ok(())
        })
    }

    /// Opens `let Some(binding) = expr else {`.
    pub fn let_else_some(&mut self, args: &LetElseArgs<'_>) -> &mut Self {
        self.emit(|buf| {
            let binding = check_ident(args.binding)?;
            let expr = check_expr(args.expr)?;
            buf.text
                .push_str(&format!("let Some({}) = {} else {{\n", binding, expr));
            buf.push_open(Delim::Brace);
            Ok(())
        })
    }

    /// Opens `if left op right {`.
    pub fn if_cmp(&mut self, args: &IfArgs<'_>) -> &mut Self {
        self.emit(|buf| {
            let left = check_expr(args.left)?;
            let right = check_expr(args.right)?;
            buf.text.push_str(&format!(
                "if {} {} {} {{\n",
                left,
                args.op.as_str(),
                right
            ));
            buf.push_open(Delim::Brace);
            Ok(())
        })
    }

    /// `return `
    pub fn ret(&mut self) -> &mut Self {
        self.emit(|buf| {
            buf.text.push_str("return ");
            Ok(())
        })
    }

    /// Statement terminator.
    pub fn semi(&mut self) -> &mut Self {
        self.emit(|buf| {
            buf.text.push_str(";\n");
            Ok(())
        })
    }

    pub fn newline(&mut self) -> &mut Self {
        self.emit(|buf| {
            buf.text.push('\n');
            Ok(())
        })
    }

    // ---------------------------------------------------------------------
    // Expressions
    // ---------------------------------------------------------------------

    /// Opens a call, `path(`.
    pub fn call(&mut self, path: &str) -> &mut Self {
        self.emit(|buf| {
            let path = check_path(path)?;
            buf.text.push_str(path);
            buf.text.push('(');
            buf.push_open(Delim::Paren);
            Ok(())
        })
    }

    /// Opens a macro invocation, `path!(`.
    pub fn macro_call(&mut self, path: &str) -> &mut Self {
        self.emit(|buf| {
            let path = check_path(path)?;
            buf.text.push_str(path);
            buf.text.push_str("!(");
            buf.push_open(Delim::Paren);
            Ok(())
        })
    }

    /// Closes a call or macro invocation.
    pub fn param_end(&mut self) -> &mut Self {
        self.emit(|buf| {
            buf.pop_close(Delim::Paren)?;
            buf.text.push(')');
            Ok(())
        })
    }

    /// Closes a call and ends the line.
    pub fn param_endln(&mut self) -> &mut Self {
        self.param_end().newline()
    }

    /// Field selector, `val.sel`.
    pub fn sel_field(&mut self, args: &SelArgs<'_>) -> &mut Self {
        self.emit(|buf| {
            let val = check_expr(args.val)?;
            let sel = check_ident(args.sel)?;
            buf.text.push_str(&format!("{}.{}", val, sel));
            Ok(())
        })
    }

    /// Opens a method call, `val.sel(`.
    pub fn sel_method(&mut self, args: &SelArgs<'_>) -> &mut Self {
        self.emit(|buf| {
            let val = check_expr(args.val)?;
            let sel = check_ident(args.sel)?;
            buf.text.push_str(&format!("{}.{}(", val, sel));
            buf.push_open(Delim::Paren);
            Ok(())
        })
    }

    pub fn ident(&mut self, name: &str) -> &mut Self {
        self.emit(|buf| {
            buf.text.push_str(check_ident(name)?);
            Ok(())
        })
    }

    pub fn path(&mut self, path: &str) -> &mut Self {
        self.emit(|buf| {
            buf.text.push_str(check_path(path)?);
            Ok(())
        })
    }

    /// A complete expression.
    pub fn expr(&mut self, expr: &str) -> &mut Self {
        self.emit(|buf| {
            buf.text.push_str(check_expr(expr)?);
            Ok(())
        })
    }

    /// Escaped string literal.
    pub fn str_lit(&mut self, value: &str) -> &mut Self {
        self.emit(|buf| {
            buf.text.push_str(&Literal::string(value).to_string());
            Ok(())
        })
    }

    /// Unsuffixed integer literal.
    pub fn int_lit(&mut self, value: u64) -> &mut Self {
        self.emit(|buf| {
            buf.text.push_str(&Literal::u64_unsuffixed(value).to_string());
            Ok(())
        })
    }

    /// Address operator, `&`.
    pub fn addr(&mut self) -> &mut Self {
        self.emit(|buf| {
            buf.text.push('&');
            Ok(())
        })
    }

    /// Opens a struct literal, `Path {`.
    pub fn composite(&mut self, path: &str) -> &mut Self {
        self.emit(|buf| {
            let path = check_path(path)?;
            buf.text.push_str(path);
            buf.text.push_str(" {\n");
            buf.push_open(Delim::Brace);
            Ok(())
        })
    }

    /// Closes a struct literal.
    pub fn composite_end(&mut self) -> &mut Self {
        self.emit(|buf| {
            buf.pop_close(Delim::Brace)?;
            buf.text.push('}');
            Ok(())
        })
    }

    /// `key: value,` inside a struct literal.
    pub fn keyed(&mut self, args: &KeyedArgs<'_>) -> &mut Self {
        self.emit(|buf| {
            let key = check_ident(args.key)?;
            let value = check_expr(args.value)?;
            buf.text.push_str(&format!("{}: {},\n", key, value));
            Ok(())
        })
    }

    /// `key: ` with the value emitted by the following calls.
    pub fn key(&mut self, name: &str) -> &mut Self {
        self.emit(|buf| {
            let key = check_ident(name)?;
            buf.text.push_str(key);
            buf.text.push_str(": ");
            Ok(())
        })
    }

    /// Opens a borrowed array, `&[`.
    pub fn slice_open(&mut self) -> &mut Self {
        self.emit(|buf| {
            buf.text.push_str("&[");
            buf.push_open(Delim::Bracket);
            Ok(())
        })
    }

    /// Opens a `vec![` invocation.
    pub fn vec_open(&mut self) -> &mut Self {
        self.emit(|buf| {
            buf.text.push_str("vec![");
            buf.push_open(Delim::Bracket);
            Ok(())
        })
    }

    pub fn bracket_end(&mut self) -> &mut Self {
        self.emit(|buf| {
            buf.pop_close(Delim::Bracket)?;
            buf.text.push(']');
            Ok(())
        })
    }

    /// List separator.
    pub fn list(&mut self) -> &mut Self {
        self.emit(|buf| {
            buf.text.push_str(", ");
            Ok(())
        })
    }

    /// List separator followed by a line break.
    pub fn listln(&mut self) -> &mut Self {
        self.emit(|buf| {
            buf.text.push_str(",\n");
            Ok(())
        })
    }
}

impl fmt::Display for FragmentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
