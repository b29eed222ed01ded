//! Parameter-count classification.
//!
//! Generated code takes one of three shapes depending on how many parameters
//! an error declares. [`Arity`] is the tag the generator dispatches on.

use strum::{Display, IntoStaticStr};

use crate::schema::ParamSpec;

/// Shape of an error constructor, derived from its parameter list.
///
/// ## Examples
///
/// ```
/// use errgen_define::{Arity, ParamSpec};
///
/// let params = vec![ParamSpec {
///     name: "path".to_string(),
///     comment: "path".to_string(),
///     ty: "&str".to_string(),
/// }];
///
/// assert!(matches!(Arity::of(&params), Arity::OneParam(p) if p.name == "path"));
/// assert!(matches!(Arity::of(&[]), Arity::NoParam));
/// assert_eq!(Arity::of(&params).to_string(), "one-param");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Arity<'a> {
    /// No parameters. Never valid in a catalog.
    NoParam,
    /// Exactly one parameter, passed directly to the constructor.
    OneParam(&'a ParamSpec),
    /// Two or more parameters, passed through an argument holder struct.
    ManyParams(&'a [ParamSpec]),
}

impl<'a> Arity<'a> {
    /// Classifies a parameter list.
    pub fn of(params: &'a [ParamSpec]) -> Self {
        match params {
            [] => Arity::NoParam,
            [single] => Arity::OneParam(single),
            many => Arity::ManyParams(many),
        }
    }

    /// Number of parameters the shape carries.
    pub fn len(&self) -> usize {
        match self {
            Arity::NoParam => 0,
            Arity::OneParam(_) => 1,
            Arity::ManyParams(params) => params.len(),
        }
    }

    /// Returns true for [`Arity::NoParam`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Arity::NoParam)
    }
}
