use std::rc::Rc;

use crate::{ast::FunctionDef, interpreter::evaluator::function::table::Builtin};

/// A callable value.
///
/// Builtins are a closed set identified by [`Builtin`]; user-defined functions
/// share their parsed definition with the program that declared them.
#[derive(Debug, Clone)]
pub enum Function {
    /// A function implemented natively.
    Builtin(Builtin),
    /// A function declared in VeLa source, named or anonymous.
    User(Rc<FunctionDef>),
}

impl Function {
    /// The name the function was declared with, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Builtin(b) => Some(b.name()),
            Self::User(def) => def.name.as_deref(),
        }
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Builtin(a), Self::Builtin(b)) => a == b,
            (Self::User(a), Self::User(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin(b) => write!(f, "<builtin {}>", b.name()),
            Self::User(def) => match &def.name {
                Some(name) => write!(f, "<function {name}>"),
                None => write!(f, "<function>"),
            },
        }
    }
}
