use std::rc::Rc;

use crate::{
    ast::{LiteralValue, Position},
    error::EvalError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{function::Function, types::Type},
    },
    util::{num::widen, stack::ensure_sufficient_stack},
};

/// Represents a runtime value in the interpreter.
///
/// Every operand carries exactly one payload and its type tag never changes;
/// operations always produce new operands. Strings and lists are reference
/// counted, so cloning an operand is cheap regardless of its size.
#[derive(Debug, Clone)]
pub enum Operand {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A double precision floating-point number.
    Real(f64),
    /// Immutable text.
    String(Rc<str>),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison and logical operators and required by the
    /// conditions of `if` and `while`.
    Boolean(bool),
    /// An ordered list of operands.
    List(Rc<Vec<Self>>),
    /// A builtin or user-defined function.
    Function(Function),
}

impl PartialEq for Operand {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Real(a), Self::Real(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::List(a), Self::List(b)) => ensure_sufficient_stack(|| a == b),
            (Self::Function(a), Self::Function(b)) => a == b,
            _ => false,
        }
    }
}

/// Nested lists are torn down with a worklist, so dropping a list nested a
/// million levels deep does not recurse once per level.
impl Drop for Operand {
    fn drop(&mut self) {
        let Self::List(items) = self else { return };
        let Some(items) = Rc::get_mut(items) else { return };
        if !items.iter().any(|item| matches!(item, Self::List(_))) {
            return;
        }

        let mut pending = std::mem::take(items);
        while let Some(mut item) = pending.pop() {
            if let Self::List(inner) = &mut item
               && let Some(inner) = Rc::get_mut(inner)
            {
                pending.append(inner);
            }
        }
    }
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Operand {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Operand {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Operand {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<String> for Operand {
    fn from(v: String) -> Self {
        Self::String(v.into())
    }
}

impl From<Rc<str>> for Operand {
    fn from(v: Rc<str>) -> Self {
        Self::String(v)
    }
}

impl From<Vec<Self>> for Operand {
    fn from(v: Vec<Self>) -> Self {
        Self::List(Rc::new(v))
    }
}

impl From<Function> for Operand {
    fn from(f: Function) -> Self {
        Self::Function(f)
    }
}

impl From<&LiteralValue> for Operand {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Integer(i) => Self::Integer(*i),
            LiteralValue::Real(r) => Self::Real(*r),
            LiteralValue::String(s) => Self::String(Rc::clone(s)),
            LiteralValue::Boolean(b) => Self::Boolean(*b),
        }
    }
}

impl Operand {
    /// Returns the type tag of this operand.
    ///
    /// ## Example
    /// ```
    /// use vela::interpreter::value::{core::Operand, types::Type};
    ///
    /// assert_eq!(Operand::from(2.5).get_type(), Type::Real);
    /// assert_eq!(Operand::from("V").get_type(), Type::String);
    /// ```
    #[must_use]
    pub const fn get_type(&self) -> Type {
        match self {
            Self::Integer(_) => Type::Integer,
            Self::Real(_) => Type::Real,
            Self::String(_) => Type::String,
            Self::Boolean(_) => Type::Boolean,
            Self::List(_) => Type::List,
            Self::Function(_) => Type::Function,
        }
    }

    /// Renders the operand for display to a user.
    ///
    /// Strings appear without quotes and lists use VeLa's brace syntax. An
    /// integral real keeps a fractional part (`400.0`) unless it is large
    /// enough for exponent notation (`1e300`).
    ///
    /// ## Example
    /// ```
    /// use vela::interpreter::value::core::Operand;
    ///
    /// let list = Operand::from(vec![Operand::from(1), Operand::from(400.0), Operand::from("Vis")]);
    /// assert_eq!(list.to_human_readable_string(), "{1, 400.0, Vis}");
    /// assert_eq!(Operand::from(1e300).to_human_readable_string(), "1e300");
    /// ```
    #[must_use]
    pub fn to_human_readable_string(&self) -> String {
        self.to_string()
    }

    /// Returns `true` for integers and reals.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Real(_))
    }

    /// Converts a numeric operand to `f64`, widening integers.
    ///
    /// # Parameters
    /// - `pos`: Source position for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If the operand is an integer or a real.
    /// - `Err(EvalError)`: A type mismatch otherwise.
    pub fn as_real(&self, pos: Position) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(*r),
            Self::Integer(n) => Ok(widen(*n)),
            _ => Err(self.unexpected(Type::Real, pos)),
        }
    }

    /// Extracts an integer payload.
    pub fn as_integer(&self, pos: Position) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            _ => Err(self.unexpected(Type::Integer, pos)),
        }
    }

    /// Extracts a boolean payload.
    ///
    /// Used for conditions in `if` and `while` and for the logical operators.
    pub fn as_bool(&self, pos: Position) -> EvalResult<bool> {
        match self {
            Self::Boolean(b) => Ok(*b),
            _ => Err(self.unexpected(Type::Boolean, pos)),
        }
    }

    /// Borrows a string payload.
    pub fn as_str(&self, pos: Position) -> EvalResult<&str> {
        match self {
            Self::String(s) => Ok(s),
            _ => Err(self.unexpected(Type::String, pos)),
        }
    }

    /// Borrows a list payload.
    pub fn as_list(&self, pos: Position) -> EvalResult<&Rc<Vec<Self>>> {
        match self {
            Self::List(items) => Ok(items),
            _ => Err(self.unexpected(Type::List, pos)),
        }
    }

    /// Borrows a function payload.
    pub fn as_function(&self, pos: Position) -> EvalResult<&Function> {
        match self {
            Self::Function(f) => Ok(f),
            _ => Err(self.unexpected(Type::Function, pos)),
        }
    }

    /// Compares two operands with VeLa's equality rules.
    ///
    /// Numbers compare by value after widening integers to reals. Strings,
    /// booleans and lists compare within their own category, lists element by
    /// element. Functions are equal only to themselves.
    ///
    /// # Returns
    /// - `Some(bool)`: The comparison result.
    /// - `None`: The operands belong to different categories.
    ///
    /// ## Example
    /// ```
    /// use vela::interpreter::value::core::Operand;
    ///
    /// assert_eq!(Operand::from(2).equals(&Operand::from(2.0)), Some(true));
    /// assert_eq!(Operand::from("a").equals(&Operand::from("b")), Some(false));
    /// assert_eq!(Operand::from(1).equals(&Operand::from("1")), None);
    /// ```
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn equals(&self, other: &Self) -> Option<bool> {
        use Operand::{Boolean, Function, Integer, List, Real, String};

        match (self, other) {
            (Integer(a), Integer(b)) => Some(a == b),
            (Integer(a), Real(b)) => Some(widen(*a) == *b),
            (Real(a), Integer(b)) => Some(*a == widen(*b)),
            (Real(a), Real(b)) => Some(a == b),
            (String(a), String(b)) => Some(a == b),
            (Boolean(a), Boolean(b)) => Some(a == b),
            (List(a), List(b)) => ensure_sufficient_stack(|| {
                Some(a.len() == b.len()
                     && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y) == Some(true)))
            }),
            (Function(a), Function(b)) => Some(a == b),
            _ => None,
        }
    }

    /// Builds the type mismatch raised when `self` is not of type `expected`.
    fn unexpected(&self, expected: Type, pos: Position) -> EvalError {
        EvalError::type_mismatch(format!("expected {expected}, found {}", self.get_type()),
                                 pos)
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => {
                if r.is_finite() && r.fract() == 0.0 {
                    write!(f, "{r:?}")
                } else {
                    write!(f, "{r}")
                }
            },
            Self::String(s) => write!(f, "{s}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::List(items) => ensure_sufficient_stack(|| {
                write!(f, "{{")?;

                for (index, value) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, "}}")
            }),
            Self::Function(func) => write!(f, "{func}"),
        }
    }
}
