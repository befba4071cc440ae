use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{
    error::{EvalError, EvalErrorKind},
    interpreter::{evaluator::core::EvalResult, value::core::Operand},
};

/// A set of named operands supplied by a host for one unit of evaluation.
///
/// Typically one `Bindings` is built per observation, exposing its fields
/// under their VeLa names.
///
/// ## Example
/// ```
/// use vela::interpreter::{environment::Bindings, value::core::Operand};
///
/// let bindings = Bindings::new().with("magnitude", 9.5).with("band", "Vis");
///
/// assert_eq!(bindings.get("magnitude"), Some(&Operand::Real(9.5)));
/// assert_eq!(bindings.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: FxHashMap<String, Operand>,
}

impl Bindings {
    /// Creates an empty binding set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binding, replacing any previous one of the same name.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Operand>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a binding in place, returning the value it replaced.
    pub fn insert(&mut self,
                  name: impl Into<String>,
                  value: impl Into<Operand>)
                  -> Option<Operand> {
        self.values.insert(name.into(), value.into())
    }

    /// Looks up a binding by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Operand> {
        self.values.get(name)
    }

    /// The number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the bindings in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Operand)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<Operand>> FromIterator<(K, V)> for Bindings {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut bindings = Self::new();
        for (name, value) in iter {
            bindings.insert(name, value);
        }
        bindings
    }
}

impl IntoIterator for Bindings {
    type Item = (String, Operand);
    type IntoIter = std::collections::hash_map::IntoIter<String, Operand>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// One entry of a scope.
#[derive(Debug, Clone)]
struct Binding {
    value:    Operand,
    constant: bool,
}

type Scope = FxHashMap<String, Binding>;

/// The chain of lexical scopes a program is evaluated in.
///
/// Scopes are kept in a stack: index 0 is the base scope holding builtins,
/// constants and top-level definitions, and the last element is the innermost
/// scope. Lookup walks from innermost to outermost; binding only ever writes
/// to the innermost scope.
#[derive(Debug, Clone)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment holding only an empty base scope.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes: vec![Scope::default()] }
    }

    /// Creates an environment whose base scope holds `constants`.
    ///
    /// Constants cannot be rebound in the base scope but may be shadowed by
    /// any scope pushed above it.
    #[must_use]
    pub fn with_base(constants: Bindings) -> Self {
        let base = constants.into_iter()
                            .map(|(name, value)| {
                                (name,
                                 Binding { value,
                                           constant: true })
                            })
                            .collect();
        Self { scopes: vec![base] }
    }

    /// Installs a new innermost scope pre-populated with `bindings`.
    pub fn push(&mut self, bindings: Bindings) {
        let scope = bindings.into_iter()
                            .map(|(name, value)| {
                                (name,
                                 Binding { value,
                                           constant: false })
                            })
                            .collect();
        self.scopes.push(scope);
        debug!(depth = self.scopes.len(), "pushed scope");
    }

    /// Discards the innermost scope and returns what it held.
    ///
    /// # Errors
    /// An `Internal` error if only the base scope is left; the base scope is
    /// never popped.
    pub fn pop(&mut self) -> EvalResult<Bindings> {
        if self.scopes.len() <= 1 {
            return Err(EvalError::without_position(EvalErrorKind::Internal,
                                                   "cannot pop the base scope"));
        }
        let scope = self.scopes.pop().unwrap_or_default();
        debug!(depth = self.scopes.len(), "popped scope");
        Ok(scope.into_iter()
                .map(|(name, binding)| (name, binding.value))
                .collect())
    }

    /// Finds the innermost binding for `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Operand> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .map(|binding| &binding.value)
    }

    /// Binds `name` in the innermost scope, overwriting any variable of the
    /// same name there.
    ///
    /// # Errors
    /// `ConstantRebinding` if the innermost scope already holds a constant
    /// of that name. Constants in outer scopes may be shadowed.
    pub fn bind(&mut self, name: &str, value: Operand) -> EvalResult<()> {
        self.insert(name, value, false)
    }

    /// Binds `name` as a constant in the innermost scope.
    ///
    /// # Errors
    /// As for [`Environment::bind`].
    pub fn bind_constant(&mut self, name: &str, value: Operand) -> EvalResult<()> {
        self.insert(name, value, true)
    }

    /// The number of scopes, including the base scope.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    fn insert(&mut self, name: &str, value: Operand, constant: bool) -> EvalResult<()> {
        let Some(scope) = self.scopes.last_mut() else {
            return Err(EvalError::without_position(EvalErrorKind::Internal,
                                                   "environment has no scope"));
        };
        if scope.get(name).is_some_and(|binding| binding.constant) {
            return Err(EvalError::without_position(EvalErrorKind::ConstantRebinding,
                                                   format!("'{name}' is a constant in this scope")));
        }
        scope.insert(name.to_string(), Binding { value, constant });
        Ok(())
    }
}
