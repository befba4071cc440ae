use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{
    ast::{Position, Program, Statement},
    config::InterpreterConfig,
    error::{EvalError, ParseError, VeLaError},
    interpreter::{
        environment::Bindings,
        evaluator::core::{Context, EvalResult},
        lexer::tokenize,
        parser::core::parse_program,
        value::core::Operand,
    },
};

/// An embeddable VeLa interpreter.
///
/// An `Interpreter` owns a scope stack whose base scope holds the builtins,
/// the constants `PI` and `E` and any top-level definitions made by the
/// programs it has run. Hosts typically parse a program once, then for each
/// item push a scope of bindings, evaluate and pop.
///
/// An `Interpreter` is not `Send`: all use must happen on one thread.
///
/// ## Example
/// ```
/// use vela::{Bindings, Interpreter};
///
/// let mut vela = Interpreter::new();
/// vela.push_environment(Bindings::new().with("magnitude", 9.5).with("band", "Vis"));
///
/// assert!(vela.boolean_expression("magnitude < 10 & band = \"Vis\"").unwrap());
///
/// vela.pop_environment().unwrap();
/// ```
pub struct Interpreter {
    context: Context,
    config:  InterpreterConfig,
    cache:   FxHashMap<String, Rc<Program>>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an interpreter with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(InterpreterConfig::default())
    }

    /// Creates an interpreter with a custom configuration.
    #[must_use]
    pub fn with_config(config: InterpreterConfig) -> Self {
        Self { context: Context::with_max_call_depth(config.max_call_depth),
               config,
               cache: FxHashMap::default() }
    }

    /// The configuration this interpreter was created with.
    #[must_use]
    pub const fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Parses source text into a program.
    ///
    /// With caching enabled, a source text is lexed and parsed only once;
    /// later calls with identical text share the same program. The cache is
    /// emptied when it reaches `max_cached_programs`.
    pub fn parse(&mut self, source: &str) -> Result<Rc<Program>, ParseError> {
        if let Some(program) = self.cache.get(source) {
            debug!(len = source.len(), "program cache hit");
            return Ok(Rc::clone(program));
        }

        let program = Rc::new(parse_program(&tokenize(source)?)?);
        debug!(statements = program.statements.len(), "parsed program");

        if self.config.cache_programs && self.config.max_cached_programs > 0 {
            if self.cache.len() >= self.config.max_cached_programs {
                debug!(evicted = self.cache.len(), "program cache full, clearing");
                self.cache.clear();
            }
            self.cache.insert(source.to_string(), Rc::clone(&program));
        }
        Ok(program)
    }

    /// Evaluates an already parsed program in the current environment.
    pub fn evaluate(&mut self, program: &Program) -> EvalResult<Option<Operand>> {
        self.context.eval_program(program)
    }

    /// Parses (or fetches from the cache) and evaluates `source`.
    ///
    /// # Returns
    /// The value of the final statement, or `None` if it yields no value.
    ///
    /// ## Example
    /// ```
    /// use vela::{Interpreter, Operand};
    ///
    /// let mut vela = Interpreter::new();
    ///
    /// assert_eq!(vela.program("(1 + 2) * 3").unwrap(), Some(Operand::Integer(9)));
    /// assert_eq!(vela.program("let x = 1").unwrap(), None);
    /// ```
    pub fn program(&mut self, source: &str) -> Result<Option<Operand>, VeLaError> {
        let program = self.parse(source)?;
        Ok(self.evaluate(&program)?)
    }

    /// Evaluates `source`, which must produce a boolean.
    ///
    /// # Errors
    /// A `TypeMismatch` for any other result and `MissingValue` for none.
    pub fn boolean_expression(&mut self, source: &str) -> Result<bool, VeLaError> {
        let (value, pos) = self.required_value(source)?;
        value.as_bool(pos)
             .map_err(|e| VeLaError::Eval(retarget(e, "boolean", &value)))
    }

    /// Evaluates `source`, which must produce a number. Integers widen.
    ///
    /// ## Example
    /// ```
    /// use vela::Interpreter;
    ///
    /// let mut vela = Interpreter::new();
    ///
    /// assert_eq!(vela.real_expression("7 / 2").unwrap(), 3.0);
    /// assert_eq!(vela.real_expression("7 / 2.0").unwrap(), 3.5);
    /// ```
    pub fn real_expression(&mut self, source: &str) -> Result<f64, VeLaError> {
        let (value, pos) = self.required_value(source)?;
        value.as_real(pos)
             .map_err(|e| VeLaError::Eval(retarget(e, "number", &value)))
    }

    /// Evaluates `source` and returns its value with the position of the
    /// statement that produced it.
    fn required_value(&mut self, source: &str) -> Result<(Operand, Position), VeLaError> {
        let program = self.parse(source)?;
        let pos = program.statements
                         .last()
                         .map(Statement::position)
                         .unwrap_or_default();
        let value = self.evaluate(&program)?
                        .ok_or_else(|| EvalError::missing_value(pos))?;
        Ok((value, pos))
    }

    /// Installs a new innermost scope holding `bindings`.
    pub fn push_environment(&mut self, bindings: Bindings) {
        self.context.environment.push(bindings);
    }

    /// Removes the innermost scope and returns its final bindings.
    ///
    /// # Errors
    /// `Internal` if only the base scope is left.
    pub fn pop_environment(&mut self) -> Result<Bindings, EvalError> {
        self.context.environment.pop()
    }

    /// Binds `name` in the innermost scope.
    ///
    /// # Errors
    /// `ConstantRebinding` if the innermost scope holds a constant `name`.
    pub fn bind(&mut self, name: &str, value: impl Into<Operand>) -> Result<(), EvalError> {
        self.context.environment.bind(name, value.into())
    }

    /// Looks `name` up through every scope, innermost first.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Operand> {
        self.context.environment.lookup(name)
    }

    /// The number of scopes, including the base scope.
    #[must_use]
    pub fn scope_depth(&self) -> usize {
        self.context.environment.depth()
    }

    /// Drops every cached program.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// The number of programs currently cached.
    #[must_use]
    pub fn cached_programs(&self) -> usize {
        self.cache.len()
    }
}

/// Rewords the type mismatch raised when a whole program has the wrong type.
fn retarget(error: EvalError, expected: &str, value: &Operand) -> EvalError {
    EvalError { message: format!("expected a {expected} result, found {}", value.get_type()),
                ..error }
}
