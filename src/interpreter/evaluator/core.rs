use std::rc::Rc;

use crate::{
    ast::{Expr, Position, Program, Statement},
    error::{EvalError, EvalErrorKind},
    interpreter::{
        environment::Environment,
        evaluator::{binary::comparison::PatternCache, function::table::base_bindings},
        value::{core::Operand, function::Function},
    },
    util::stack::ensure_sufficient_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Default limit on nested user-defined function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 2048;

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the scope stack, whose base scope
/// holds the builtins, constants and top-level definitions, and the current
/// depth of user-defined function calls.
///
/// ## Usage
///
/// `Context` is created once and reused for evaluating any number of
/// programs. Hosts push a scope of per-item bindings, evaluate, and pop.
pub struct Context {
    /// The scope stack names are resolved through.
    pub environment:    Environment,
    /// User-defined calls currently in progress.
    call_depth:         usize,
    /// Calls nested deeper than this fail with `StackOverflow`.
    pub max_call_depth: usize,
    /// Compiled `=~` patterns.
    pub(crate) patterns: PatternCache,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a new evaluation context whose base scope holds every builtin
    /// and the constants `PI` and `E`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_call_depth(DEFAULT_MAX_CALL_DEPTH)
    }

    /// Creates a context with a custom call depth limit.
    #[must_use]
    pub fn with_max_call_depth(max_call_depth: usize) -> Self {
        Self { environment: Environment::with_base(base_bindings()),
               call_depth: 0,
               max_call_depth,
               patterns: PatternCache::default() }
    }

    /// Evaluates every statement of a program in order.
    ///
    /// # Returns
    /// The value of the final statement, or `None` for an empty program or
    /// one whose final statement yields no value.
    pub fn eval_program(&mut self, program: &Program) -> EvalResult<Option<Operand>> {
        self.eval_statements(&program.statements)
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation.
    /// The evaluator dispatches based on expression variant:
    /// literals, variables, unary and binary operations, function calls,
    /// conditionals, blocks, list literals and function literals.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// `Some(Operand)` for expressions that produce a value, or `None` for
    /// constructs that do not yield one.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Option<Operand>> {
        ensure_sufficient_stack(|| match expr {
            Expr::Literal { value, .. } => Ok(Some(Operand::from(value))),
            Expr::Variable { name, pos } => self.eval_variable(name, *pos).map(Some),
            Expr::UnaryOp { op, expr, pos } => self.eval_unary_op(*op, expr, *pos).map(Some),
            Expr::BinaryOp { left, op, right, pos } => {
                self.eval_binary_op(left, *op, right, *pos).map(Some)
            },
            Expr::FunctionCall { name,
                                 arguments,
                                 pos, } => self.eval_function_call(name, arguments, *pos),
            Expr::Conditional { condition,
                                then_branch,
                                else_branch,
                                .. } => {
                self.eval_conditional(condition, then_branch, else_branch.as_deref())
            },
            Expr::Block { statements, .. } => self.eval_statements(statements),
            Expr::ListLiteral { elements, .. } => {
                let items = elements.iter()
                                    .map(|element| self.eval_value(element))
                                    .collect::<EvalResult<Vec<_>>>()?;
                Ok(Some(Operand::from(items)))
            },
            Expr::Function { def, .. } => {
                Ok(Some(Operand::Function(Function::User(Rc::clone(def)))))
            },
        })
    }

    /// Evaluates an expression that must produce a value.
    ///
    /// # Errors
    /// `MissingValue` if the expression yields none, plus any error raised
    /// while evaluating it.
    pub fn eval_value(&mut self, expr: &Expr) -> EvalResult<Operand> {
        self.eval(expr)?
            .ok_or_else(|| EvalError::missing_value(expr.position()))
    }

    /// Evaluates a single statement.
    ///
    /// Handles `let` and `const` bindings, function definitions, `while`
    /// loops and plain expression statements. Only expression statements
    /// yield a value.
    ///
    /// # Parameters
    /// - `statement`: Statement to evaluate.
    ///
    /// # Returns
    /// `Some(Operand)` for expression statements that yield a result, `None`
    /// otherwise.
    pub fn eval_statement(&mut self, statement: &Statement) -> EvalResult<Option<Operand>> {
        match statement {
            Statement::Expression { expr } => self.eval(expr),
            Statement::Binding { name,
                                 value,
                                 constant,
                                 pos, } => {
                let value = self.eval_value(value)?;
                let bound = if *constant {
                    self.environment.bind_constant(name, value)
                } else {
                    self.environment.bind(name, value)
                };
                bound.map_err(|e| e.at(*pos))?;
                Ok(None)
            },
            Statement::Function(def) => {
                if let Some(name) = &def.name {
                    self.environment
                        .bind(name, Operand::Function(Function::User(Rc::clone(def))))
                        .map_err(|e| e.at(def.pos))?;
                }
                Ok(None)
            },
            Statement::While { condition, body, .. } => {
                while self.eval_value(condition)?.as_bool(condition.position())? {
                    self.eval(body)?;
                }
                Ok(None)
            },
        }
    }

    /// Evaluates statements in sequence; the last one determines the result.
    fn eval_statements(&mut self, statements: &[Statement]) -> EvalResult<Option<Operand>> {
        let mut result = None;
        for statement in statements {
            result = self.eval_statement(statement)?;
        }
        Ok(result)
    }

    /// Resolves a variable through the scope stack.
    fn eval_variable(&self, name: &str, pos: Position) -> EvalResult<Operand> {
        self.environment.lookup(name).cloned().ok_or_else(|| {
                                                  EvalError::new(EvalErrorKind::UnknownVariable,
                                                                 format!("'{name}' is not bound"),
                                                                 pos)
                                              })
    }

    /// Evaluates an `if` expression.
    ///
    /// The condition must be a boolean. A false condition with no `else`
    /// branch yields no value.
    fn eval_conditional(&mut self,
                        condition: &Expr,
                        then_branch: &Expr,
                        else_branch: Option<&Expr>)
                        -> EvalResult<Option<Operand>> {
        if self.eval_value(condition)?.as_bool(condition.position())? {
            self.eval(then_branch)
        } else if let Some(else_branch) = else_branch {
            self.eval(else_branch)
        } else {
            Ok(None)
        }
    }

    /// Records entry into a user-defined function.
    ///
    /// # Errors
    /// `StackOverflow` if the call would exceed `max_call_depth`.
    pub(crate) fn enter_call(&mut self, name: &str, pos: Position) -> EvalResult<()> {
        if self.call_depth >= self.max_call_depth {
            return Err(EvalError::new(EvalErrorKind::StackOverflow,
                                      format!("call to '{name}' exceeds the maximum call depth of {}",
                                              self.max_call_depth),
                                      pos));
        }
        self.call_depth += 1;
        Ok(())
    }

    /// Records exit from a user-defined function.
    pub(crate) const fn leave_call(&mut self) {
        self.call_depth = self.call_depth.saturating_sub(1);
    }

    /// The number of user-defined calls currently in progress.
    #[must_use]
    pub const fn call_depth(&self) -> usize {
        self.call_depth
    }
}
