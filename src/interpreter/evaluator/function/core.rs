use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::{Expr, FunctionDef, Param, Position},
    error::{EvalError, EvalErrorKind},
    interpreter::{
        environment::Bindings,
        evaluator::core::{Context, EvalResult},
        value::{core::Operand, function::Function, types::Type},
    },
    util::num::widen,
};

impl Context {
    /// Evaluates a function call expression.
    ///
    /// The callee name is resolved through the scope stack, so user-defined
    /// functions, builtins and variables holding function values are all
    /// called the same way. Arguments are evaluated left to right before the
    /// call.
    ///
    /// # Parameters
    /// - `name`: Function name as written at the call site.
    /// - `arguments`: Unevaluated argument expressions.
    /// - `pos`: Position of the call for error reporting.
    ///
    /// # Returns
    /// The function's result, or `None` if a user-defined function body
    /// yields no value.
    ///
    /// # Errors
    /// - `UnknownFunction` if nothing is bound to `name`.
    /// - `TypeMismatch` if `name` is bound to something other than a
    ///   function.
    /// - Anything raised by the arguments or the call itself.
    pub(crate) fn eval_function_call(&mut self,
                                     name: &str,
                                     arguments: &[Expr],
                                     pos: Position)
                                     -> EvalResult<Option<Operand>> {
        let function = match self.environment.lookup(name) {
            Some(Operand::Function(function)) => function.clone(),
            Some(other) => {
                return Err(EvalError::type_mismatch(format!("'{name}' is a {}, not a function",
                                                            other.get_type()),
                                                    pos));
            },
            None => {
                return Err(EvalError::new(EvalErrorKind::UnknownFunction,
                                          format!("no function named '{name}'"),
                                          pos));
            },
        };

        let args = arguments.iter()
                            .map(|argument| self.eval_value(argument))
                            .collect::<EvalResult<Vec<_>>>()?;

        self.call_function(&function, &args, pos)
    }

    /// Calls a function value with already evaluated arguments.
    ///
    /// Builtins are checked against their signatures; user-defined functions
    /// are run in a fresh scope holding their parameters.
    pub fn call_function(&mut self,
                         function: &Function,
                         args: &[Operand],
                         pos: Position)
                         -> EvalResult<Option<Operand>> {
        match function {
            Function::Builtin(builtin) => builtin.call(self, args, pos).map(Some),
            Function::User(def) => self.call_user_function(def, args, pos),
        }
    }

    /// Calls a function value that must produce a result.
    ///
    /// Used by the higher-order builtins.
    ///
    /// # Errors
    /// `MissingValue` if the function yields no value.
    pub fn call_function_value(&mut self,
                               function: &Function,
                               args: &[Operand],
                               pos: Position)
                               -> EvalResult<Operand> {
        self.call_function(function, args, pos)?
            .ok_or_else(|| EvalError::missing_value(pos))
    }

    /// Executes a user-defined function.
    ///
    /// The argument count must equal the parameter count. Each argument is
    /// checked against its parameter's declared type (an integer widens to a
    /// `real` parameter), the parameters are bound in a new innermost scope
    /// and the body is evaluated there. The scope is popped whether or not the
    /// body succeeds.
    ///
    /// # Errors
    /// - `ArityMismatch` for the wrong number of arguments.
    /// - `StackOverflow` when calls nest deeper than `max_call_depth`.
    /// - `TypeMismatch` for an argument or result of the wrong type.
    /// - `MissingValue` when a function with a declared return type yields
    ///   nothing.
    /// - Any error raised by the body, wrapped to name this function.
    fn call_user_function(&mut self,
                          def: &Rc<FunctionDef>,
                          args: &[Operand],
                          pos: Position)
                          -> EvalResult<Option<Operand>> {
        let name = def.name.as_deref().unwrap_or("anonymous function");

        if args.len() != def.arity() {
            return Err(EvalError::new(EvalErrorKind::ArityMismatch,
                                      format!("'{name}' takes {} argument(s) but {} were supplied",
                                              def.arity(),
                                              args.len()),
                                      pos));
        }

        let bindings = def.params
                          .iter()
                          .zip(args)
                          .map(|(param, arg)| {
                              coerce_argument(param, arg, pos).map(|value| (param.name.clone(), value))
                          })
                          .collect::<EvalResult<Bindings>>()?;

        self.enter_call(name, pos)?;
        trace!(function = name, depth = self.call_depth(), "calling user function");

        self.environment.push(bindings);
        let result = self.eval(&def.body);
        let popped = self.environment.pop();
        self.leave_call();
        popped?;

        let result = result.map_err(|e| e.in_function(name, pos))?;

        match (def.return_type, result) {
            (None, result) => Ok(result),
            (Some(_), None) => {
                Err(EvalError::new(EvalErrorKind::MissingValue,
                                   format!("'{name}' declares a return type but produced no value"),
                                   pos))
            },
            (Some(ty), Some(value)) => {
                coerce(ty, value, pos, |found| format!("'{name}' must return {ty}, found {found}"))
                    .map(Some)
            },
        }
    }
}

/// Checks an argument against its parameter's declared type.
fn coerce_argument(param: &Param, arg: &Operand, pos: Position) -> EvalResult<Operand> {
    match param.ty {
        None => Ok(arg.clone()),
        Some(ty) => coerce(ty, arg.clone(), pos, |found| {
                        format!("parameter '{}' expects {ty}, found {found}", param.name)
                    }),
    }
}

/// Converts `value` to the declared type `ty`, widening integers to reals.
fn coerce(ty: Type,
          value: Operand,
          pos: Position,
          message: impl FnOnce(Type) -> String)
          -> EvalResult<Operand> {
    match (ty, value) {
        (Type::Real, Operand::Integer(n)) => Ok(Operand::Real(widen(n))),
        (ty, value) if value.get_type() == ty => Ok(value),
        (_, value) => Err(EvalError::type_mismatch(message(value.get_type()), pos)),
    }
}
