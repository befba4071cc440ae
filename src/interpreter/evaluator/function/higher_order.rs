use crate::{
    ast::Position,
    error::EvalError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{core::Operand, function::Function},
    },
};

/// Splits the `(function, list)` prefix shared by the higher-order builtins.
fn function_and_list(args: &[Operand], pos: Position) -> EvalResult<(Function, Vec<Operand>)> {
    match args {
        [function, items, ..] => {
            Ok((function.as_function(pos)?.clone(), items.as_list(pos)?.to_vec()))
        },
        _ => Err(EvalError::invalid_argument("expected a function and a list", pos)),
    }
}

/// `map(f, list)`: applies `f` to every element.
///
/// # Example
/// ```
/// use vela::Interpreter;
///
/// let mut vela = Interpreter::new();
/// let squares = vela.program("map(fun(x) { x * x }, {1, 2, 3})").unwrap().unwrap();
///
/// assert_eq!(squares.to_string(), "{1, 4, 9}");
/// ```
pub fn map(context: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    let (function, items) = function_and_list(args, pos)?;
    items.into_iter()
         .map(|item| context.call_function_value(&function, &[item], pos))
         .collect::<EvalResult<Vec<_>>>()
         .map(Operand::from)
}

/// `filter(f, list)`: the elements for which `f` returns `true`.
///
/// # Errors
/// `TypeMismatch` if `f` returns anything but a boolean.
pub fn filter(context: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    let (function, items) = function_and_list(args, pos)?;
    let mut kept = Vec::new();
    for item in items {
        if context.call_function_value(&function, std::slice::from_ref(&item), pos)?
                  .as_bool(pos)?
        {
            kept.push(item);
        }
    }
    Ok(Operand::from(kept))
}

/// `reduce(f, list, initial)`: folds the list from the left with
/// `f(accumulator, element)`.
pub fn reduce(context: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    let (function, items) = function_and_list(args, pos)?;
    let initial = args.get(2)
                      .cloned()
                      .ok_or_else(|| EvalError::invalid_argument("reduce needs an initial value", pos))?;
    items.into_iter().try_fold(initial, |accumulator, item| {
                         context.call_function_value(&function, &[accumulator, item], pos)
                     })
}
