use std::rc::Rc;

use crate::{
    ast::Position,
    error::EvalError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Operand,
    },
    util::num::{f64_to_i64_checked, i64_to_index},
};

/// Upper bound on the number of elements `seq` may produce.
const MAX_SEQ_LEN: u32 = 10_000_000;

fn empty() -> Operand {
    Operand::from(Vec::<Operand>::new())
}

fn list_arg(args: &[Operand], pos: Position) -> EvalResult<&Rc<Vec<Operand>>> {
    args.first()
        .ok_or_else(|| EvalError::invalid_argument("expected a list", pos))?
        .as_list(pos)
}

/// `list(x, ...)`: a list of the arguments.
pub fn list(_: &mut Context, args: &[Operand], _: Position) -> EvalResult<Operand> {
    Ok(Operand::from(args.to_vec()))
}

/// `nth(list, i)`: the element at zero-based index `i`, or `{}` if there is
/// none.
pub fn nth(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    let [items, index] = args else {
        return Err(EvalError::invalid_argument("nth takes a list and an index", pos));
    };
    let items = items.as_list(pos)?;
    Ok(i64_to_index(index.as_integer(pos)?).and_then(|i| items.get(i))
                                           .cloned()
                                           .unwrap_or_else(empty))
}

/// `head(list)`: the first element, or `{}` for an empty list.
pub fn head(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    Ok(list_arg(args, pos)?.first().cloned().unwrap_or_else(empty))
}

/// `tail(list)`: every element but the first; `{}` for an empty list.
pub fn tail(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    let items = list_arg(args, pos)?;
    Ok(Operand::from(items.get(1..).map(<[Operand]>::to_vec).unwrap_or_default()))
}

/// `append(list, x)`: a new list with `x` added at the end.
pub fn append(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    let [items, item] = args else {
        return Err(EvalError::invalid_argument("append takes a list and an element", pos));
    };
    let mut appended = items.as_list(pos)?.as_ref().clone();
    appended.push(item.clone());
    Ok(Operand::from(appended))
}

/// `seq(start, end, step)`: the inclusive sequence `start, start + step, ...`
/// up to `end`.
///
/// The elements are integers when all three arguments are integers and reals
/// otherwise. A sequence whose step points away from `end` is empty.
///
/// # Errors
/// `InvalidArgument` for a zero or non-finite step, and for sequences with
/// more than ten million elements.
///
/// # Example
/// ```
/// use vela::{
///     ast::Position,
///     interpreter::{
///         evaluator::{core::Context, function::list::seq},
///         value::core::Operand,
///     },
/// };
///
/// let args = [Operand::from(10), Operand::from(1), Operand::from(-4)];
/// let countdown = seq(&mut Context::new(), &args, Position::default()).unwrap();
///
/// assert_eq!(countdown.to_string(), "{10, 6, 2}");
/// ```
pub fn seq(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    let [start, end, step] = args else {
        return Err(EvalError::invalid_argument("seq takes a start, an end and a step", pos));
    };

    if let (Operand::Integer(start), Operand::Integer(end), Operand::Integer(step)) =
        (start, end, step)
    {
        return integer_seq(*start, *end, *step, pos);
    }
    real_seq(start.as_real(pos)?, end.as_real(pos)?, step.as_real(pos)?, pos)
}

fn too_long(pos: Position) -> EvalError {
    EvalError::invalid_argument(format!("seq would produce more than {MAX_SEQ_LEN} elements"),
                                pos)
}

fn integer_seq(start: i64, end: i64, step: i64, pos: Position) -> EvalResult<Operand> {
    if step == 0 {
        return Err(EvalError::invalid_argument("seq step must not be zero", pos));
    }

    let span = i128::from(end) - i128::from(start);
    let count = if span == 0 || (span > 0) == (step > 0) {
        span / i128::from(step) + 1
    } else {
        0
    };
    let count = usize::try_from(count).ok()
                                      .filter(|n| *n <= MAX_SEQ_LEN as usize)
                                      .ok_or_else(|| too_long(pos))?;

    let mut items = Vec::with_capacity(count);
    let mut current = start;
    for _ in 0..count {
        items.push(Operand::Integer(current));
        current = current.saturating_add(step);
    }
    Ok(Operand::from(items))
}

fn real_seq(start: f64, end: f64, step: f64, pos: Position) -> EvalResult<Operand> {
    if step == 0.0 || !step.is_finite() {
        return Err(EvalError::invalid_argument(format!("seq step must be finite and non-zero, found {step}"),
                                               pos));
    }

    let estimate = ((end - start) / step).floor();
    if estimate < 0.0 {
        return Ok(empty());
    }
    // A step below the precision of `start` never moves the value, so the
    // count is fixed up front.
    let count = f64_to_i64_checked(estimate, ()).ok()
                                                .and_then(|n| u32::try_from(n).ok())
                                                .filter(|n| *n < MAX_SEQ_LEN)
                                                .ok_or_else(|| too_long(pos))?
                + 1;

    let items: Vec<Operand> =
        (0..count).map(|i| start + step * f64::from(i))
                  .take_while(|value| if step > 0.0 { *value <= end } else { *value >= end })
                  .map(Operand::Real)
                  .collect();
    Ok(Operand::from(items))
}
