use std::cmp::Ordering;

use crate::{
    ast::Position,
    error::EvalError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Operand,
    },
    util::num::f64_to_i64_checked,
};

/// Applies a real-valued function to one numeric argument.
///
/// The generated functions widen integers to reals before applying the
/// corresponding `f64` method, and always return a real.
///
/// # Example
/// ```
/// use vela::{
///     ast::Position,
///     interpreter::{
///         evaluator::{core::Context, function::math::sqrt},
///         value::core::Operand,
///     },
/// };
///
/// let mut context = Context::new();
/// let r = sqrt(&mut context, &[Operand::Integer(16)], Position::default()).unwrap();
///
/// assert_eq!(r, Operand::Real(4.0));
/// ```
macro_rules! real_builtin {
    ($($fname:ident => $real_fn:ident),* $(,)?) => {
        $(
            #[doc = concat!("`", stringify!($fname), "(x)` as a real.")]
            pub fn $fname(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
                Ok(Operand::Real(first(args, pos)?.as_real(pos)?.$real_fn()))
            }
        )*
    };
}

real_builtin! {
    sqrt => sqrt,
    sin => sin,
    cos => cos,
    tan => tan,
    exp => exp,
    ln => ln,
    log10 => log10,
}

/// Returns the first argument, which the signature check guarantees exists.
fn first(args: &[Operand], pos: Position) -> EvalResult<&Operand> {
    args.first()
        .ok_or_else(|| EvalError::invalid_argument("missing argument", pos))
}

/// `abs(x)`: the absolute value, keeping the argument's type.
///
/// # Errors
/// `Overflow` for `abs` of the smallest integer.
pub fn abs(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    match first(args, pos)? {
        Operand::Integer(n) => n.checked_abs()
                                .map(Operand::Integer)
                                .ok_or_else(|| EvalError::overflow(pos)),
        other => Ok(Operand::Real(other.as_real(pos)?.abs())),
    }
}

/// `round(x)`: rounds half away from zero and returns an integer.
///
/// # Errors
/// `InvalidArgument` if the rounded value is NaN, infinite or outside the
/// integer range.
pub fn round(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    match first(args, pos)? {
        Operand::Integer(n) => Ok(Operand::Integer(*n)),
        other => {
            let r = other.as_real(pos)?;
            let error = EvalError::invalid_argument(format!("{r} cannot be rounded to an integer"),
                                                    pos);
            Ok(Operand::Integer(f64_to_i64_checked(r.round(), error)?))
        },
    }
}

/// `floor(x)`: integers are returned unchanged, reals are floored.
pub fn floor(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    unary_round(args, pos, f64::floor)
}

/// `ceil(x)`: integers are returned unchanged, reals are ceiled.
pub fn ceil(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    unary_round(args, pos, f64::ceil)
}

fn unary_round(args: &[Operand], pos: Position, op: fn(f64) -> f64) -> EvalResult<Operand> {
    match first(args, pos)? {
        Operand::Integer(n) => Ok(Operand::Integer(*n)),
        other => Ok(Operand::Real(op(other.as_real(pos)?))),
    }
}

/// `pow(x, y)`: `x` raised to the power `y`, as a real.
pub fn pow(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    let [base, exponent] = args else {
        return Err(EvalError::invalid_argument("pow takes a base and an exponent", pos));
    };
    Ok(Operand::Real(base.as_real(pos)?.powf(exponent.as_real(pos)?)))
}

/// `min(a, b)` or `min(list)`.
pub fn min(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    extremum(args, pos, "min", Ordering::Less)
}

/// `max(a, b)` or `max(list)`.
pub fn max(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    extremum(args, pos, "max", Ordering::Greater)
}

/// Shared implementation of `min` and `max`.
///
/// The result is an integer when every candidate is an integer and a real
/// otherwise. A list argument must be non-empty and purely numeric.
fn extremum(args: &[Operand],
            pos: Position,
            name: &str,
            prefer: Ordering)
            -> EvalResult<Operand> {
    let candidates: &[Operand] = match args {
        [Operand::List(items)] => items,
        _ => args,
    };

    if candidates.is_empty() {
        return Err(EvalError::invalid_argument(format!("{name} of an empty list"), pos));
    }
    if let Some(bad) = candidates.iter().find(|c| !c.is_numeric()) {
        return Err(EvalError::type_mismatch(format!("{name} expects numbers, found {}",
                                                    bad.get_type()),
                                            pos));
    }

    if candidates.iter().all(|c| matches!(c, Operand::Integer(_))) {
        let mut best = candidates[0].as_integer(pos)?;
        for candidate in &candidates[1..] {
            let n = candidate.as_integer(pos)?;
            if n.cmp(&best) == prefer {
                best = n;
            }
        }
        return Ok(Operand::Integer(best));
    }

    let mut best = candidates[0].as_real(pos)?;
    for candidate in &candidates[1..] {
        let r = candidate.as_real(pos)?;
        if r.partial_cmp(&best) == Some(prefer) {
            best = r;
        }
    }
    Ok(Operand::Real(best))
}
