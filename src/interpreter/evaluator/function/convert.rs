use crate::{
    ast::Position,
    error::EvalError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Operand,
    },
    util::num::f64_to_i64_checked,
};

fn single(args: &[Operand], pos: Position) -> EvalResult<&Operand> {
    match args {
        [arg] => Ok(arg),
        _ => Err(EvalError::invalid_argument("expected exactly one argument", pos)),
    }
}

/// `str(x)`: the human-readable form of any operand.
pub fn str(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    Ok(Operand::from(single(args, pos)?.to_human_readable_string()))
}

/// `typeof(x)`: the name of the operand's type, as used in annotations.
pub fn type_of(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    Ok(Operand::from(single(args, pos)?.get_type().name()))
}

/// `integer(x)`: converts a number or a string to an integer.
///
/// Reals are truncated toward zero. Strings are trimmed and parsed as an
/// integer literal, falling back to a real literal that is then truncated.
///
/// # Errors
/// `InvalidArgument` for strings that are not numbers and for values outside
/// the integer range (including NaN and infinities).
///
/// # Example
/// ```
/// use vela::{
///     ast::Position,
///     interpreter::{
///         evaluator::{core::Context, function::convert::integer},
///         value::core::Operand,
///     },
/// };
///
/// let mut context = Context::new();
/// let pos = Position::default();
///
/// assert_eq!(integer(&mut context, &[Operand::from(-2.7)], pos).unwrap(),
///            Operand::Integer(-2));
/// assert_eq!(integer(&mut context, &[Operand::from(" 42 ")], pos).unwrap(),
///            Operand::Integer(42));
/// assert!(integer(&mut context, &[Operand::from("V")], pos).is_err());
/// ```
pub fn integer(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    let arg = single(args, pos)?;
    let real = match arg {
        Operand::Integer(n) => return Ok(Operand::Integer(*n)),
        Operand::String(s) => {
            let text = s.trim();
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Operand::Integer(n));
            }
            parse_real(text, pos)?
        },
        other => other.as_real(pos)?,
    };

    let error = EvalError::invalid_argument(format!("{arg} cannot be converted to an integer"),
                                            pos);
    f64_to_i64_checked(real.trunc(), error).map(Operand::Integer)
}

/// `real(x)`: converts a number or a numeric string to a real.
///
/// # Errors
/// `InvalidArgument` for strings that are not numbers.
pub fn real(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    match single(args, pos)? {
        Operand::String(s) => parse_real(s.trim(), pos).map(Operand::Real),
        other => other.as_real(pos).map(Operand::Real),
    }
}

fn parse_real(text: &str, pos: Position) -> EvalResult<f64> {
    text.parse::<f64>()
        .map_err(|_| EvalError::invalid_argument(format!("\"{text}\" is not a number"), pos))
}
