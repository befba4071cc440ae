use crate::{
    ast::Position,
    error::{EvalError, EvalErrorKind},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Operand,
    },
    util::num::{i64_to_index, usize_to_i64_checked},
};

/// `length(s)` or `length(list)`.
///
/// Strings are measured in characters, not bytes.
pub fn length(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    let n = match args {
        [Operand::String(s)] => s.chars().count(),
        [Operand::List(items)] => items.len(),
        _ => return Err(EvalError::invalid_argument("length takes a string or a list", pos)),
    };
    usize_to_i64_checked(n, EvalError::overflow(pos)).map(Operand::Integer)
}

/// `substring(s, start, end)`: the characters of `s` in `[start, end)`.
///
/// # Errors
/// `IndexOutOfBounds` unless `0 <= start <= end <= length(s)`.
///
/// # Example
/// ```
/// use vela::{
///     ast::Position,
///     interpreter::{
///         evaluator::{core::Context, function::string::substring},
///         value::core::Operand,
///     },
/// };
///
/// let args = [Operand::from("Johnson V"), Operand::from(8), Operand::from(9)];
/// let band = substring(&mut Context::new(), &args, Position::default()).unwrap();
///
/// assert_eq!(band, Operand::from("V"));
/// ```
pub fn substring(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    let [text, start, end] = args else {
        return Err(EvalError::invalid_argument("substring takes a string and two indices", pos));
    };
    let text = text.as_str(pos)?;
    let (start, end) = (start.as_integer(pos)?, end.as_integer(pos)?);
    let count = text.chars().count();

    let range = i64_to_index(start).zip(i64_to_index(end))
                                   .filter(|(s, e)| s <= e && *e <= count);
    let Some((first, last)) = range else {
        return Err(EvalError::new(EvalErrorKind::IndexOutOfBounds,
                                  format!("substring({start}, {end}) of a string of length {count}"),
                                  pos));
    };

    Ok(Operand::from(text.chars()
                         .skip(first)
                         .take(last - first)
                         .collect::<String>()))
}

/// `concat(s, ...)` joins strings; `concat(list, ...)` joins lists.
pub fn concat(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
    match args.first() {
        Some(Operand::List(_)) => {
            let mut joined = Vec::new();
            for arg in args {
                joined.extend(arg.as_list(pos)?.iter().cloned());
            }
            Ok(Operand::from(joined))
        },
        _ => {
            let mut joined = String::new();
            for arg in args {
                joined.push_str(arg.as_str(pos)?);
            }
            Ok(Operand::from(joined))
        },
    }
}

/// Defines builtins that test a relation between two strings.
macro_rules! string_predicate {
    ($($fname:ident => $method:ident),* $(,)?) => {
        $(
            #[doc = concat!("`", stringify!($fname), "(s, t)` via `str::", stringify!($method), "`.")]
            pub fn $fname(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
                let [s, t] = args else {
                    return Err(EvalError::invalid_argument("expected two strings", pos));
                };
                Ok(Operand::Boolean(s.as_str(pos)?.$method(t.as_str(pos)?)))
            }
        )*
    };
}

string_predicate! {
    contains => contains,
    starts_with => starts_with,
    ends_with => ends_with,
}

/// Defines builtins that map one string to another.
macro_rules! string_transform {
    ($($fname:ident => $method:ident),* $(,)?) => {
        $(
            #[doc = concat!("`", stringify!($fname), "(s)` via `str::", stringify!($method), "`.")]
            pub fn $fname(_: &mut Context, args: &[Operand], pos: Position) -> EvalResult<Operand> {
                let [s] = args else {
                    return Err(EvalError::invalid_argument("expected one string", pos));
                };
                Ok(Operand::from(s.as_str(pos)?.$method()))
            }
        )*
    };
}

string_transform! {
    to_upper => to_uppercase,
    to_lower => to_lowercase,
    trim => trim,
}
