use std::{borrow::Cow, cmp::Ordering};

use regex::Regex;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{
    ast::{BinaryOperator, Position},
    error::{EvalError, EvalErrorKind},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Operand,
    },
};

impl Context {
    /// Evaluates a comparison of the form `Operand <Operator> Operand`.
    ///
    /// - `=` and `<>` use [`Operand::equals`]: numbers compare after widening,
    ///   other types compare within their own category.
    /// - `<`, `<=`, `>`, `>=` order numbers numerically and strings
    ///   lexicographically. Any comparison involving NaN is false.
    /// - `x in list` tests membership with `=`; `s in t` on strings tests
    ///   whether `s` is a substring of `t`.
    ///
    /// Operands from incompatible categories are a type mismatch.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    /// - `pos`: Position of the operator for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Operand>` containing a boolean result.
    ///
    /// # Example
    /// ```
    /// use vela::{
    ///     ast::{BinaryOperator, Position},
    ///     interpreter::{evaluator::core::Context, value::core::Operand},
    /// };
    ///
    /// let bands = Operand::from(vec![Operand::from("V"), Operand::from("B")]);
    /// let result = Context::eval_comparison(BinaryOperator::In,
    ///                                       &Operand::from("B"),
    ///                                       &bands,
    ///                                       Position::default());
    ///
    /// assert_eq!(result.unwrap(), Operand::Boolean(true));
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Operand,
                           right: &Operand,
                           pos: Position)
                           -> EvalResult<Operand> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, In, Less, LessEqual, NotEqual};

        let result = match op {
            Equal => equality(op, left, right, pos)?,
            NotEqual => !equality(op, left, right, pos)?,
            In => membership(left, right, pos)?,
            Less => ordering(op, left, right, pos)? == Some(Ordering::Less),
            LessEqual => {
                matches!(ordering(op, left, right, pos)?,
                         Some(Ordering::Less | Ordering::Equal))
            },
            Greater => ordering(op, left, right, pos)? == Some(Ordering::Greater),
            GreaterEqual => {
                matches!(ordering(op, left, right, pos)?,
                         Some(Ordering::Greater | Ordering::Equal))
            },
            _ => {
                return Err(EvalError::new(EvalErrorKind::Internal,
                                          format!("'{op}' is not a comparison operator"),
                                          pos));
            },
        };
        Ok(Operand::Boolean(result))
    }
}

fn mismatch(op: BinaryOperator, left: &Operand, right: &Operand, pos: Position) -> EvalError {
    EvalError::type_mismatch(format!("cannot compare {} and {} with '{op}'",
                                     left.get_type(),
                                     right.get_type()),
                             pos)
}

fn equality(op: BinaryOperator,
            left: &Operand,
            right: &Operand,
            pos: Position)
            -> EvalResult<bool> {
    left.equals(right)
        .ok_or_else(|| mismatch(op, left, right, pos))
}

/// Orders two numbers or two strings. `None` means unordered (NaN).
fn ordering(op: BinaryOperator,
            left: &Operand,
            right: &Operand,
            pos: Position)
            -> EvalResult<Option<Ordering>> {
    match (left, right) {
        (Operand::Integer(a), Operand::Integer(b)) => Ok(Some(a.cmp(b))),
        (Operand::String(a), Operand::String(b)) => Ok(Some(a.cmp(b))),
        (l, r) if l.is_numeric() && r.is_numeric() => {
            Ok(l.as_real(pos)?.partial_cmp(&r.as_real(pos)?))
        },
        (l, r) => Err(mismatch(op, l, r, pos)),
    }
}

fn membership(needle: &Operand, haystack: &Operand, pos: Position) -> EvalResult<bool> {
    match (needle, haystack) {
        (_, Operand::List(items)) => {
            Ok(items.iter().any(|item| needle.equals(item) == Some(true)))
        },
        (Operand::String(s), Operand::String(t)) => Ok(t.contains(&**s)),
        (l, r) => Err(mismatch(BinaryOperator::In, l, r, pos)),
    }
}

/// The number of compiled patterns kept before the cache is emptied.
const MAX_CACHED_PATTERNS: usize = 256;

/// Compiled `=~` patterns, keyed by their source text. Each pattern is
/// compiled once per interpreter.
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: FxHashMap<String, Regex>,
}

impl PatternCache {
    /// Evaluates `text =~ pattern`.
    ///
    /// The pattern must match the whole text, not just a part of it. A
    /// numeric `text` is matched in its human-readable form, so
    /// `12.345 =~ "12\..*"` holds.
    ///
    /// # Errors
    /// - `TypeMismatch` unless `text` is a string or number and `pattern` is
    ///   a string.
    /// - `InvalidArgument` if `pattern` is not a valid regular expression.
    ///
    /// # Example
    /// ```
    /// use vela::{
    ///     ast::Position,
    ///     interpreter::{evaluator::binary::comparison::PatternCache, value::core::Operand},
    /// };
    ///
    /// let mut cache = PatternCache::default();
    /// let pos = Position::default();
    ///
    /// assert!(cache.is_match(&Operand::from("Johnson V"), &Operand::from(".+V"), pos).unwrap());
    /// assert!(!cache.is_match(&Operand::from("Johnson V"), &Operand::from("John"), pos).unwrap());
    /// assert_eq!(cache.len(), 2);
    /// ```
    pub fn is_match(&mut self, text: &Operand, pattern: &Operand, pos: Position) -> EvalResult<bool> {
        let (text, pattern) = match (text, pattern) {
            (Operand::String(t), Operand::String(p)) => (Cow::Borrowed(&**t), p),
            (t, Operand::String(p)) if t.is_numeric() => {
                (Cow::Owned(t.to_human_readable_string()), p)
            },
            (t, p) => return Err(mismatch(BinaryOperator::Matches, t, p, pos)),
        };

        if !self.patterns.contains_key(&**pattern) {
            let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
                            EvalError::invalid_argument(format!("invalid pattern \"{pattern}\": {e}"),
                                                        pos)
                        })?;
            if self.patterns.len() >= MAX_CACHED_PATTERNS {
                debug!(evicted = self.patterns.len(), "pattern cache full, clearing");
                self.patterns.clear();
            }
            self.patterns.insert(pattern.to_string(), regex);
        }
        Ok(self.patterns
               .get(&**pattern)
               .is_some_and(|regex| regex.is_match(&text)))
    }

    /// The number of compiled patterns held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if no pattern has been compiled yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_CACHED_PATTERNS, PatternCache};
    use crate::{ast::Position, interpreter::value::core::Operand};

    #[test]
    fn full_pattern_cache_starts_over() {
        let mut cache = PatternCache::default();
        let text = Operand::from("7");
        for n in 0..MAX_CACHED_PATTERNS {
            let pattern = Operand::from(format!("{n}"));
            assert_eq!(cache.is_match(&text, &pattern, Position::default()).unwrap(), n == 7);
        }
        assert_eq!(cache.len(), MAX_CACHED_PATTERNS);

        assert!(cache.is_match(&text, &Operand::from("[0-9]"), Position::default()).unwrap());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn rejected_patterns_are_not_cached() {
        let mut cache = PatternCache::default();
        let result = cache.is_match(&Operand::from("a"), &Operand::from("("), Position::default());
        assert!(result.is_err());
        assert!(cache.is_empty());
    }
}
