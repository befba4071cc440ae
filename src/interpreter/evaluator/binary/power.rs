use crate::{
    ast::{BinaryOperator, Position},
    error::EvalError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Operand,
    },
};

impl Context {
    /// Evaluates `base ^ exponent`.
    ///
    /// Two integers with a non-negative exponent give an overflow checked
    /// integer. A negative integer exponent, or any real operand, computes
    /// the power in floating point with `powf`.
    ///
    /// # Parameters
    /// - `base`: The base value.
    /// - `exponent`: The exponent value.
    /// - `pos`: Position of the operator for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Operand>` containing the result of `base ^ exponent`.
    ///
    /// # Errors
    /// - `Overflow` if an integer power does not fit in an `i64`.
    /// - `TypeMismatch` if either operand is not a number.
    ///
    /// # Example
    /// ```
    /// use vela::{
    ///     ast::Position,
    ///     interpreter::{evaluator::core::Context, value::core::Operand},
    /// };
    ///
    /// let pos = Position::default();
    ///
    /// let result = Context::eval_pow(&Operand::Integer(2), &Operand::Integer(10), pos).unwrap();
    /// assert_eq!(result, Operand::Integer(1024));
    ///
    /// let result = Context::eval_pow(&Operand::Integer(2), &Operand::Integer(-1), pos).unwrap();
    /// assert_eq!(result, Operand::Real(0.5));
    /// ```
    pub fn eval_pow(base: &Operand, exponent: &Operand, pos: Position) -> EvalResult<Operand> {
        match (base, exponent) {
            (Operand::Integer(b), Operand::Integer(e)) if *e >= 0 => {
                integer_pow(*b, *e).map(Operand::Integer)
                                   .ok_or_else(|| EvalError::overflow(pos))
            },
            (b, e) if b.is_numeric() && e.is_numeric() => {
                Ok(Operand::Real(b.as_real(pos)?.powf(e.as_real(pos)?)))
            },
            (b, e) => Err(EvalError::type_mismatch(format!("cannot apply '{}' to {} and {}",
                                                           BinaryOperator::Pow,
                                                           b.get_type(),
                                                           e.get_type()),
                                                   pos)),
        }
    }
}

/// `base ^ exponent` for a non-negative exponent, or `None` on overflow.
fn integer_pow(base: i64, exponent: i64) -> Option<i64> {
    match (base, u32::try_from(exponent)) {
        (_, Ok(e)) => base.checked_pow(e),
        (0 | 1, Err(_)) => Some(base),
        (-1, Err(_)) => Some(if exponent % 2 == 0 { 1 } else { -1 }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::integer_pow;

    #[test]
    fn huge_exponents_of_trivial_bases() {
        assert_eq!(integer_pow(1, i64::MAX), Some(1));
        assert_eq!(integer_pow(0, i64::MAX), Some(0));
        assert_eq!(integer_pow(-1, i64::MAX), Some(-1));
        assert_eq!(integer_pow(-1, i64::MAX - 1), Some(1));
        assert_eq!(integer_pow(2, i64::MAX), None);
        assert_eq!(integer_pow(2, 63), None);
        assert_eq!(integer_pow(-2, 63), Some(i64::MIN));
    }
}
