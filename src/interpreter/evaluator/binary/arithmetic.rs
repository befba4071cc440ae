use crate::{
    ast::{BinaryOperator, Position},
    error::{EvalError, EvalErrorKind},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Operand,
    },
};

impl Context {
    /// Evaluates `+`, `-`, `*`, `/` and `%`.
    ///
    /// - Two integers use checked integer arithmetic; `/` truncates toward
    ///   zero and both `/` and `%` by zero fail with `DivisionByZero`.
    /// - An integer mixed with a real widens to real; real arithmetic follows
    ///   IEEE-754, so dividing by zero yields an infinity or NaN.
    /// - `+` on two strings concatenates them.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `pos`: Position of the operator for error reporting.
    ///
    /// # Returns
    /// The computed operand.
    ///
    /// # Example
    /// ```
    /// use vela::{
    ///     ast::{BinaryOperator, Position},
    ///     interpreter::{evaluator::core::Context, value::core::Operand},
    /// };
    ///
    /// let pos = Position::default();
    /// let seven = Context::eval_arithmetic(BinaryOperator::Div,
    ///                                      &Operand::Integer(15),
    ///                                      &Operand::Integer(2),
    ///                                      pos).unwrap();
    /// assert_eq!(seven, Operand::Integer(7));
    ///
    /// let joined = Context::eval_arithmetic(BinaryOperator::Add,
    ///                                       &Operand::from("R "),
    ///                                       &Operand::from("Car"),
    ///                                       pos).unwrap();
    /// assert_eq!(joined, Operand::from("R Car"));
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: &Operand,
                           right: &Operand,
                           pos: Position)
                           -> EvalResult<Operand> {
        match (left, right) {
            (Operand::Integer(a), Operand::Integer(b)) => {
                integer_arithmetic(op, *a, *b, pos).map(Operand::Integer)
            },
            (Operand::String(a), Operand::String(b)) if op == BinaryOperator::Add => {
                let mut joined = String::with_capacity(a.len() + b.len());
                joined.push_str(a);
                joined.push_str(b);
                Ok(Operand::from(joined))
            },
            (l, r) if l.is_numeric() && r.is_numeric() => {
                real_arithmetic(op, l.as_real(pos)?, r.as_real(pos)?, pos).map(Operand::Real)
            },
            (l, r) => Err(EvalError::type_mismatch(format!("cannot apply '{op}' to {} and {}",
                                                           l.get_type(),
                                                           r.get_type()),
                                                   pos)),
        }
    }
}

/// Integer arithmetic with overflow and division-by-zero checks.
fn integer_arithmetic(op: BinaryOperator, a: i64, b: i64, pos: Position) -> EvalResult<i64> {
    if matches!(op, BinaryOperator::Div | BinaryOperator::Mod) && b == 0 {
        return Err(EvalError::new(EvalErrorKind::DivisionByZero,
                                  format!("{a} {op} 0"),
                                  pos));
    }

    let result = match op {
        BinaryOperator::Add => a.checked_add(b),
        BinaryOperator::Sub => a.checked_sub(b),
        BinaryOperator::Mul => a.checked_mul(b),
        BinaryOperator::Div => a.checked_div(b),
        BinaryOperator::Mod => a.checked_rem(b),
        _ => return Err(not_arithmetic(op, pos)),
    };
    result.ok_or_else(|| EvalError::overflow(pos))
}

/// Real arithmetic with IEEE-754 semantics.
fn real_arithmetic(op: BinaryOperator, a: f64, b: f64, pos: Position) -> EvalResult<f64> {
    match op {
        BinaryOperator::Add => Ok(a + b),
        BinaryOperator::Sub => Ok(a - b),
        BinaryOperator::Mul => Ok(a * b),
        BinaryOperator::Div => Ok(a / b),
        BinaryOperator::Mod => Ok(a % b),
        _ => Err(not_arithmetic(op, pos)),
    }
}

fn not_arithmetic(op: BinaryOperator, pos: Position) -> EvalError {
    EvalError::new(EvalErrorKind::Internal,
                   format!("'{op}' is not an arithmetic operator"),
                   pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_arithmetic_operators_are_rejected() {
        let pos = Position::default();

        for (left, right) in [(Operand::Real(7.0), Operand::Real(2.0)),
                              (Operand::Integer(7), Operand::Real(2.0)),
                              (Operand::Integer(7), Operand::Integer(2))]
        {
            let err = Context::eval_arithmetic(BinaryOperator::Less, &left, &right, pos).unwrap_err();
            assert_eq!(err.kind, EvalErrorKind::Internal, "{left} < {right}");
        }

        let rem = Context::eval_arithmetic(BinaryOperator::Mod,
                                           &Operand::Real(7.5),
                                           &Operand::Integer(2),
                                           pos).unwrap();
        assert_eq!(rem, Operand::Real(1.5));
    }
}
