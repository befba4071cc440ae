use crate::{
    ast::{Expr, Position, UnaryOperator},
    error::EvalError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Operand,
    },
};

impl Context {
    /// Evaluates a unary operation.
    ///
    /// # Parameters
    /// - `op`: The unary operator.
    /// - `expr`: The operand expression.
    /// - `pos`: Position of the operator for error reporting.
    ///
    /// # Returns
    /// The resulting operand.
    ///
    /// # Errors
    /// - `TypeMismatch` for `-` on a non-number or `!` on a non-boolean.
    /// - `Overflow` when negating `i64::MIN`.
    pub(crate) fn eval_unary_op(&mut self,
                                op: UnaryOperator,
                                expr: &Expr,
                                pos: Position)
                                -> EvalResult<Operand> {
        let value = self.eval_value(expr)?;

        match op {
            UnaryOperator::Negate => negate(&value, pos),
            UnaryOperator::Not => Ok(Operand::Boolean(!value.as_bool(pos)?)),
        }
    }
}

/// Arithmetic negation with overflow checking for integers.
///
/// ## Example
/// ```
/// use vela::{
///     ast::Position,
///     interpreter::{evaluator::unary::negate, value::core::Operand},
/// };
///
/// let pos = Position::default();
///
/// assert_eq!(negate(&Operand::Integer(5), pos).unwrap(), Operand::Integer(-5));
/// assert!(negate(&Operand::Integer(i64::MIN), pos).is_err());
/// ```
pub fn negate(value: &Operand, pos: Position) -> EvalResult<Operand> {
    match value {
        Operand::Integer(n) => n.checked_neg()
                                .map(Operand::Integer)
                                .ok_or_else(|| EvalError::overflow(pos)),
        Operand::Real(r) => Ok(Operand::Real(-r)),
        other => Err(EvalError::type_mismatch(format!("cannot negate a {}", other.get_type()),
                                              pos)),
    }
}
