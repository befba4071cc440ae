use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Operand,
    },
};

impl Context {
    /// Evaluates a logical operation with short-circuiting.
    ///
    /// - `false & x` is `false` without evaluating `x`.
    /// - `true | x` is `true` without evaluating `x`.
    /// - `false => x` is `true` without evaluating `x`; otherwise `p => q` is
    ///   `!p | q`.
    ///
    /// Both operands must be booleans.
    ///
    /// # Parameters
    /// - `op`: `And`, `Or` or `Implies`.
    /// - `left`: Left operand expression.
    /// - `right`: Right operand expression, evaluated only when needed.
    ///
    /// # Returns
    /// An `EvalResult<Operand>` containing a boolean.
    pub(crate) fn eval_logic(&mut self,
                             op: BinaryOperator,
                             left: &Expr,
                             right: &Expr)
                             -> EvalResult<Operand> {
        let lhs = self.eval_value(left)?.as_bool(left.position())?;

        let decided = match op {
            BinaryOperator::And => (!lhs).then_some(false),
            BinaryOperator::Or => lhs.then_some(true),
            _ => (!lhs).then_some(true),
        };
        if let Some(result) = decided {
            return Ok(Operand::Boolean(result));
        }

        let rhs = self.eval_value(right)?.as_bool(right.position())?;
        Ok(Operand::Boolean(Self::combine_logic(op, lhs, rhs)))
    }

    /// Combines two already evaluated booleans.
    ///
    /// # Example
    /// ```
    /// use vela::{ast::BinaryOperator, interpreter::evaluator::core::Context};
    ///
    /// assert!(Context::combine_logic(BinaryOperator::Implies, false, false));
    /// assert!(!Context::combine_logic(BinaryOperator::Implies, true, false));
    /// ```
    #[must_use]
    pub const fn combine_logic(op: BinaryOperator, lhs: bool, rhs: bool) -> bool {
        match op {
            BinaryOperator::And => lhs && rhs,
            BinaryOperator::Or => lhs || rhs,
            _ => !lhs || rhs,
        }
    }
}
