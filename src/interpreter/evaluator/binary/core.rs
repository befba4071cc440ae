use crate::{
    ast::{BinaryOperator, Expr, Position},
    interpreter::{
        evaluator::{
            binary::comparison::PatternCache,
            core::{Context, EvalResult},
        },
        value::core::Operand,
    },
};

impl Context {
    /// Evaluates a binary operation node.
    ///
    /// `&`, `|` and `=>` evaluate their right operand only when the left one
    /// does not already decide the result. Every other operator evaluates
    /// left then right and hands both values to [`Context::eval_binary`],
    /// except `=~`, which matches through this context's pattern cache.
    ///
    /// # Parameters
    /// - `left`: Left operand expression.
    /// - `op`: The operator.
    /// - `right`: Right operand expression.
    /// - `pos`: Position of the operator for error reporting.
    ///
    /// # Returns
    /// The resulting operand.
    pub(crate) fn eval_binary_op(&mut self,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr,
                                 pos: Position)
                                 -> EvalResult<Operand> {
        if matches!(op,
                    BinaryOperator::And | BinaryOperator::Or | BinaryOperator::Implies)
        {
            return self.eval_logic(op, left, right);
        }

        let left = self.eval_value(left)?;
        let right = self.eval_value(right)?;
        if op == BinaryOperator::Matches {
            return self.patterns.is_match(&left, &right, pos).map(Operand::Boolean);
        }
        Self::eval_binary(op, &left, &right, pos)
    }

    /// Applies a non-logical binary operator to two values.
    ///
    /// Arithmetic operators go to `eval_arithmetic`, `^` to `eval_pow`, and
    /// equality, ordering and `in` to `eval_comparison`. `=~` compiles its
    /// pattern afresh on every call here.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `pos`: Position of the operator for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Operand>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use vela::{
    ///     ast::{BinaryOperator, Position},
    ///     interpreter::{evaluator::core::Context, value::core::Operand},
    /// };
    ///
    /// let left = Operand::Integer(3);
    /// let right = Operand::Real(0.5);
    ///
    /// let result = Context::eval_binary(BinaryOperator::Add, &left, &right, Position::default());
    /// assert_eq!(result.unwrap(), Operand::Real(3.5));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Operand,
                       right: &Operand,
                       pos: Position)
                       -> EvalResult<Operand> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Implies, In, Less, LessEqual, Matches, Mod,
            Mul, NotEqual, Or, Pow, Sub,
        };

        match op {
            Add | Sub | Mul | Div | Mod => Self::eval_arithmetic(op, left, right, pos),
            Pow => Self::eval_pow(left, right, pos),
            Matches => PatternCache::default().is_match(left, right, pos).map(Operand::Boolean),
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual | In => {
                Self::eval_comparison(op, left, right, pos)
            },
            And | Or | Implies => {
                Ok(Operand::Boolean(Self::combine_logic(op, left.as_bool(pos)?, right.as_bool(pos)?)))
            },
        }
    }
}
