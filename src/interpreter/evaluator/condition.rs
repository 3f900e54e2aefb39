use crate::{
    ast::{Condition, RelOp},
    interpreter::evaluator::core::{EvalResult, Evaluator},
    robot::Robot,
};

impl<R: Robot + ?Sized> Evaluator<'_, R> {
    /// Evaluates a condition to a boolean.
    ///
    /// `and` and `or` short-circuit. Conditions only read sensors, so the
    /// evaluation order has no effect on the robot.
    ///
    /// # Errors
    /// Propagates arithmetic failures from the compared expressions.
    ///
    /// # Example
    /// ```
    /// use robolang::{
    ///     ast::{Condition, Expression, RelOp},
    ///     interpreter::evaluator::core::Evaluator,
    ///     robot::ScriptedRobot,
    /// };
    ///
    /// let mut robot = ScriptedRobot::new();
    /// let evaluator = Evaluator::new(&mut robot);
    ///
    /// let one_equals_one = Condition::Relational { op:    RelOp::Eq,
    ///                                              left:  Expression::Number(1),
    ///                                              right: Expression::Number(1), };
    ///
    /// assert!(evaluator.eval_condition(&one_equals_one).unwrap());
    /// assert!(!evaluator.eval_condition(&Condition::Not(Box::new(one_equals_one))).unwrap());
    /// ```
    pub fn eval_condition(&self, condition: &Condition) -> EvalResult<bool> {
        match condition {
            Condition::And(left, right) => {
                Ok(self.eval_condition(left)? && self.eval_condition(right)?)
            },
            Condition::Or(left, right) => {
                Ok(self.eval_condition(left)? || self.eval_condition(right)?)
            },
            Condition::Not(inner) => Ok(!self.eval_condition(inner)?),
            Condition::Relational { op, left, right } => {
                let left = self.eval_expression(left)?;
                let right = self.eval_expression(right)?;
                Ok(Self::compare(*op, left, right))
            },
        }
    }

    /// Applies a relational operator to two integers.
    #[must_use]
    pub const fn compare(op: RelOp, left: i64, right: i64) -> bool {
        match op {
            RelOp::Lt => left < right,
            RelOp::Gt => left > right,
            RelOp::Eq => left == right,
        }
    }
}
