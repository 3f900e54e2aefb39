use crate::{
    ast::{ArithOp, Expression, Sensor},
    error::RuntimeError,
    interpreter::evaluator::core::{EvalResult, Evaluator},
    robot::Robot,
};

impl<R: Robot + ?Sized> Evaluator<'_, R> {
    /// Evaluates an expression to an integer.
    ///
    /// Literals evaluate to themselves, sensors are read from the robot, and
    /// operators evaluate both operands before applying checked arithmetic.
    ///
    /// # Errors
    /// Returns `DivisionByZero` or `Overflow` from arithmetic.
    pub fn eval_expression(&self, expr: &Expression) -> EvalResult<i64> {
        match expr {
            Expression::Number(value) => Ok(*value),
            Expression::Sensor(sensor) => Ok(self.read_sensor(*sensor)),
            Expression::BinaryOp { op, left, right } => {
                let left = self.eval_expression(left)?;
                let right = self.eval_expression(right)?;
                Self::eval_arith_op(*op, left, right)
            },
        }
    }

    /// Reads one sensor from the robot.
    #[must_use]
    pub fn read_sensor(&self, sensor: Sensor) -> i64 {
        match sensor {
            Sensor::FuelLeft => self.robot.fuel(),
            Sensor::OpponentLR => self.robot.opponent_lr(),
            Sensor::OpponentFB => self.robot.opponent_fb(),
            Sensor::NumBarrels => self.robot.num_barrels(),
            Sensor::BarrelLR => self.robot.closest_barrel_lr(),
            Sensor::BarrelFB => self.robot.closest_barrel_fb(),
            Sensor::WallDist => self.robot.distance_to_wall(),
        }
    }

    /// Evaluates an integer arithmetic operation.
    ///
    /// Division truncates toward zero. Every operation is checked, so
    /// results that do not fit in an `i64` are reported instead of wrapping.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// An `EvalResult<i64>` containing the computed value.
    ///
    /// # Example
    /// ```
    /// use robolang::{
    ///     ast::ArithOp, error::RuntimeError, interpreter::evaluator::core::Evaluator,
    ///     robot::ScriptedRobot,
    /// };
    ///
    /// type Eval<'r> = Evaluator<'r, ScriptedRobot>;
    ///
    /// assert_eq!(Eval::eval_arith_op(ArithOp::Div, 7, 2), Ok(3));
    /// assert_eq!(Eval::eval_arith_op(ArithOp::Div, -7, 2), Ok(-3));
    /// assert_eq!(Eval::eval_arith_op(ArithOp::Div, 1, 0),
    ///            Err(RuntimeError::DivisionByZero { dividend: 1 }));
    /// ```
    pub fn eval_arith_op(op: ArithOp, left: i64, right: i64) -> EvalResult<i64> {
        let result = match op {
            ArithOp::Add => left.checked_add(right),
            ArithOp::Sub => left.checked_sub(right),
            ArithOp::Mul => left.checked_mul(right),
            ArithOp::Div => {
                if right == 0 {
                    return Err(RuntimeError::DivisionByZero { dividend: left });
                }
                left.checked_div(right)
            },
        };

        result.ok_or(RuntimeError::Overflow { op, left, right })
    }
}
