use log::debug;

use crate::{
    ast::{Action, Expression},
    interpreter::evaluator::core::{EvalResult, Evaluator},
    robot::Robot,
};

impl<R: Robot + ?Sized> Evaluator<'_, R> {
    /// Executes one action against the robot.
    ///
    /// The operand of `move` or `wait` is evaluated first and handed to the
    /// robot unchanged. If the operand fails to evaluate, the robot is not
    /// called at all.
    ///
    /// # Errors
    /// Returns a `RuntimeError` if the operand fails to evaluate, or
    /// `RuntimeError::Halted` if the robot aborts the run.
    pub fn execute_action(&mut self, action: &Action) -> EvalResult<()> {
        debug!("executing {action}");

        let result = match action {
            Action::Move(distance) => {
                let distance = self.eval_operand(distance.as_ref())?;
                self.robot.move_forward(distance)
            },
            Action::Wait(duration) => {
                let duration = self.eval_operand(duration.as_ref())?;
                self.robot.idle_wait(duration)
            },
            Action::TurnLeft => self.robot.turn_left(),
            Action::TurnRight => self.robot.turn_right(),
            Action::TurnAround => self.robot.turn_around(),
            Action::ShieldOn => self.robot.set_shield(true),
            Action::ShieldOff => self.robot.set_shield(false),
            Action::TakeFuel => self.robot.take_fuel(),
        };

        result.map_err(|halt| {
                  debug!("robot halted during {action}: {halt}");
                  halt.into()
              })
    }

    fn eval_operand(&self, operand: Option<&Expression>) -> EvalResult<Option<i64>> {
        operand.map(|expr| self.eval_expression(expr)).transpose()
    }
}
