use log::trace;

use crate::{
    ast::{Block, IfStatement, Program, Statement, WhileStatement},
    error::RuntimeError,
    robot::Robot,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// A tree-walking interpreter bound to one robot.
///
/// The evaluator keeps no state of its own: the position in the program is
/// the Rust call stack, and everything observable lives in the robot. The
/// program is only ever borrowed immutably, so it stays valid after a failed
/// run and can be executed again against a fresh robot.
///
/// ## Usage
///
/// ```
/// use robolang::{
///     interpreter::evaluator::core::Evaluator,
///     robot::{RobotCall, ScriptedRobot},
/// };
///
/// let program = robolang::parse("if (eq(1, 2)) { move; } else { turnL; }").unwrap();
/// let mut robot = ScriptedRobot::new();
///
/// Evaluator::new(&mut robot).execute_program(&program).unwrap();
///
/// assert_eq!(robot.calls(), &[RobotCall::TurnLeft]);
/// ```
pub struct Evaluator<'r, R: Robot + ?Sized> {
    pub(crate) robot: &'r mut R,
}

impl<'r, R: Robot + ?Sized> Evaluator<'r, R> {
    /// Creates an evaluator that drives `robot`.
    pub const fn new(robot: &'r mut R) -> Self {
        Self { robot }
    }

    /// Executes every top-level statement of `program` in order.
    ///
    /// Returns only once the program has run to completion; a program with a
    /// `loop` never completes and only returns through an error.
    ///
    /// # Errors
    /// Returns the first `RuntimeError` raised, including robot halts. The
    /// error unwinds the whole run.
    pub fn execute_program(&mut self, program: &Program) -> EvalResult<()> {
        self.execute_statements(program.statements())
    }

    /// Executes the statements of `block` in order.
    ///
    /// # Errors
    /// Propagates any `RuntimeError` from the statements.
    pub fn execute_block(&mut self, block: &Block) -> EvalResult<()> {
        self.execute_statements(block.statements())
    }

    fn execute_statements(&mut self, statements: &[Statement]) -> EvalResult<()> {
        for statement in statements {
            self.execute_statement(statement)?;
        }
        Ok(())
    }

    /// Executes a single statement.
    ///
    /// - Actions issue one robot call.
    /// - `loop` repeats its body forever.
    /// - `if` evaluates its condition once and runs at most one branch.
    /// - `while` re-evaluates its condition before every iteration.
    ///
    /// # Errors
    /// Propagates any `RuntimeError`. Errors are never caught here, so a halt
    /// inside a `loop` terminates it.
    pub fn execute_statement(&mut self, statement: &Statement) -> EvalResult<()> {
        match statement {
            Statement::Action(action) => self.execute_action(action),
            Statement::Loop(body) => loop {
                self.execute_block(body)?;
            },
            Statement::If(IfStatement { condition,
                                        then_block,
                                        else_block, }) => {
                let holds = self.eval_condition(condition)?;
                trace!("if ({condition}) evaluated to {holds}");

                if holds {
                    self.execute_block(then_block)
                } else if let Some(else_block) = else_block {
                    self.execute_block(else_block)
                } else {
                    Ok(())
                }
            },
            Statement::While(WhileStatement { condition, body }) => {
                while self.eval_condition(condition)? {
                    self.execute_block(body)?;
                }
                trace!("while ({condition}) finished");
                Ok(())
            },
        }
    }
}
