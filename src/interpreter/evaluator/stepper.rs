use log::trace;

use crate::{
    ast::{Action, Block, Program, Statement, WhileStatement},
    interpreter::evaluator::core::{EvalResult, Evaluator},
    robot::Robot,
};

/// What a single call to [`Stepper::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'p> {
    /// The robot performed this action.
    Acted(&'p Action),
    /// A `loop` or `while` iteration finished without performing an action.
    Idle,
    /// The program has run to completion, or a previous step failed.
    Finished,
}

/// One level of the explicit execution stack.
#[derive(Debug, Clone, Copy)]
enum Frame<'p> {
    /// A statement sequence and the index of the next statement to run.
    Sequence {
        statements: &'p [Statement],
        next:       usize,
    },
    /// An infinite loop. `iteration_start` is the action count when the
    /// current iteration began, or `None` before the next iteration.
    Loop {
        body:            &'p Block,
        iteration_start: Option<u64>,
    },
    /// A pre-tested loop, tracked the same way as `Loop`.
    While {
        statement:       &'p WhileStatement,
        iteration_start: Option<u64>,
    },
}

impl<'p> Frame<'p> {
    const fn sequence(statements: &'p [Statement]) -> Self {
        Self::Sequence { statements,
                         next: 0 }
    }
}

/// Executes a program one action at a time.
///
/// The stepper has the same semantics as [`Evaluator::execute_program`]: for
/// the same robot responses it issues exactly the same robot calls in the
/// same order. The difference is that control returns to the caller after
/// every action, so a driver can interleave several robots, enforce tick
/// budgets, or stop a program that would otherwise `loop` forever.
///
/// A failed step ends the run: the error is returned once and every later
/// step reports [`Step::Finished`].
///
/// ## Example
/// ```
/// use robolang::{
///     interpreter::evaluator::stepper::{Step, Stepper},
///     robot::ScriptedRobot,
/// };
///
/// let program = robolang::parse("loop { turnL; turnR; }").unwrap();
/// let mut robot = ScriptedRobot::new();
/// let mut stepper = Stepper::new(&program);
///
/// for _ in 0..10 {
///     assert!(matches!(stepper.step(&mut robot), Ok(Step::Acted(_))));
/// }
/// assert_eq!(stepper.actions(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct Stepper<'p> {
    frames:  Vec<Frame<'p>>,
    actions: u64,
}

impl<'p> Stepper<'p> {
    /// Creates a stepper positioned before the first statement of `program`.
    #[must_use]
    pub fn new(program: &'p Program) -> Self {
        Self { frames:  vec![Frame::sequence(program.statements())],
               actions: 0, }
    }

    /// Number of actions performed so far.
    #[must_use]
    pub const fn actions(&self) -> u64 {
        self.actions
    }

    /// Whether the program has completed or was aborted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.frames.is_empty()
    }

    /// Runs the program up to and including its next action.
    ///
    /// Conditions met on the way are evaluated against `robot`. The step also
    /// ends, with [`Step::Idle`], when a `loop` or `while` iteration completes
    /// without any action, so a single call always returns.
    ///
    /// # Errors
    /// Returns the `RuntimeError` that ended the run, including robot halts.
    /// The stepper is finished afterwards.
    pub fn step<R: Robot + ?Sized>(&mut self, robot: &mut R) -> EvalResult<Step<'p>> {
        let result = self.advance(&mut Evaluator::new(robot));
        if result.is_err() {
            self.frames.clear();
        }
        result
    }

    fn advance<R: Robot + ?Sized>(&mut self,
                                  evaluator: &mut Evaluator<'_, R>)
                                  -> EvalResult<Step<'p>> {
        loop {
            let Some(frame) = self.frames.last_mut() else {
                return Ok(Step::Finished);
            };

            match frame {
                Frame::Sequence { statements, next } => {
                    let statements: &'p [Statement] = *statements;
                    let index = *next;
                    *next += 1;

                    match statements.get(index) {
                        Some(statement) => {
                            if let Some(step) = self.enter(statement, evaluator)? {
                                return Ok(step);
                            }
                        },
                        None => {
                            self.frames.pop();
                        },
                    }
                },
                Frame::Loop { body, iteration_start } => {
                    let body: &'p Block = *body;
                    if iteration_start.is_some_and(|start| start == self.actions) {
                        *iteration_start = None;
                        trace!("loop iteration ended without an action");
                        return Ok(Step::Idle);
                    }
                    *iteration_start = Some(self.actions);
                    self.frames.push(Frame::sequence(body.statements()));
                },
                Frame::While { statement,
                               iteration_start, } => {
                    let statement: &'p WhileStatement = *statement;
                    if iteration_start.is_some_and(|start| start == self.actions) {
                        *iteration_start = None;
                        trace!("while iteration ended without an action");
                        return Ok(Step::Idle);
                    }
                    if evaluator.eval_condition(&statement.condition)? {
                        *iteration_start = Some(self.actions);
                        self.frames.push(Frame::sequence(statement.body.statements()));
                    } else {
                        self.frames.pop();
                    }
                },
            }
        }
    }

    /// Starts executing `statement`.
    ///
    /// Actions run immediately and end the step. Compound statements push
    /// the frames needed to continue and return `None`.
    fn enter<R: Robot + ?Sized>(&mut self,
                                statement: &'p Statement,
                                evaluator: &mut Evaluator<'_, R>)
                                -> EvalResult<Option<Step<'p>>> {
        match statement {
            Statement::Action(action) => {
                evaluator.execute_action(action)?;
                self.actions += 1;
                return Ok(Some(Step::Acted(action)));
            },
            Statement::Loop(body) => self.frames.push(Frame::Loop { body,
                                                                    iteration_start: None }),
            Statement::If(statement) => {
                let branch = if evaluator.eval_condition(&statement.condition)? {
                    Some(&statement.then_block)
                } else {
                    statement.else_block.as_ref()
                };
                if let Some(block) = branch {
                    self.frames.push(Frame::sequence(block.statements()));
                }
            },
            Statement::While(statement) => {
                self.frames.push(Frame::While { statement,
                                                iteration_start: None })
            },
        }

        Ok(None)
    }
}
