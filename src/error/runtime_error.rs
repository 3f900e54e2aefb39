use thiserror::Error;

use crate::{ast::ArithOp, robot::Halt};

/// Errors raised while a program is running.
///
/// Any of these ends the current run: the error unwinds every enclosing
/// `loop`, `while` and block. The program tree itself is untouched and can be
/// run again against a fresh robot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// `div(x, 0)` was evaluated.
    #[error("Division by zero: div({dividend}, 0).")]
    DivisionByZero {
        /// The value that was being divided.
        dividend: i64,
    },
    /// An arithmetic result did not fit in an `i64`.
    #[error("Integer overflow while computing {op}({left}, {right}).")]
    Overflow {
        /// The operator that overflowed.
        op:    ArithOp,
        /// Left operand.
        left:  i64,
        /// Right operand.
        right: i64,
    },
    /// The robot aborted the run from inside an action.
    #[error("Robot halted: {reason}")]
    Halted {
        /// Why the robot stopped.
        reason: String,
    },
}

impl From<Halt> for RuntimeError {
    fn from(halt: Halt) -> Self {
        Self::Halted { reason: halt.reason }
    }
}
