/// Parsing errors.
///
/// Defines the single error type raised while tokenizing or parsing robot
/// source code. Missing tokens, empty blocks, unknown keywords and malformed
/// numbers are all reported through it, each with a specific message.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the errors that can be raised while a program runs: arithmetic
/// failures and halts signalled by the robot.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a program from a file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("Failed to read robot program '{}'", .path.display())]
    Io {
        /// The path that was being read.
        path:   PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },
    /// The file was read but its contents did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Any failure of a parse-then-run invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoboError {
    /// The source did not parse; nothing was executed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The program parsed but failed while running.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
