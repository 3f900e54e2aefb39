//! # robolang
//!
//! robolang parses and runs programs written in a small robot-control
//! language. Source text is tokenized, parsed by a recursive-descent parser
//! into an abstract syntax tree, and executed by a tree-walking interpreter
//! against anything that implements the [`Robot`](robot::Robot) trait.
//!
//! ```text
//! while (gt(fuelLeft, 0)) {
//!     if (lt(wallDist, 2)) { turnL; } else { move(2); }
//! }
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use std::{fs, path::Path};

use crate::{
    ast::Program,
    error::{LoadError, ParseError, RoboError},
    interpreter::{evaluator::core::Evaluator, lexer::tokenize, parser::core::parse_program},
    robot::Robot,
};

/// Defines the structure of parsed programs.
///
/// This module declares the `Program`, `Statement`, `Action`, `Condition`
/// and `Expression` types that represent a robot program as a tree, plus the
/// keyword enums for sensors and operators. The AST is built by the parser,
/// read by the evaluator, and rendered back to source text via `Display`.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines the errors raised while loading, parsing or running a
/// program. Parse errors carry the upcoming tokens as context; runtime
/// errors cover arithmetic failures and robot halts.
pub mod error;
/// Orchestrates lexing, parsing and evaluation.
///
/// # Responsibilities
/// - Tokenizes source code.
/// - Parses tokens into a `Program`.
/// - Executes programs recursively or one action at a time.
pub mod interpreter;
/// The robot capability consumed by the evaluator.
///
/// Defines the `Robot` trait, the `Halt` signal a robot uses to abort a run,
/// and a scripted robot for dry runs and tests.
pub mod robot;

/// Parses robot source code into a [`Program`].
///
/// This is the sole entry point a front end needs: the whole input must
/// form one valid program, and the first syntax error aborts the parse.
///
/// # Errors
/// Returns a [`ParseError`] describing the first problem found, with up to
/// five of the tokens that followed it.
///
/// # Examples
/// ```
/// let program = robolang::parse("move(1); turnL;").unwrap();
/// assert_eq!(program.statements().len(), 2);
///
/// // Blocks must not be empty.
/// let err = robolang::parse("loop {}").unwrap_err();
/// assert_eq!(err.message, "Cannot have empty block");
/// ```
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();

    parse_program(&mut iter)
}

/// Reads and parses the program stored at `path`.
///
/// # Errors
/// Returns [`LoadError::Io`] if the file cannot be read and
/// [`LoadError::Parse`] if its contents are not a valid program.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Program, LoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io { path: path.to_path_buf(),
                                                                           source })?;

    Ok(parse(&source)?)
}

/// Parses `source` and runs it to completion against `robot`.
///
/// A program containing `loop` only returns once the robot halts it.
///
/// # Errors
/// Returns [`RoboError::Parse`] if nothing could be run, or
/// [`RoboError::Runtime`] if the run ended with an error.
///
/// # Examples
/// ```
/// use robolang::{error::{RoboError, RuntimeError}, robot::ScriptedRobot};
///
/// let mut robot = ScriptedRobot::new().with_fuel(10).with_budget(3);
///
/// let result = robolang::run("loop { move; }", &mut robot);
///
/// assert!(matches!(result, Err(RoboError::Runtime(RuntimeError::Halted { .. }))));
/// assert_eq!(robot.calls().len(), 3);
/// ```
pub fn run<R: Robot + ?Sized>(source: &str, robot: &mut R) -> Result<(), RoboError> {
    let program = parse(source)?;
    Evaluator::new(robot).execute_program(&program)?;

    Ok(())
}
