/// Action parsing.
///
/// Parses the eight robot commands, including the optional operand of
/// `move` and `wait`.
pub mod action;

/// Block parsing.
///
/// Parses braced, non-empty statement sequences.
pub mod block;

/// Condition parsing.
///
/// Handles `and`, `or`, `not` and the relational operators.
pub mod condition;

/// Core parsing entry points.
///
/// Contains the `ParseResult` alias and the program-level parser.
pub mod core;

/// Expression parsing.
///
/// Parses numbers, arithmetic operators and sensor reads.
pub mod expression;

/// Statement parsing.
///
/// Dispatches between actions, `loop`, `if` and `while`.
pub mod statement;

/// Utility functions for the parser.
///
/// Provides the shared `require`/`fail` helpers every production uses.
pub mod utils;
