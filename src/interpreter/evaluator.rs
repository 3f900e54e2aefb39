/// Action execution.
///
/// Evaluates operands and issues the matching robot actuator call.
pub mod action;

/// Condition evaluation.
///
/// Implements the logical connectives and relational comparisons.
pub mod condition;

/// Core evaluation logic.
///
/// Contains the `Evaluator`, the `EvalResult` alias, and statement, block
/// and program execution.
pub mod core;

/// Expression evaluation.
///
/// Implements checked integer arithmetic and sensor reads.
pub mod expression;

/// Step-wise execution.
///
/// Runs a program one action at a time so a driver can interleave several
/// robots.
pub mod stepper;
