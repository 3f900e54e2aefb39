/// The evaluator module executes a parsed program against a robot.
///
/// The evaluator walks the AST directly: statements are executed for their
/// effect on the robot, conditions are evaluated to booleans and expressions
/// to integers. A resumable stepper drives the same semantics one action at
/// a time.
///
/// # Responsibilities
/// - Executes actions, loops, conditionals and blocks in source order.
/// - Evaluates conditions and integer expressions, reading robot sensors.
/// - Reports runtime errors such as division by zero and propagates robot
///   halts.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw program text and produces a stream of tokens:
/// the six delimiters `{ } ( ) , ;` and whitespace-separated words. Each
/// token is paired with its source line.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser is a recursive-descent parser with one function per grammar
/// production. It dispatches on a single token of lookahead and aborts at
/// the first syntax error.
///
/// # Responsibilities
/// - Converts tokens into [`Program`](crate::ast::Program) trees.
/// - Validates the grammar, reporting errors with upcoming-token context.
pub mod parser;
