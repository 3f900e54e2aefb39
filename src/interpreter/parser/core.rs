use std::iter::Peekable;

use crate::{
    ast::Program,
    interpreter::{
        lexer::Token,
        parser::{
            statement::parse_statement,
            utils::{check_nesting, fail},
        },
    },
};

pub type ParseResult<T> = Result<T, crate::error::ParseError>;

/// Deepest nesting of braces and parentheses a program may use.
pub const MAX_NESTING_DEPTH: usize = 200;

/// Parses a complete program.
///
/// This is the entry point for parsing. Statements are parsed until the
/// token stream is exhausted; the first failure aborts the whole parse.
///
/// Grammar: `program := statement+`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed [`Program`].
///
/// # Errors
/// Returns a `ParseError` if the input holds no statement at all, nests
/// deeper than [`MAX_NESTING_DEPTH`], or if any statement fails to parse.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Program>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    check_nesting(tokens, MAX_NESTING_DEPTH)?;

    let mut statements = Vec::new();
    while tokens.peek().is_some() {
        statements.push(parse_statement(tokens)?);
    }

    Program::new(statements).ok_or_else(|| fail(tokens, "Program has no statements"))
}
