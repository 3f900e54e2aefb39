use std::iter::Peekable;

use crate::{
    ast::Block,
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            statement::parse_statement,
            utils::{fail, peek_token, require},
        },
    },
};

/// Parses a block delimited by braces.
///
/// A block consists of one or more statements. An immediately encountered
/// closing brace is rejected, as is running out of input before the block
/// is closed.
///
/// Grammar: `block := "{" statement+ "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the opening brace.
///
/// # Returns
/// The parsed, non-empty [`Block`].
///
/// # Errors
/// - `Missing '{'` if the block does not start with a brace.
/// - `Cannot have empty block` for `{}`.
/// - `Missing '}'` if the input ends inside the block.
/// - Propagates any errors from statement parsing.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Block>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    require(tokens, &Token::LBrace, "Missing '{'")?;

    if peek_token(tokens, &Token::RBrace) {
        return Err(fail(tokens, "Cannot have empty block"));
    }

    let mut statements = Vec::new();
    while !peek_token(tokens, &Token::RBrace) {
        if tokens.peek().is_none() {
            return Err(fail(tokens, "Missing '}'"));
        }
        statements.push(parse_statement(tokens)?);
    }

    require(tokens, &Token::RBrace, "Missing '}'")?;

    Block::new(statements).ok_or_else(|| fail(tokens, "Cannot have empty block"))
}
