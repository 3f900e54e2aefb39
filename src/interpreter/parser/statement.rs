use std::iter::Peekable;

use log::trace;

use crate::{
    ast::{Block, IfStatement, Statement, WhileStatement},
    interpreter::{
        lexer::Token,
        parser::{
            action::parse_action,
            block::parse_block,
            condition::parse_condition,
            core::ParseResult,
            utils::{peek_keyword, peek_second, peek_token, require, require_keyword},
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a `loop` statement,
/// - an `if` statement,
/// - a `while` statement,
/// - an action terminated by `;`.
///
/// The keyword of the next token decides which production is entered; any
/// other token is parsed as an action.
///
/// Grammar: `statement := action ";" | loop | if | while`
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
///
/// # Errors
/// Returns a `ParseError` if the statement is malformed, including a missing
/// `;` after an action.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((tok, line)) = tokens.peek() {
        trace!("parsing statement at '{tok}' on line {line}");
    }

    if peek_keyword(tokens, "loop") {
        return parse_loop(tokens);
    }
    if peek_keyword(tokens, "if") {
        return parse_if(tokens);
    }
    if peek_keyword(tokens, "while") {
        return parse_while(tokens);
    }

    let action = parse_action(tokens)?;
    require(tokens, &Token::Semicolon, "Missing ';'")?;

    Ok(Statement::Action(action))
}

/// Parses an infinite loop.
///
/// Grammar: `loop := "loop" block`
///
/// # Errors
/// Returns a `ParseError` if the keyword or the block is malformed.
pub fn parse_loop<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    require_keyword(tokens, "loop", "Missing 'loop'")?;

    Ok(Statement::Loop(parse_block(tokens)?))
}

/// Parses an `if` statement with an optional `else` branch.
///
/// Syntax:
/// ```text
///     if ( <condition> ) { <statements> }
///     if ( <condition> ) { <statements> } else { <statements> }
///     if ( <condition> ) { <statements> } else { { <statements> } }
/// ```
///
/// The absence of `else` is kept as `None`; an `else` must always be
/// followed by a non-empty block, optionally wrapped in a second pair of
/// braces. Both spellings produce the same tree.
///
/// # Errors
/// - `Missing '('` / `Missing ')'` around the condition.
/// - Propagates any errors from condition and block parsing.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    require_keyword(tokens, "if", "Missing 'if'")?;
    require(tokens, &Token::LParen, "Missing '('")?;
    let condition = parse_condition(tokens)?;
    require(tokens, &Token::RParen, "Missing ')'")?;
    let then_block = parse_block(tokens)?;

    let else_block = if peek_keyword(tokens, "else") {
        tokens.next();
        Some(parse_else_block(tokens)?)
    } else {
        None
    };

    Ok(Statement::If(IfStatement { condition,
                                   then_block,
                                   else_block }))
}

/// Parses the body of an `else`.
///
/// Grammar: `else_block := "{" block "}" | block`
///
/// No statement starts with `{`, so a second opening brace always means the
/// wrapped form.
fn parse_else_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Block>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if !(peek_token(tokens, &Token::LBrace) && peek_second(tokens, &Token::LBrace)) {
        return parse_block(tokens);
    }

    require(tokens, &Token::LBrace, "Missing '{'")?;
    let block = parse_block(tokens)?;
    require(tokens, &Token::RBrace, "Missing '}'")?;

    Ok(block)
}

/// Parses a `while` loop.
///
/// Grammar: `while := "while" "(" condition ")" block`
///
/// # Errors
/// Returns a `ParseError` if any part of the loop header or body is
/// malformed.
pub fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    require_keyword(tokens, "while", "Missing 'while'")?;
    require(tokens, &Token::LParen, "Missing '('")?;
    let condition = parse_condition(tokens)?;
    require(tokens, &Token::RParen, "Missing ')'")?;
    let body = parse_block(tokens)?;

    Ok(Statement::While(WhileStatement { condition, body }))
}
