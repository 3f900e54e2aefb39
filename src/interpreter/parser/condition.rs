use std::iter::Peekable;

use crate::{
    ast::{Condition, RelOp},
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            expression::parse_expression,
            utils::{fail, parse_pair, peek_keyword, peek_word, require, require_keyword},
        },
    },
};

/// Parses a condition.
///
/// Grammar:
/// ```text
///     condition := "and" "(" condition "," condition ")"
///                | "or"  "(" condition "," condition ")"
///                | "not" "(" condition ")"
///                | relop "(" expression "," expression ")"
/// ```
///
/// Logical connectives nest recursively; relational operators form the
/// leaves and compare two integer expressions.
///
/// # Errors
/// Returns a `ParseError` if a delimiter is missing or no connective or
/// relational operator is found.
pub fn parse_condition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Condition>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if peek_keyword(tokens, "and") {
        tokens.next();
        let (left, right) = parse_pair(tokens, parse_condition)?;
        return Ok(Condition::And(Box::new(left), Box::new(right)));
    }

    if peek_keyword(tokens, "or") {
        tokens.next();
        let (left, right) = parse_pair(tokens, parse_condition)?;
        return Ok(Condition::Or(Box::new(left), Box::new(right)));
    }

    if peek_keyword(tokens, "not") {
        require_keyword(tokens, "not", "Missing 'not'")?;
        require(tokens, &Token::LParen, "Missing '('")?;
        let inner = parse_condition(tokens)?;
        require(tokens, &Token::RParen, "Missing ')'")?;
        return Ok(Condition::Not(Box::new(inner)));
    }

    let op = parse_relop(tokens)?;
    let (left, right) = parse_pair(tokens, parse_expression)?;

    Ok(Condition::Relational { op, left, right })
}

/// Parses one of the relational operators `lt`, `gt` or `eq`.
///
/// # Errors
/// Returns `Unable to find RELOP` if the next token is not a relational
/// operator. Nothing is consumed in that case.
pub fn parse_relop<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<RelOp>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match peek_word(tokens).map(str::parse::<RelOp>) {
        Some(Ok(op)) => {
            tokens.next();
            Ok(op)
        },
        _ => Err(fail(tokens, "Unable to find RELOP")),
    }
}
