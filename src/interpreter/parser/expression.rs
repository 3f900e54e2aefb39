use std::iter::Peekable;

use crate::{
    ast::{ArithOp, Expression, Sensor},
    interpreter::{
        lexer::{Token, is_integer_literal},
        parser::{
            core::ParseResult,
            utils::{fail, parse_pair, peek_word},
        },
    },
};

/// Parses an integer expression.
///
/// Grammar:
/// ```text
///     expression := number
///                 | op "(" expression "," expression ")"
///                 | sensor
/// ```
///
/// A word shaped like an integer literal selects the number production, an
/// arithmetic keyword selects the operator production, and anything else is
/// parsed as a sensor.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the expression.
///
/// # Returns
/// The parsed expression node.
///
/// # Errors
/// Returns a `ParseError` for malformed numbers, missing delimiters or
/// unknown sensors.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expression>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match peek_word(tokens) {
        Some(word) if is_integer_literal(word) => parse_number(tokens),
        Some(word) if word.parse::<ArithOp>().is_ok() => {
            let op = parse_operator(tokens)?;
            let (left, right) = parse_pair(tokens, parse_expression)?;
            Ok(Expression::BinaryOp { op,
                                      left: Box::new(left),
                                      right: Box::new(right) })
        },
        _ => Ok(Expression::Sensor(parse_sensor(tokens)?)),
    }
}

/// Parses one of the arithmetic operators `add`, `sub`, `mul` or `div`.
///
/// # Errors
/// Returns `Unable to find OP` if the next token is not an operator.
pub fn parse_operator<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ArithOp>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match peek_word(tokens).map(str::parse::<ArithOp>) {
        Some(Ok(op)) => {
            tokens.next();
            Ok(op)
        },
        _ => Err(fail(tokens, "Unable to find OP")),
    }
}

/// Parses a sensor name such as `fuelLeft` or `wallDist`.
///
/// # Errors
/// Returns `Unable to find SEN` if the next token is not a sensor.
pub fn parse_sensor<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Sensor>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match peek_word(tokens).map(str::parse::<Sensor>) {
        Some(Ok(sensor)) => {
            tokens.next();
            Ok(sensor)
        },
        _ => Err(fail(tokens, "Unable to find SEN")),
    }
}

/// Parses a signed integer literal.
///
/// Grammar: `number := ["-"] digit+`
///
/// # Errors
/// - `Unable to find number` if the next token is not shaped like a number.
/// - `Number literal is too large` if it does not fit in an `i64`.
pub fn parse_number<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expression>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some(value) = tokens.peek().and_then(|(tok, _)| tok.as_integer()) {
        tokens.next();
        return Ok(Expression::Number(value));
    }

    match peek_word(tokens) {
        Some(word) if is_integer_literal(word) => Err(fail(tokens, "Number literal is too large")),
        _ => Err(fail(tokens, "Unable to find number")),
    }
}
