use std::iter::Peekable;

use crate::{
    ast::{Action, Expression},
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            expression::parse_expression,
            utils::{fail, peek_token, peek_word, require},
        },
    },
};

/// Parses a robot action.
///
/// Grammar:
/// ```text
///     action := "move" [ "(" expression ")" ]
///             | "wait" [ "(" expression ")" ]
///             | "turnL" | "turnR" | "turnAround"
///             | "shieldOn" | "shieldOff" | "takeFuel"
/// ```
///
/// The terminating `;` belongs to the statement and is not consumed here.
///
/// # Errors
/// Returns `No actions can be found` if the next token is not an action
/// keyword, and propagates errors from operand parsing.
pub fn parse_action<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Action>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let action = match peek_word(tokens) {
        Some("move") => {
            tokens.next();
            Action::Move(parse_operand(tokens)?)
        },
        Some("wait") => {
            tokens.next();
            Action::Wait(parse_operand(tokens)?)
        },
        Some(word) => {
            let action = match word {
                "turnL" => Action::TurnLeft,
                "turnR" => Action::TurnRight,
                "turnAround" => Action::TurnAround,
                "shieldOn" => Action::ShieldOn,
                "shieldOff" => Action::ShieldOff,
                "takeFuel" => Action::TakeFuel,
                _ => return Err(fail(tokens, "No actions can be found")),
            };
            tokens.next();
            action
        },
        None => return Err(fail(tokens, "No actions can be found")),
    };

    Ok(action)
}

/// Parses the optional `"(" expression ")"` after `move` or `wait`.
///
/// Returns `None` without consuming anything if no `(` follows.
fn parse_operand<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Expression>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if !peek_token(tokens, &Token::LParen) {
        return Ok(None);
    }

    require(tokens, &Token::LParen, "Missing '('")?;
    let operand = parse_expression(tokens)?;
    require(tokens, &Token::RParen, "Missing ')'")?;

    Ok(Some(operand))
}
