use std::iter::Peekable;

use crate::{
    error::{ParseError, parse_error::CONTEXT_TOKENS},
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Builds a parse failure at the current position.
///
/// The error records the line of the next token and up to
/// [`CONTEXT_TOKENS`] upcoming tokens, without consuming them.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the point of failure.
/// - `message`: What was expected.
pub(in crate::interpreter::parser) fn fail<'a, I>(tokens: &mut Peekable<I>,
                                                  message: &str)
                                                  -> ParseError
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = tokens.peek().map(|(_, line)| *line);
    let context = tokens.clone()
                        .take(CONTEXT_TOKENS)
                        .map(|(tok, _)| tok.to_string())
                        .collect();

    ParseError::new(message, line, context)
}

/// Rejects input whose braces and parentheses nest deeper than
/// `max_depth`.
///
/// Every level of the syntax tree opens a delimiter, so this bounds the
/// recursion depth of every walk over the tree. Nothing is consumed;
/// unbalanced delimiters are left for the grammar to report.
///
/// # Errors
/// Returns `Nesting is too deep` at the first delimiter past the limit.
pub(in crate::interpreter::parser) fn check_nesting<'a, I>(tokens: &Peekable<I>,
                                                           max_depth: usize)
                                                           -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut ahead = tokens.clone();
    let mut depth = 0_usize;

    while let Some((tok, _)) = ahead.peek().copied() {
        match tok {
            Token::LBrace | Token::LParen => depth += 1,
            Token::RBrace | Token::RParen => depth = depth.saturating_sub(1),
            _ => {},
        }
        if depth > max_depth {
            return Err(fail(&mut ahead, "Nesting is too deep"));
        }
        ahead.next();
    }

    Ok(())
}

/// Consumes the next token if `matches` accepts it.
///
/// This is the "require" step behind every terminal in the grammar: on a
/// match the token is consumed and returned, otherwise nothing is consumed
/// and a failure carrying `message` is returned.
///
/// # Errors
/// Returns a `ParseError` if the next token is rejected or the input ended.
pub(in crate::interpreter::parser) fn require_with<'a, I>(tokens: &mut Peekable<I>,
                                                          matches: impl Fn(&Token) -> bool,
                                                          message: &str)
                                                          -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek().copied() {
        Some((tok, _)) if matches(tok) => {
            tokens.next();
            Ok(tok)
        },
        _ => Err(fail(tokens, message)),
    }
}

/// Requires the next token to be exactly `expected`.
///
/// # Errors
/// Returns a `ParseError` carrying `message` otherwise.
pub(in crate::interpreter::parser) fn require<'a, I>(tokens: &mut Peekable<I>,
                                                     expected: &Token,
                                                     message: &str)
                                                     -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    require_with(tokens, |tok| tok == expected, message)
}

/// Requires the next token to be the word `keyword`.
///
/// # Errors
/// Returns a `ParseError` carrying `message` otherwise.
pub(in crate::interpreter::parser) fn require_keyword<'a, I>(tokens: &mut Peekable<I>,
                                                             keyword: &str,
                                                             message: &str)
                                                             -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    require_with(tokens, |tok| tok.is_word(keyword), message)
}

/// Checks whether the next token is the word `keyword`, without consuming it.
pub(in crate::interpreter::parser) fn peek_keyword<'a, I>(tokens: &mut Peekable<I>,
                                                          keyword: &str)
                                                          -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.peek().is_some_and(|(tok, _)| tok.is_word(keyword))
}

/// Checks whether the next token is `expected`, without consuming it.
pub(in crate::interpreter::parser) fn peek_token<'a, I>(tokens: &mut Peekable<I>,
                                                        expected: &Token)
                                                        -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.peek().is_some_and(|(tok, _)| tok == expected)
}

/// Checks whether the token after the next one is `expected`, without
/// consuming anything.
pub(in crate::interpreter::parser) fn peek_second<'a, I>(tokens: &Peekable<I>,
                                                         expected: &Token)
                                                         -> bool
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.clone().nth(1).is_some_and(|(tok, _)| tok == expected)
}

/// Returns the text of the next word, if the next token is a word.
pub(in crate::interpreter::parser) fn peek_word<'a, I>(tokens: &mut Peekable<I>) -> Option<&'a str>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.peek().copied() {
        Some((Token::Word(word), _)) => Some(word.as_str()),
        _ => None,
    }
}

/// Parses a parenthesized, comma-separated pair: `"(" a "," b ")"`.
///
/// Shared by the binary conditions, the relational operators and the
/// arithmetic operators, all of which take exactly two arguments.
///
/// # Errors
/// Returns a `ParseError` if a delimiter is missing or either item fails to
/// parse.
pub(in crate::interpreter::parser) fn parse_pair<'a, I, T>(tokens: &mut Peekable<I>,
                                                           parse_item: impl Fn(&mut Peekable<I>)
                                                                               -> ParseResult<T>)
                                                           -> ParseResult<(T, T)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    require(tokens, &Token::LParen, "Missing '('")?;
    let first = parse_item(tokens)?;
    require(tokens, &Token::Comma, "Missing ','")?;
    let second = parse_item(tokens)?;
    require(tokens, &Token::RParen, "Missing ')'")?;

    Ok((first, second))
}
