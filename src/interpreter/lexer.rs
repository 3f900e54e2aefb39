use std::fmt::{self, Display, Formatter};

use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in robot source code.
///
/// The language has a single delimiter rule: the six characters `{ } ( ) , ;`
/// are always tokens of their own, whitespace separates everything else, and
/// any other run of characters is a [`Token::Word`]. Keywords and numbers are
/// words; the parser decides what a word means from context.
///
/// ## Example
/// ```
/// use robolang::interpreter::lexer::{Token, tokenize};
///
/// let tokens: Vec<Token> = tokenize("move(1);").unwrap().into_iter().map(|(t, _)| t).collect();
///
/// assert_eq!(tokens,
///            vec![Token::Word("move".into()),
///                 Token::LParen,
///                 Token::Word("1".into()),
///                 Token::RParen,
///                 Token::Semicolon]);
/// ```
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// Keywords, sensor names and number literals such as `move`, `fuelLeft`
    /// or `-12`.
    #[regex(r"[^ \t\r\n\x0B\x0C{}(),;]+", |lex| lex.slice().to_string())]
    Word(String),

    /// Line breaks, counted for error reporting.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\x0B\x0C]+", logos::skip)]
    Ignored,
}

impl Token {
    /// The source text of this token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Word(word) => word,
            Self::NewLine => "\n",
            Self::Ignored => " ",
        }
    }

    /// Whether this token is the word `keyword`.
    #[must_use]
    pub fn is_word(&self, keyword: &str) -> bool {
        matches!(self, Self::Word(word) if word == keyword)
    }

    /// Interprets this token as a signed integer literal.
    ///
    /// Only words of the form `-?[0-9]+` qualify. Returns `None` for anything
    /// else, including `+1` and literals too large for an `i64`.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Word(word) if is_integer_literal(word) => word.parse().ok(),
            _ => None,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Checks whether `word` has the shape of an integer literal: an optional
/// leading `-` followed by one or more ASCII digits.
#[must_use]
pub fn is_integer_literal(word: &str) -> bool {
    let digits = word.strip_prefix('-').unwrap_or(word);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Splits `source` into tokens paired with their 1-based line numbers.
///
/// Every character of the input is either whitespace, a delimiter or part of
/// a word, so this only fails if the lexer meets input it cannot classify.
///
/// # Errors
/// Returns a [`ParseError`] naming the unrecognized slice.
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.extras.line));
        } else {
            return Err(ParseError::new(format!("Unexpected token: {}", lexer.slice()),
                                       Some(lexer.extras.line),
                                       Vec::new()));
        }
    }

    Ok(tokens)
}
