use thiserror::Error;

/// Maximum number of upcoming tokens recorded as context on a failure.
pub const CONTEXT_TOKENS: usize = 5;

/// A syntax error, raised at the first token that does not fit the grammar.
///
/// Parsing stops at the first failure, so there is never more than one. The
/// error records the tokens that had not yet been consumed (at most
/// [`CONTEXT_TOKENS`]) so the user can see where the parser gave up.
///
/// ## Example
/// ```
/// let err = robolang::parse("move move;").unwrap_err();
///
/// assert_eq!(err.message, "Missing ';'");
/// assert_eq!(err.context, vec!["move", ";"]);
/// assert_eq!(err.to_string(), "Missing ';' on line 1\n   @ ... move ;...");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}{}\n   @ ...{}...", line_suffix(.line), context_suffix(.context))]
pub struct ParseError {
    /// What was expected or what went wrong.
    pub message: String,
    /// Line of the offending token, or `None` if the input ended first.
    pub line:    Option<usize>,
    /// The next unconsumed tokens at the point of failure.
    pub context: Vec<String>,
}

impl ParseError {
    /// Creates a parse error from its parts.
    #[must_use]
    pub fn new(message: impl Into<String>, line: Option<usize>, context: Vec<String>) -> Self {
        Self { message: message.into(),
               line,
               context }
    }

    /// Whether the failure happened because the input ran out.
    #[must_use]
    pub const fn at_end_of_input(&self) -> bool {
        self.line.is_none()
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map_or_else(|| " at end of input".to_string(), |line| format!(" on line {line}"))
}

fn context_suffix(context: &[String]) -> String {
    context.iter().fold(String::new(), |mut acc, token| {
                      acc.push(' ');
                      acc.push_str(token);
                      acc
                  })
}
