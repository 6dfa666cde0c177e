//! Support for reading Lisp expressions from strings.

use crate::data::Form;

mod build;
mod parse;
mod token;

/// Default bound on list/quote nesting depth.
///
/// Deeply nested input would otherwise exhaust the native stack; the reader
/// fails cleanly instead. Callers with unusual input can pick their own
/// bound via [`parse_with_depth`].
pub const DEFAULT_DEPTH_LIMIT: usize = 128;

/// Parse the input as a program: every top-level form, in source order,
/// wrapped in an implicit `(begin ...)` list.
pub fn parse(input: &str) -> ReadResult<Form> {
    parse_with_depth(input, DEFAULT_DEPTH_LIMIT)
}

/// As [`parse`], with a caller-chosen bound on nesting depth.
pub fn parse_with_depth(input: &str, depth_limit: usize) -> ReadResult<Form> {
    let tokens = token::tokenize(input)?;
    tracing::trace!("tokenized {} tokens", tokens.len());
    let values = parse::parse(tokens.into_iter(), depth_limit)?;
    tracing::trace!("parsed {} top-level values", values.len());
    build::build_program(values)
}

/// Error type if a read does not complete.
///
/// A read may hit a true syntax error, e.g. "())", that no additional input
/// can fix. This is distinct from a read that hits an unexpected
/// end-of-input, e.g. "((": more input might fix that one. For input coming
/// in interactively the distinction matters; callers parsing a fixed buffer
/// can treat both the same.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// Input that does not conform to the grammar.
    Invalid(String),
    /// Input that ended in the middle of a form.
    Incomplete(String),
}

impl SyntaxError {
    /// Add additional context to an error.
    pub fn annotate(self, more: impl AsRef<str>) -> Self {
        match self {
            SyntaxError::Invalid(e) => SyntaxError::Invalid(format!("{}: {}", more.as_ref(), e)),
            SyntaxError::Incomplete(e) => {
                SyntaxError::Incomplete(format!("{}: {}", more.as_ref(), e))
            }
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxError::Invalid(e) => write!(f, "syntax error: {e}"),
            SyntaxError::Incomplete(e) => write!(f, "incomplete input: {e}"),
        }
    }
}

impl std::error::Error for SyntaxError {}

/// The main result type for this module: a T (token, syntax node, form), or
/// a syntax error.
pub type ReadResult<T> = Result<T, SyntaxError>;
