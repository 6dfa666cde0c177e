//! Module for extracting Lisp tokens from an input string.

use crate::reader::{ReadResult, SyntaxError};

/// A Lisp token.
///
/// Whitespace and comments are ignored. Atom tokens carry the raw matched
/// text, delimiters included; converting text to values is the build step's
/// job.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LParen,
    RParen,
    Quote,
    Number(String),
    Char(String),
    Str(String),
    Boolean(String),
    Symbol(String),
}

/// A token along with its starting position in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenOffset {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

/// Split the input into its constituent tokens.
pub fn tokenize(mut input: &str) -> ReadResult<Vec<TokenOffset>> {
    let mut result = Vec::new();

    // Position info for error messages:
    // line number (starting from 0 - fixed up when doing output).
    let mut line = 0;
    let mut column = 0;
    while !input.is_empty() {
        let next = get_next_token(input)
            .map_err(|err| err.annotate(format!("at line {} column {}", line + 1, column + 1)))?;

        if let Some(token) = next.token {
            result.push(TokenOffset::new(line, column, token));
        }
        line += next.lines;
        if next.lines > 0 {
            column = next.columns;
        } else {
            column += next.columns;
        }

        input = next.remainder;
    }

    Ok(result)
}

impl TokenOffset {
    fn new(line: usize, column: usize, token: Token) -> Self {
        // In useful output, lines and columns are 1-indexed.
        TokenOffset {
            token,
            line: line + 1,
            column: column + 1,
        }
    }
}

struct NextToken<'a> {
    // Token retrieved, if any.
    // May be None if only whitespace or a comment was consumed.
    token: Option<Token>,
    // Lines traversed in finding the token.
    lines: usize,
    // Columns in the final line traversed in finding the token.
    columns: usize,

    // Remaining input.
    remainder: &'a str,
}

mod regex {
    use regex::Regex;
    use std::sync::OnceLock;

    pub(super) fn comment() -> &'static Regex {
        static MATCH: OnceLock<Regex> = OnceLock::new();
        MATCH.get_or_init(|| Regex::new(r"\A;[^\n]*").expect("could not compile regex for comment"))
    }

    pub(super) fn space() -> &'static Regex {
        static MATCH: OnceLock<Regex> = OnceLock::new();
        MATCH
            .get_or_init(|| Regex::new(r"\A\s+").expect("could not compile regex for whitespace"))
    }

    pub(super) fn number() -> &'static Regex {
        static MATCH: OnceLock<Regex> = OnceLock::new();
        MATCH.get_or_init(|| {
            // Optional sign, at most one decimal point, at least one digit.
            Regex::new(r"\A[-+]?[0-9]*\.?[0-9]+").expect("could not compile regex for number")
        })
    }

    pub(super) fn character() -> &'static Regex {
        static MATCH: OnceLock<Regex> = OnceLock::new();
        MATCH.get_or_init(|| {
            // `#\` then a multi-letter name, a single digit, or a single
            // non-alphanumeric non-whitespace character.
            Regex::new(r"\A#\\([A-Za-z]+|[0-9]|[^\s0-9A-Za-z])")
                .expect("could not compile regex for character")
        })
    }

    pub(super) fn string() -> &'static Regex {
        static MATCH: OnceLock<Regex> = OnceLock::new();
        MATCH.get_or_init(|| {
            // Matching single or double quotes; a backslash escapes the
            // following character, delimiters included. No raw newlines
            // inside the literal, so a string never spans lines.
            Regex::new(r#"\A('[^\n'\\]*(?:\\.[^\n'\\]*)*'|"[^\n"\\]*(?:\\.[^\n"\\]*)*")"#)
                .expect("could not compile regex for string")
        })
    }

    pub(super) fn boolean() -> &'static Regex {
        static MATCH: OnceLock<Regex> = OnceLock::new();
        MATCH.get_or_init(|| Regex::new(r"\A#[tf]").expect("could not compile regex for boolean"))
    }

    pub(super) fn name() -> &'static Regex {
        static MATCH: OnceLock<Regex> = OnceLock::new();
        MATCH.get_or_init(|| {
            // A standalone sign, or exactly `...`, or a start character
            // followed by continuation characters. The alternatives are
            // tried leftmost-first, so `-foo` is the symbol `-` and then
            // a separate symbol `foo`.
            Regex::new(
                r"\A(?:[-+]|\.{3}|[A-Za-z|*/<=>!?:$%_&~^][A-Za-z0-9|*/<=>!?:$%_&~^.+-]*)",
            )
            .expect("could not compile regex for name")
        })
    }
}

/// Returns the (line, column) that the cursor ends at after traversing the
/// given text, assuming it started at (0, 0).
fn cursor_distance(s: &str) -> (usize, usize) {
    let lines = s.matches('\n').count();
    let column = match s.rfind('\n') {
        Some(idx) => s[idx + 1..].chars().count(),
        None => s.chars().count(),
    };
    (lines, column)
}

/// Get the next token from the input, and return the remainder of the input.
fn get_next_token(input: &str) -> ReadResult<NextToken<'_>> {
    // Shouldn't bother calling if nothing remains.
    assert!(!input.is_empty());

    let consumed = |token: Option<Token>, len: usize| {
        let (lines, columns) = cursor_distance(&input[..len]);
        NextToken {
            token,
            lines,
            columns,
            remainder: &input[len..],
        }
    };

    // Comments and whitespace move the cursor without producing a token.
    for skip in [regex::comment(), regex::space()] {
        if let Some(m) = skip.find(input) {
            return Ok(consumed(None, m.end()));
        }
    }

    match input.as_bytes()[0] {
        b'(' => return Ok(consumed(Some(Token::LParen), 1)),
        b')' => return Ok(consumed(Some(Token::RParen), 1)),
        _ => {}
    }

    // Atom rules, most specific first.
    if let Some(m) = regex::number().find(input) {
        return Ok(consumed(Some(Token::Number(m.as_str().to_owned())), m.end()));
    }
    if let Some(m) = regex::character().find(input) {
        return Ok(consumed(Some(Token::Char(m.as_str().to_owned())), m.end()));
    }
    if let Some(m) = regex::string().find(input) {
        return Ok(consumed(Some(Token::Str(m.as_str().to_owned())), m.end()));
    }
    if let Some(m) = regex::boolean().find(input) {
        return Ok(consumed(Some(Token::Boolean(m.as_str().to_owned())), m.end()));
    }
    if let Some(m) = regex::name().find(input) {
        return Ok(consumed(Some(Token::Symbol(m.as_str().to_owned())), m.end()));
    }

    // A single quote that did not open a string literal is the quote
    // shorthand. This has to come after the string rule: `'hi'` is a
    // string, `'hi` is a quoted symbol.
    if input.starts_with('\'') {
        return Ok(consumed(Some(Token::Quote), 1));
    }

    // A double quote only lexes as part of a complete string literal, so
    // reaching one here means the literal never closed (or broke across a
    // line, which the grammar forbids).
    if input.starts_with('"') {
        return Err(SyntaxError::Incomplete("unterminated string".to_owned()));
    }

    Err(SyntaxError::Invalid(
        "could not read remainder of input as any token".to_owned(),
    ))
}
