//! Structural parse: a token stream in, a concrete syntax tree out.

use std::iter::Peekable;

use crate::reader::token::{Token, TokenOffset};
use crate::reader::{ReadResult, SyntaxError};

/// A concrete syntax node, tagged by the grammar rule that produced it.
///
/// Atom nodes keep the raw matched text; the build step converts text to
/// values.
#[derive(Debug, Clone, PartialEq)]
pub enum Syntax {
    Number(String),
    Char(String),
    Str(String),
    Boolean(String),
    Name(String),
    List(Vec<Syntax>),
    Quote(Box<Syntax>),
}

/// Parse the whole token stream as a sequence of top-level values.
///
/// `depth_limit` bounds list/quote nesting; exceeding it is a syntax error
/// rather than a native stack overflow.
pub fn parse(
    tokens: impl Iterator<Item = TokenOffset>,
    depth_limit: usize,
) -> ReadResult<Vec<Syntax>> {
    let mut tokens = tokens.peekable();
    let mut values = Vec::new();
    while tokens.peek().is_some() {
        values.push(parse_value(&mut tokens, depth_limit)?);
    }
    Ok(values)
}

/// Parse a single value: an atom, a list, or a quoted value.
fn parse_value<I>(tokens: &mut Peekable<I>, depth: usize) -> ReadResult<Syntax>
where
    I: Iterator<Item = TokenOffset>,
{
    let Some(TokenOffset { token, line, column }) = tokens.next() else {
        return Err(SyntaxError::Incomplete(
            "expected a value, got end of input".to_owned(),
        ));
    };

    match token {
        Token::Number(text) => Ok(Syntax::Number(text)),
        Token::Char(text) => Ok(Syntax::Char(text)),
        Token::Str(text) => Ok(Syntax::Str(text)),
        Token::Boolean(text) => Ok(Syntax::Boolean(text)),
        Token::Symbol(text) => Ok(Syntax::Name(text)),
        Token::Quote => {
            let depth = deeper(depth, line, column)?;
            let inner = parse_value(tokens, depth)
                .map_err(|err| err.annotate(format!("after quote at line {line} column {column}")))?;
            Ok(Syntax::Quote(Box::new(inner)))
        }
        Token::LParen => {
            let depth = deeper(depth, line, column)?;
            let mut items = Vec::new();
            loop {
                match tokens.peek() {
                    None => {
                        return Err(SyntaxError::Incomplete(format!(
                            "unclosed list opened at line {line} column {column}"
                        )))
                    }
                    Some(next) if matches!(next.token, Token::RParen) => {
                        tokens.next();
                        break;
                    }
                    Some(_) => items.push(parse_value(tokens, depth)?),
                }
            }
            if items.is_empty() {
                // The grammar requires at least one value inside parens.
                return Err(SyntaxError::Invalid(format!(
                    "empty list at line {line} column {column}"
                )));
            }
            Ok(Syntax::List(items))
        }
        Token::RParen => Err(SyntaxError::Invalid(format!(
            "right paren at line {line} column {column} without matching left paren"
        ))),
    }
}

fn deeper(depth: usize, line: usize, column: usize) -> ReadResult<usize> {
    depth.checked_sub(1).ok_or_else(|| {
        SyntaxError::Invalid(format!(
            "nesting depth limit exceeded at line {line} column {column}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::token::tokenize;

    const DEPTH: usize = 32;

    fn parsed(input: &str) -> ReadResult<Vec<Syntax>> {
        parse(tokenize(input)?.into_iter(), DEPTH)
    }

    fn name(text: &str) -> Syntax {
        Syntax::Name(text.to_owned())
    }

    #[test]
    fn atom_sequence() -> ReadResult<()> {
        let got = parsed("1 2 3")?;
        let want = vec![
            Syntax::Number("1".to_owned()),
            Syntax::Number("2".to_owned()),
            Syntax::Number("3".to_owned()),
        ];
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn nested_lists() -> ReadResult<()> {
        let got = parsed("(a (b c) d)")?;
        let want = vec![Syntax::List(vec![
            name("a"),
            Syntax::List(vec![name("b"), name("c")]),
            name("d"),
        ])];
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn quote_binds_one_value() -> ReadResult<()> {
        let got = parsed("'a b")?;
        let want = vec![Syntax::Quote(Box::new(name("a"))), name("b")];
        assert_eq!(got, want);

        let got = parsed("''a")?;
        let want = vec![Syntax::Quote(Box::new(Syntax::Quote(Box::new(name("a")))))];
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn empty_list_rejected() {
        match parsed("()") {
            Ok(got) => panic!("expected error for input, got {:?}", got),
            Err(SyntaxError::Invalid(e)) => {
                assert!(e.contains("empty list"), "unexpected message: {:?}", e)
            }
            Err(SyntaxError::Incomplete(e)) => {
                panic!("got incomplete, expected invalid; got: {:?}", e)
            }
        }
    }

    #[test]
    fn unclosed_list_wants_more() {
        match parsed("(a (b)") {
            Ok(got) => panic!("expected error for input, got {:?}", got),
            Err(SyntaxError::Incomplete(_)) => (),
            Err(SyntaxError::Invalid(e)) => {
                panic!("got invalid, expected incomplete; got: {:?}", e)
            }
        }
    }

    #[test]
    fn dangling_quote_wants_more() {
        match parsed("'") {
            Ok(got) => panic!("expected error for input, got {:?}", got),
            Err(SyntaxError::Incomplete(_)) => (),
            Err(SyntaxError::Invalid(e)) => {
                panic!("got invalid, expected incomplete; got: {:?}", e)
            }
        }
    }

    #[test]
    fn stray_rparen_is_invalid() {
        match parsed("a)") {
            Ok(got) => panic!("expected error for input, got {:?}", got),
            Err(SyntaxError::Invalid(_)) => (),
            Err(SyntaxError::Incomplete(e)) => {
                panic!("got incomplete, expected invalid; got: {:?}", e)
            }
        }
    }

    #[test]
    fn depth_limit_applies_to_quotes_too() {
        let input = format!("{}x", "'".repeat(DEPTH + 1));
        parsed(&input).expect_err("no error for over-deep quoting");
    }
}
