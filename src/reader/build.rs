//! Build the final values from concrete syntax, bottom-up.

use crate::data::{self, Form, Symbol};
use crate::reader::parse::Syntax;
use crate::reader::{ReadResult, SyntaxError};

/// Build the program form: every top-level value, in order, behind the
/// implicit `begin` symbol.
pub fn build_program(values: Vec<Syntax>) -> ReadResult<Form> {
    let mut forms = Vec::with_capacity(values.len() + 1);
    forms.push(Form::Symbol(Symbol::new("begin")));
    for value in values {
        forms.push(build(value)?);
    }
    Ok(Form::List(forms))
}

/// Transform one concrete node into its value, one arm per grammar rule.
fn build(node: Syntax) -> ReadResult<Form> {
    match node {
        Syntax::Number(text) => build_number(&text),
        Syntax::Str(text) => Ok(Form::Text(strip_delimiters(&text))),
        Syntax::Boolean(text) => Ok(Form::Boolean(text == "#t")),
        Syntax::Char(text) => Ok(Form::Char(build_char(&text))),
        Syntax::Name(text) => Ok(Form::Symbol(Symbol::new(text))),
        Syntax::Quote(inner) => {
            let inner = build(*inner)?;
            Ok(Form::List(vec![
                Form::Symbol(Symbol::new("quote")),
                inner,
            ]))
        }
        Syntax::List(children) => {
            let forms: ReadResult<Vec<Form>> = children.into_iter().map(build).collect();
            Ok(Form::List(forms?))
        }
    }
}

/// Numbers are always doubles, even for integer-looking text. The tokenizer
/// only passes digit runs here, but conversion stays fallible: a long enough
/// literal overflows to infinity, which is not a value we hand out.
fn build_number(text: &str) -> ReadResult<Form> {
    let number: f64 = text
        .parse()
        .map_err(|err| SyntaxError::Invalid(format!("could not read {:?} as a number: {}", text, err)))?;
    if !number.is_finite() {
        return Err(SyntaxError::Invalid(format!(
            "number {:?} does not fit in a double",
            text
        )));
    }
    Ok(Form::Number(number))
}

/// Strip exactly the delimiting quotes. Escape sequences inside stay as
/// written; the reader does not interpret them.
fn strip_delimiters(text: &str) -> String {
    text[1..text.len() - 1].to_owned()
}

/// Strip the `#\` prefix and substitute named characters through the table.
/// Names missing from the table fall through as their own text.
fn build_char(text: &str) -> String {
    let name = &text[2..];
    match data::char_for_name(name) {
        Some(substitution) => substitution.to_owned(),
        None => name.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_text_becomes_float() -> ReadResult<()> {
        let got = build(Syntax::Number("5".to_owned()))?;
        match got {
            Form::Number(n) => assert_eq!(n, 5.0),
            other => panic!("expected a number, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn signed_and_fractional_numbers() -> ReadResult<()> {
        assert_eq!(build(Syntax::Number("-6".to_owned()))?, Form::Number(-6.0));
        assert_eq!(build(Syntax::Number(".5".to_owned()))?, Form::Number(0.5));
        assert_eq!(
            build(Syntax::Number("+3.25".to_owned()))?,
            Form::Number(3.25)
        );
        Ok(())
    }

    #[test]
    fn overflowing_number_is_an_error() {
        let text = format!("1{}", "0".repeat(400));
        build(Syntax::Number(text)).expect_err("no error for overflowing literal");
    }

    #[test]
    fn string_loses_only_delimiters() -> ReadResult<()> {
        assert_eq!(
            build(Syntax::Str("\"hello\"".to_owned()))?,
            Form::Text("hello".to_owned())
        );
        assert_eq!(
            build(Syntax::Str("'hello'".to_owned()))?,
            Form::Text("hello".to_owned())
        );
        // Escapes are preserved verbatim, not interpreted.
        assert_eq!(
            build(Syntax::Str(r#""a\nb""#.to_owned()))?,
            Form::Text(r"a\nb".to_owned())
        );
        Ok(())
    }

    #[test]
    fn booleans() -> ReadResult<()> {
        assert_eq!(build(Syntax::Boolean("#t".to_owned()))?, Form::Boolean(true));
        assert_eq!(build(Syntax::Boolean("#f".to_owned()))?, Form::Boolean(false));
        Ok(())
    }

    #[test]
    fn chars_substitute_through_the_table() -> ReadResult<()> {
        for (input, want) in [
            (r"#\space", " "),
            (r"#\TAB", "\t"),
            (r"#\linefeed", "\n"),
            (r"#\call", "SUB"),
            (r"#\rubout", "\u{c7}"),
            (r"#\A", "A"),
            (r"#\5", "5"),
            (r"#\frobnicate", "frobnicate"),
        ] {
            assert_eq!(
                build(Syntax::Char(input.to_owned()))?,
                Form::Char(want.to_owned()),
                "unexpected value for {}",
                input
            );
        }
        Ok(())
    }

    #[test]
    fn quote_becomes_two_element_list() -> ReadResult<()> {
        let got = build(Syntax::Quote(Box::new(Syntax::Name("x".to_owned()))))?;
        let want = Form::List(vec![
            Form::Symbol(Symbol::new("quote")),
            Form::Symbol(Symbol::new("x")),
        ]);
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn list_children_in_order() -> ReadResult<()> {
        let got = build(Syntax::List(vec![
            Syntax::Name("a".to_owned()),
            Syntax::Number("1".to_owned()),
        ]))?;
        let want = Form::List(vec![Form::Symbol(Symbol::new("a")), Form::Number(1.0)]);
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn empty_program_is_just_begin() -> ReadResult<()> {
        let got = build_program(vec![])?;
        assert_eq!(got, Form::List(vec![Form::Symbol(Symbol::new("begin"))]));
        Ok(())
    }
}
