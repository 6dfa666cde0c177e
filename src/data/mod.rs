//! Lisp data types: the values a parse produces.
//!
//! For each type, the Display implementation renders the value as a string
//! that can be parsed back as the same value. Exact source formatting does
//! not survive the trip; structure and values do.

use std::fmt;

/// An identifier, distinct from string text.
///
/// Symbols compare by their text payload: parsing the same name twice yields
/// two equal symbols. The payload always matches the name grammar and is
/// never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(text: impl Into<String>) -> Self {
        Symbol(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(text: &str) -> Self {
        Symbol::new(text)
    }
}

/// A parsed value: an atom, or an ordered sequence of values.
///
/// Numbers are always double-precision, even for integer-looking literals.
/// A character may hold substituted text longer than one character; see the
/// character-name table below.
#[derive(Debug, Clone, PartialEq)]
pub enum Form {
    Number(f64),
    Text(String),
    Boolean(bool),
    Char(String),
    Symbol(Symbol),
    List(Vec<Form>),
}

impl From<f64> for Form {
    fn from(value: f64) -> Self {
        Form::Number(value)
    }
}

impl From<bool> for Form {
    fn from(value: bool) -> Self {
        Form::Boolean(value)
    }
}

impl From<Symbol> for Form {
    fn from(value: Symbol) -> Self {
        Form::Symbol(value)
    }
}

impl From<Vec<Form>> for Form {
    fn from(value: Vec<Form>) -> Self {
        Form::List(value)
    }
}

/// Character-literal names and their substitutions.
///
/// Lookup is case-insensitive on the name. Two entries are deliberate
/// oddities carried over from the reference character set: `call` maps to
/// the three-character text "SUB" rather than the SUB control byte, and
/// `rubout` maps to U+00C7 rather than DEL.
const CHAR_NAMES: &[(&str, &str)] = &[
    ("altmode", "\x1b"),
    ("backnext", "\x1f"),
    ("backspace", "\x08"),
    ("call", "SUB"),
    ("linefeed", "\n"),
    ("page", "\x0c"),
    ("return", "\r"),
    ("rubout", "\u{c7}"),
    ("space", " "),
    ("tab", "\t"),
];

/// Look up the substitution for a character-literal name.
pub(crate) fn char_for_name(name: &str) -> Option<&'static str> {
    let name = name.to_ascii_lowercase();
    CHAR_NAMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c)
}

/// Reverse lookup, for printing: the name under which a character value
/// appears in the table, if any.
pub(crate) fn name_for_char(value: &str) -> Option<&'static str> {
    CHAR_NAMES
        .iter()
        .find(|(_, c)| *c == value)
        .map(|(n, _)| *n)
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Form::Number(n) => write!(f, "{}", n),
            Form::Text(text) => {
                // Pick a delimiter the payload doesn't contain raw.
                let delim = if text.contains('"') { '\'' } else { '"' };
                write!(f, "{delim}{text}{delim}")
            }
            Form::Boolean(true) => write!(f, "#t"),
            Form::Boolean(false) => write!(f, "#f"),
            Form::Char(value) => match name_for_char(value) {
                Some(name) => write!(f, "#\\{name}"),
                None => write!(f, "#\\{value}"),
            },
            Form::Symbol(symbol) => write!(f, "{symbol}"),
            Form::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}
