//! Free-form composition text parser.
//!
//! Accepts `Fe:50, C:50`, `Fe = 50; C = 50`, one pair per line, and
//! dictionary-like text such as `{"Fe": 50, 'C': 50}`. Quotes, braces and
//! delimiters are insignificant, as is a `%` directly after a number; only
//! `symbol separator number` triples matter.

use crate::common::canonical_symbol;
use crate::domain::{Composition, CompositionEntry, ConversionError, ParserResult};

const FORMAT_HINT: &str = "use a format like: Fe:50, C:50";

#[derive(Debug, Clone, PartialEq)]
pub enum CompositionToken {
    Symbol { text: String, position: usize },
    Separator { position: usize },
    Number { text: String, position: usize },
}

impl CompositionToken {
    fn position(&self) -> usize {
        match self {
            Self::Symbol { position, .. }
            | Self::Separator { position }
            | Self::Number { position, .. } => *position,
        }
    }
}

pub fn tokenize_composition(source: &str) -> ParserResult<Vec<CompositionToken>> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(position, c)) = chars.peek() {
        if is_insignificant(c) {
            chars.next();
        } else if c == ':' || c == '=' {
            chars.next();
            tokens.push(CompositionToken::Separator { position });
        } else if c.is_ascii_alphabetic() {
            let mut text = String::new();
            while let Some(&(_, next)) = chars.peek() {
                if !next.is_ascii_alphabetic() {
                    break;
                }
                text.push(next);
                chars.next();
            }
            tokens.push(CompositionToken::Symbol { text, position });
        } else if c.is_ascii_digit() || matches!(c, '.' | '+' | '-') {
            let mut text = String::new();
            let mut previous = None;
            while let Some(&(_, next)) = chars.peek() {
                let sign = matches!(next, '+' | '-')
                    && (text.is_empty() || matches!(previous, Some('e' | 'E')));
                let exponent = matches!(next, 'e' | 'E')
                    && !text.is_empty()
                    && exponent_follows(source, position + text.len() + 1);
                let continues = next.is_ascii_digit() || next == '.' || sign || exponent;
                if !continues {
                    break;
                }
                text.push(next);
                previous = Some(next);
                chars.next();
            }
            if chars.peek().is_some_and(|&(_, next)| next == '%') {
                chars.next();
            }
            tokens.push(CompositionToken::Number { text, position });
        } else {
            return Err(ConversionError::malformed_input(format!(
                "unexpected character '{}' at position {}; {}",
                c,
                position + 1,
                FORMAT_HINT
            )));
        }
    }

    Ok(tokens)
}

pub fn parse_composition(source: &str) -> ParserResult<Composition> {
    if source.trim().is_empty() {
        return Err(ConversionError::malformed_input(
            "composition input is empty; please enter composition data",
        ));
    }

    let tokens = tokenize_composition(source)?;
    let mut entries = Vec::new();
    let mut iter = tokens.into_iter();

    while let Some(token) = iter.next() {
        let (text, position) = match token {
            CompositionToken::Symbol { text, position } => (text, position),
            other => {
                return Err(ConversionError::malformed_input(format!(
                    "expected an element symbol at position {}; {}",
                    other.position() + 1,
                    FORMAT_HINT
                )));
            }
        };

        let symbol = canonical_symbol(&text);
        let label = symbol.as_deref().unwrap_or(&text);

        match iter.next() {
            Some(CompositionToken::Separator { .. }) => {}
            _ => {
                return Err(ConversionError::malformed_input(format!(
                    "expected ':' or '=' after '{}' at position {}; {}",
                    label,
                    position + 1,
                    FORMAT_HINT
                )));
            }
        }

        let Some(CompositionToken::Number { text: value, .. }) = iter.next() else {
            return Err(ConversionError::malformed_input(format!(
                "missing percentage for '{}'; {}",
                label, FORMAT_HINT
            )));
        };

        let percent = value.parse::<f64>().map_err(|_| {
            ConversionError::malformed_input(format!(
                "invalid percentage '{}' for '{}'",
                value, label
            ))
        })?;

        // A well-formed pair whose name is too long to be a symbol, e.g. `Iron:100`.
        let symbol = symbol.ok_or_else(|| ConversionError::unknown_element(&text))?;

        entries.push(CompositionEntry::new(symbol, percent));
    }

    if entries.is_empty() {
        return Err(ConversionError::malformed_input(format!(
            "unrecognized format; {}",
            FORMAT_HINT
        )));
    }

    Ok(Composition::new(entries))
}

fn is_insignificant(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | ';' | '{' | '}' | '"' | '\'')
}

/// True when the character after an `e` at `index` starts an exponent.
fn exponent_follows(source: &str, index: usize) -> bool {
    let mut rest = source[index.min(source.len())..].chars();
    match rest.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('+' | '-') => rest.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}
