//! Splitting an input line into words.
//!
//! Quoting follows POSIX shell word rules without any expansion: single
//! quotes are literal, double quotes allow `\"` and `\\`, and a backslash
//! outside quotes escapes the next character.

use thiserror::Error;

/// Errors produced by [`tokenize`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenizeError {
    /// A quote was opened and never closed.
    #[error("No closing quotation")]
    UnterminatedQuote,

    /// The line ended with an unescaped backslash.
    #[error("No escaped character")]
    TrailingEscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Between,
    Word,
    Single,
    Double,
}

/// Splits a line into words using POSIX quoting rules.
///
/// # Errors
///
/// Returns `TokenizeError` for an unterminated quote or a trailing backslash.
pub fn tokenize(line: &str) -> Result<Vec<String>, TokenizeError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut state = State::Between;
    let mut chars = line.chars();

    while let Some(character) = chars.next() {
        match state {
            State::Between | State::Word => match character {
                c if c.is_whitespace() => {
                    if state == State::Word {
                        words.push(std::mem::take(&mut current));
                        state = State::Between;
                    }
                }
                '\'' => state = State::Single,
                '"' => state = State::Double,
                '\\' => {
                    current.push(chars.next().ok_or(TokenizeError::TrailingEscape)?);
                    state = State::Word;
                }
                c => {
                    current.push(c);
                    state = State::Word;
                }
            },
            State::Single => match character {
                '\'' => state = State::Word,
                c => current.push(c),
            },
            State::Double => match character {
                '"' => state = State::Word,
                '\\' => match chars.next() {
                    Some(escaped @ ('"' | '\\')) => current.push(escaped),
                    Some(other) => {
                        current.push('\\');
                        current.push(other);
                    }
                    None => return Err(TokenizeError::UnterminatedQuote),
                },
                c => current.push(c),
            },
        }
    }

    match state {
        State::Single | State::Double => Err(TokenizeError::UnterminatedQuote),
        State::Word => {
            words.push(current);
            Ok(words)
        }
        State::Between => Ok(words),
    }
}

/// Splits a line into words, falling back to plain whitespace splitting
/// when the quoting is malformed.
pub fn split_words(line: &str) -> Vec<String> {
    tokenize(line).unwrap_or_else(|error| {
        tracing::debug!(%error, "Falling back to whitespace splitting");
        line.split_whitespace().map(str::to_string).collect()
    })
}
