use thiserror::Error;

use crate::{parser::QueryParser, structure::Clause};

/// Reverse engineering is all-or-nothing: one error for the whole statement.
///
/// `start` and `end` are byte offsets into the original SQL text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "ParseError: {message}{}\n  at [{start}:{end}] -> '{text}'",
    .clause.map(|clause| format!(" (in {clause})")).unwrap_or_default()
)]
pub struct ParseError {
    pub message: String,
    pub clause: Option<Clause>,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl ParseError {
    pub fn new(message: &str, pivot: usize, parser: &QueryParser) -> Self {
        Self {
            message: message.to_string(),
            clause: parser.phase.clause(),
            text: parser.text_from_range(pivot, parser.position + 1),
            start: parser.absolute(pivot),
            end: parser.absolute(parser.position),
        }
    }

    /// Error over an explicit fragment; `start` is absolute.
    pub fn at(message: &str, clause: Option<Clause>, text: &str, start: usize) -> Self {
        Self {
            message: message.to_string(),
            clause,
            text: text.to_string(),
            start,
            end: start + text.len(),
        }
    }

    pub fn err<T>(self) -> Result<T, ParseError> {
        Err(self)
    }
}
