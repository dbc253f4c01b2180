//! Parse failures.

use thiserror::Error;

/// Why an input string could not be turned into a [`Node`](crate::Node).
///
/// Offsets are byte offsets into the original input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unexpected {found} at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },

    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error("unexpected {found} after end of expression at offset {offset}")]
    TrailingInput { found: String, offset: usize },

    #[error("cannot assign to {target}")]
    InvalidAssignment { target: String },

    #[error("expression nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}

impl ParseError {
    /// Byte offset the error points at, when it has one.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedToken { offset, .. }
            | ParseError::UnexpectedChar { offset, .. }
            | ParseError::UnterminatedString { offset }
            | ParseError::TrailingInput { offset, .. } => Some(*offset),
            ParseError::UnexpectedEnd
            | ParseError::InvalidAssignment { .. }
            | ParseError::TooDeep { .. } => None,
        }
    }
}
