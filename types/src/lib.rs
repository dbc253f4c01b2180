//! Core domain types for amplitude checking.
//!
//! This crate contains pure domain types with no IO and minimal dependencies.
//! Everything here can be used from any layer of the application: the
//! validator produces [`ValidationError`], the edit history stores
//! [`Snapshot`], and front ends render both.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod complex;
mod snapshot;
mod text;

pub use complex::{NonFiniteError, format_complex};
pub use snapshot::Snapshot;
pub use text::{single_line, truncate_to_fit, truncate_with_ellipsis};

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest token rendered inside a user-facing diagnostic.
const MAX_TOKEN_DISPLAY: usize = 48;

// ============================================================================
// Validation Errors
// ============================================================================

/// Closed set of reasons an amplitude expression is rejected.
///
/// The numeric values are stable and are what front ends key their messages
/// on; they must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ErrorCode {
    /// A node kind outside the whitelist (matrix, assignment, ...).
    UnsupportedNode = 1,
    /// An identifier that is neither a whitelisted constant nor a callee.
    FreeVariable = 2,
    /// A call to a function that is not whitelisted.
    UnknownFunction = 3,
    /// A whitelisted function called with the wrong number of arguments.
    WrongArity = 4,
    /// The parser could not produce a tree at all.
    Incomplete = 5,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 5] = [
        ErrorCode::UnsupportedNode,
        ErrorCode::FreeVariable,
        ErrorCode::UnknownFunction,
        ErrorCode::WrongArity,
        ErrorCode::Incomplete,
    ];

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(ErrorCode::UnsupportedNode),
            2 => Some(ErrorCode::FreeVariable),
            3 => Some(ErrorCode::UnknownFunction),
            4 => Some(ErrorCode::WrongArity),
            5 => Some(ErrorCode::Incomplete),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::UnsupportedNode => "unsupported_node",
            ErrorCode::FreeVariable => "free_variable",
            ErrorCode::UnknownFunction => "unknown_function",
            ErrorCode::WrongArity => "wrong_arity",
            ErrorCode::Incomplete => "incomplete",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected expression: which rule fired and the token that triggered it.
///
/// For [`ErrorCode::Incomplete`] the token carries the parser's reason. It is
/// never empty but front ends are not expected to show it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationError {
    code: ErrorCode,
    token: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(code: ErrorCode, token: impl Into<String>) -> Self {
        Self {
            code,
            token: token.into(),
        }
    }

    #[must_use]
    pub fn unsupported_node(token: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnsupportedNode, token)
    }

    #[must_use]
    pub fn free_variable(token: impl Into<String>) -> Self {
        Self::new(ErrorCode::FreeVariable, token)
    }

    #[must_use]
    pub fn unknown_function(token: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnknownFunction, token)
    }

    #[must_use]
    pub fn wrong_arity(token: impl Into<String>) -> Self {
        Self::new(ErrorCode::WrongArity, token)
    }

    /// Parser failure. An empty reason is replaced so the token stays non-empty.
    #[must_use]
    pub fn incomplete(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        if reason.trim().is_empty() {
            Self::new(ErrorCode::Incomplete, "incomplete expression")
        } else {
            Self::new(ErrorCode::Incomplete, reason)
        }
    }

    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// User-facing explanation, keyed by code.
    #[must_use]
    pub fn message(&self) -> String {
        let token = truncate_with_ellipsis(&single_line(&self.token), MAX_TOKEN_DISPLAY);
        match self.code {
            ErrorCode::UnsupportedNode => format!(
                "Illegal expression detected. Not all mathematics is supported at this time. Please remove: {token}."
            ),
            ErrorCode::FreeVariable => format!(
                "A disallowed symbol has been detected. Variables are not supported. Please remove or rewrite: {token}."
            ),
            ErrorCode::UnknownFunction => format!("Function {token} is not allowed."),
            ErrorCode::WrongArity => {
                format!("Function {token} has too many or too few arguments.")
            }
            ErrorCode::Incomplete => "Unfinished expression detected.".to_string(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl Error for ValidationError {}

/// Outcome of validating one input: `None` means accepted.
pub type ValidationResult = Option<ValidationError>;
