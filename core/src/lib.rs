//! Core domain logic for amplitude input.
//!
//! Two independent pieces:
//!
//! - [`validate`] / [`Validator`]: whitelist checking of parsed expressions,
//!   configured by a [`Whitelist`].
//! - [`History`]: the undo/redo chain of committed (alpha, beta) pairs.
//!
//! Both are synchronous and in-memory. The validator holds no mutable state
//! and is safe to call on every keystroke.

mod history;
mod validator;
mod whitelist;

pub use history::{History, HistoryError};
pub use validator::{Validator, check, validate};
pub use whitelist::Whitelist;
