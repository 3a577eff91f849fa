//! Error types for parsing and comparison.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Errors from the tolerant parser. All are terminal for the current
/// comparison attempt; the caller re-invokes after the user edits input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input was empty or whitespace-only. Checked before any parse
    /// tier is attempted.
    #[error("input is empty")]
    EmptyInput,

    /// All three parser tiers were exhausted. The message comes from the
    /// strict-JSON attempt, which has the most precise position info.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// Array-comparison mode requires a top-level array.
    #[error("expected a top-level array, found {0}")]
    NotAnArray(&'static str),

    /// Object-comparison mode requires a top-level object or array.
    #[error("expected a top-level object or array, found {0}")]
    NotAnObjectOrArray(&'static str),
}

/// Which input of a two-sided comparison an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => f.write_str("A"),
            Side::B => f.write_str("B"),
        }
    }
}

/// A parse failure during [`crate::compare`], attributed to one side.
///
/// A failure on either side aborts the whole comparison; no partial
/// result is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("input {side} failed to parse: {source}")]
pub struct CompareError {
    pub side: Side,
    #[source]
    pub source: ParseError,
}

/// Convenience alias used throughout jdelta-core.
pub type Result<T, E = ParseError> = std::result::Result<T, E>;
