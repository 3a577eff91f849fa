//! # jdelta-core
//!
//! Tolerant parsing and structural diffing for JSON-like documents.
//!
//! Two pasted documents rarely differ the way a positional comparison
//! assumes: keys get reordered, array elements move, collection entries are
//! renamed but keep their identity. jdelta parses a superset of JSON
//! (single quotes, unquoted keys, trailing commas, `undefined`, `NaN`,
//! `Infinity`), defines equality through canonical keys, and diffs
//! recursively with move-aware array alignment.
//!
//! ## Quick start
//!
//! ```rust
//! use jdelta_core::{compare, ExpectedShape};
//!
//! let report = compare(
//!     "{x: 1, y: 2}",          // relaxed syntax is fine
//!     r#"{"x": 1, "z": 3}"#,
//!     ExpectedShape::ObjectOrArray,
//! ).unwrap();
//!
//! assert_eq!(report.diff.same.len(), 1);    // x
//! assert_eq!(report.diff.removed.len(), 1); // y
//! assert_eq!(report.diff.added.len(), 1);   // z
//! ```
//!
//! ## Modules
//!
//! - [`value`] — the `Value` tagged union (JSON plus `undefined`/`NaN`/infinities)
//! - [`parse`] — three-tier tolerant parser (strict / normalized / literal)
//! - [`canonical`] — canonical keys and order normalization
//! - [`analyze`] — duplicates, unique counts, identity, same-unique-set
//! - [`diff`] — the recursive diff algorithm
//! - [`report`] — the `compare` pipeline and `AnalysisReport`
//! - [`error`] — error types

pub mod analyze;
pub mod canonical;
pub mod diff;
pub mod error;
pub mod parse;
pub mod report;
pub mod value;

pub use analyze::{find_duplicates, identical, same_unique_set, unique_count, DuplicateEntry};
pub use canonical::{canonical_key, canonicalize, ArrayOrder};
pub use diff::{deep_diff, ChangedEntry, DiffResult, ValueEntry, ROOT_PATH};
pub use error::{CompareError, ParseError, Result, Side};
pub use parse::{parse, parse_and_classify, ExpectedShape, Parsed, Tier};
pub use report::{compare, AnalysisReport, SideReport};
pub use value::Value;
