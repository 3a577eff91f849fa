//! The comparison pipeline — parse both sides, analyze, diff, bundle.
//!
//! This is the surface the presentation layer calls: strings in, a full
//! [`AnalysisReport`] (or a side-attributed error) out. The pipeline is
//! atomic: a parse failure on either side aborts the whole comparison and
//! no partial result is produced.

use serde::Serialize;

use crate::analyze::{find_duplicates, identical, same_unique_set, unique_count, DuplicateEntry};
use crate::diff::{deep_diff, DiffResult};
use crate::error::{CompareError, Side};
use crate::parse::{parse_and_classify, ExpectedShape, Parsed, Tier};
use crate::value::Value;

/// Parse status and array statistics for one input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideReport {
    /// Which parser tier accepted the input (the parse-status badge).
    pub tier: Tier,
    /// Strict-leaning rewrite of the input for tiers >= 2 (the "auto-fix"
    /// text); `None` when the input was already strict JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
    /// Element count, when the input is a top-level array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub len: Option<usize>,
    /// Distinct-element count, when the input is a top-level array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_count: Option<usize>,
    /// Duplicated elements, when the input is a top-level array.
    pub duplicates: Vec<DuplicateEntry>,
}

impl SideReport {
    fn build(parsed: &Parsed) -> SideReport {
        let (len, unique, duplicates) = match &parsed.value {
            Value::Array(items) => (
                Some(items.len()),
                Some(unique_count(items)),
                find_duplicates(items),
            ),
            _ => (None, None, Vec::new()),
        };
        SideReport {
            tier: parsed.tier,
            normalized: parsed.normalized.clone(),
            len,
            unique_count: unique,
            duplicates,
        }
    }
}

/// Everything the presentation layer renders for one comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub a: SideReport,
    pub b: SideReport,
    /// Positional element-by-element equality; `None` unless both inputs
    /// are top-level arrays.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identical: Option<bool>,
    /// Distinct-element set equality; `None` unless both inputs are
    /// top-level arrays.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub same_unique_set: Option<bool>,
    pub diff: DiffResult,
}

/// Parse both inputs and produce the full analysis.
///
/// Side A parses first; if both sides are invalid, side A's error is the
/// one reported.
pub fn compare(
    text_a: &str,
    text_b: &str,
    shape: ExpectedShape,
) -> Result<AnalysisReport, CompareError> {
    let parsed_a = parse_and_classify(text_a, shape).map_err(|source| CompareError {
        side: Side::A,
        source,
    })?;
    let parsed_b = parse_and_classify(text_b, shape).map_err(|source| CompareError {
        side: Side::B,
        source,
    })?;

    let (identical, same_unique_set) = match (&parsed_a.value, &parsed_b.value) {
        (Value::Array(xa), Value::Array(xb)) => {
            (Some(identical(xa, xb)), Some(same_unique_set(xa, xb)))
        }
        _ => (None, None),
    };

    let diff = deep_diff(&parsed_a.value, &parsed_b.value, "");

    Ok(AnalysisReport {
        a: SideReport::build(&parsed_a),
        b: SideReport::build(&parsed_b),
        identical,
        same_unique_set,
        diff,
    })
}
