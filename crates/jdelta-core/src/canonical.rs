//! Canonical keys and order normalization.
//!
//! [`canonical_key`] folds a value into a string that is equal for two
//! values exactly when this system considers them semantically equal. It
//! underlies every equality test in the engine: duplicate detection, set
//! comparison, scalar change detection and array element matching.
//!
//! [`canonicalize`] is a separate, caller-facing normalization: it sorts
//! object keys (always) and optionally array elements, reporting whether any
//! reordering happened so callers can say "input was reordered before
//! comparison" instead of silently changing meaning.

use serde::Serialize;
use serde_json::Value as Json;

use crate::value::{format_number, Value};

/// Fold a value into its canonical key string.
///
/// Rules:
/// - `null`, `undefined`, `NaN` and the infinities map to distinct sentinel
///   keys that no string or number can produce.
/// - Numbers use canonical decimal form prefixed with `n`, so `2` and `2.0`
///   collide while `2` and `"2"` do not.
/// - Strings are JSON-quoted.
/// - Object keys are sorted lexicographically before folding; insertion
///   order never affects equality.
/// - Array elements fold **in their given order** — this is an identity
///   hash, not a normalization.
pub fn canonical_key(value: &Value) -> String {
    let mut out = String::new();
    fold(value, &mut out);
    out
}

fn fold(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("#null"),
        Value::Undefined => out.push_str("#undefined"),
        Value::NaN => out.push_str("#nan"),
        Value::PosInfinity => out.push_str("#inf+"),
        Value::NegInfinity => out.push_str("#inf-"),
        Value::Bool(true) => out.push_str("#true"),
        Value::Bool(false) => out.push_str("#false"),
        Value::Number(n) => {
            out.push('n');
            out.push_str(&format_number(*n));
        }
        Value::String(s) => out.push_str(&Json::String(s.clone()).to_string()),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                fold(item, out);
            }
            out.push(']');
        }
        Value::Object(fields) => {
            let mut sorted: Vec<&(String, Value)> = fields.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(&b.0));
            out.push('{');
            for (i, (k, v)) in sorted.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Json::String(k.clone()).to_string());
                out.push(':');
                fold(v, out);
            }
            out.push('}');
        }
    }
}

/// Whether [`canonicalize`] should sort array elements.
///
/// Object keys are always sorted (they carry no order semantics); array
/// order is meaningful by default and only sorted when the caller opts into
/// order-insensitive array comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayOrder {
    Preserve,
    Sort,
}

/// Recursively normalize ordering. Returns the normalized value and whether
/// any reordering actually occurred anywhere in the tree.
pub fn canonicalize(value: &Value, order: ArrayOrder) -> (Value, bool) {
    match value {
        Value::Object(fields) => {
            let mut changed = false;
            let mut normalized: Vec<(String, Value)> = fields
                .iter()
                .map(|(k, v)| {
                    let (child, child_changed) = canonicalize(v, order);
                    changed |= child_changed;
                    (k.clone(), child)
                })
                .collect();
            let before: Vec<&String> = normalized.iter().map(|(k, _)| k).collect();
            let mut after = before.clone();
            after.sort();
            if before != after {
                changed = true;
            }
            normalized.sort_by(|a, b| a.0.cmp(&b.0));
            (Value::Object(normalized), changed)
        }
        Value::Array(items) => {
            let mut changed = false;
            let mut normalized: Vec<Value> = items
                .iter()
                .map(|item| {
                    let (child, child_changed) = canonicalize(item, order);
                    changed |= child_changed;
                    child
                })
                .collect();
            if order == ArrayOrder::Sort {
                let keys_before: Vec<String> = normalized.iter().map(canonical_key).collect();
                normalized.sort_by_cached_key(canonical_key);
                let keys_after: Vec<String> = normalized.iter().map(canonical_key).collect();
                if keys_before != keys_after {
                    changed = true;
                }
            }
            (Value::Array(normalized), changed)
        }
        scalar => (scalar.clone(), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(fields: &[(&str, Value)]) -> Value {
        Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn string_never_collides_with_sentinel() {
        assert_ne!(
            canonical_key(&Value::String("#null".to_string())),
            canonical_key(&Value::Null)
        );
        assert_ne!(
            canonical_key(&Value::String("n2".to_string())),
            canonical_key(&Value::Number(2.0))
        );
    }

    #[test]
    fn canonicalize_reports_key_reordering() {
        let v = obj(&[("b", Value::Number(2.0)), ("a", Value::Number(1.0))]);
        let (sorted, changed) = canonicalize(&v, ArrayOrder::Preserve);
        assert!(changed);
        assert_eq!(
            sorted,
            obj(&[("a", Value::Number(1.0)), ("b", Value::Number(2.0))])
        );
    }

    #[test]
    fn canonicalize_sorted_input_is_unchanged() {
        let v = obj(&[("a", Value::Number(1.0)), ("b", Value::Number(2.0))]);
        let (_, changed) = canonicalize(&v, ArrayOrder::Preserve);
        assert!(!changed);
    }
}
