//! Recursive structural diff.
//!
//! [`deep_diff`] compares two values and partitions every decomposition
//! point into `added`, `removed`, `changed` or `same`, each addressed by a
//! path string. It is pure and total: no pair of values makes it fail.
//!
//! Array comparison is two-mode:
//!
//! - **Bag mode** — when every element of both arrays is a scalar, elements
//!   are compared as a multiset of canonical keys. Order-independent and
//!   duplicate-aware; no structural alignment is possible or needed.
//! - **Structural mode** — when either array contains a composite element,
//!   a greedy three-pass alignment pairs elements that moved or were
//!   partially edited, so a one-field change inside a reordered collection
//!   element reports as that one field, not a whole-object replacement.
//!
//! Complexity is O(n*m) per array level. Inputs are human-pasted documents,
//! not bulk datasets.

use serde::Serialize;

use crate::canonical::canonical_key;
use crate::value::Value;

/// Path reported when the comparison root itself is a scalar or a
/// mismatched kind.
pub const ROOT_PATH: &str = "(root)";

/// A single value at a path (used for added/removed/same).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueEntry {
    pub path: String,
    pub value: Value,
}

/// A changed scalar or kind mismatch: both sides at one path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangedEntry {
    pub path: String,
    pub from: Value,
    pub to: Value,
}

/// The four-way partition of all compared decomposition points.
///
/// Enumeration order is deterministic: object keys in union order (side A's
/// insertion order, then B-only keys), array elements by ascending source
/// index. Two runs on the same inputs are byte-identical.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiffResult {
    pub added: Vec<ValueEntry>,
    pub removed: Vec<ValueEntry>,
    pub changed: Vec<ChangedEntry>,
    pub same: Vec<ValueEntry>,
}

impl DiffResult {
    /// Append all four categories of `other`, preserving order.
    pub fn merge(&mut self, other: DiffResult) {
        self.added.extend(other.added);
        self.removed.extend(other.removed);
        self.changed.extend(other.changed);
        self.same.extend(other.same);
    }

    /// True when nothing was added, removed or changed.
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Total number of entries across all four categories.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len() + self.same.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compare two values rooted at `path` (pass `""` for the comparison root;
/// scalar roots report as [`ROOT_PATH`]).
pub fn deep_diff(a: &Value, b: &Value, path: &str) -> DiffResult {
    match (a, b) {
        (Value::Object(fa), Value::Object(fb)) => diff_objects(fa, fb, path),
        (Value::Array(xa), Value::Array(xb)) => diff_arrays(xa, xb, path),
        _ if a.is_scalar() && b.is_scalar() => {
            let mut result = DiffResult::default();
            let at = display_path(path);
            if canonical_key(a) == canonical_key(b) {
                result.same.push(ValueEntry {
                    path: at,
                    value: a.clone(),
                });
            } else {
                result.changed.push(ChangedEntry {
                    path: at,
                    from: a.clone(),
                    to: b.clone(),
                });
            }
            result
        }
        // Kind mismatch (scalar vs composite, array vs object): a single
        // replacement, no recursion.
        _ => {
            let mut result = DiffResult::default();
            result.changed.push(ChangedEntry {
                path: display_path(path),
                from: a.clone(),
                to: b.clone(),
            });
            result
        }
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        ROOT_PATH.to_string()
    } else {
        path.to_string()
    }
}

fn key_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn index_path(path: &str, index: usize) -> String {
    format!("{}[{}]", path, index)
}

/// Synthetic bag-mode path: `<n>` cannot be confused with a positional
/// `[i]` index.
fn bag_path(path: &str, n: usize) -> String {
    format!("{}<{}>", path, n)
}

// ---------------------------------------------------------------------------
// Objects
// ---------------------------------------------------------------------------

/// Union-of-keys recursion: one-sided keys report the whole subtree as
/// added/removed; shared keys recurse and merge all four categories.
fn diff_objects(fa: &[(String, Value)], fb: &[(String, Value)], path: &str) -> DiffResult {
    let mut result = DiffResult::default();

    for (key, va) in fa {
        let child = key_path(path, key);
        match fb.iter().find(|(k, _)| k == key) {
            Some((_, vb)) => result.merge(deep_diff(va, vb, &child)),
            None => result.removed.push(ValueEntry {
                path: child,
                value: va.clone(),
            }),
        }
    }
    for (key, vb) in fb {
        if !fa.iter().any(|(k, _)| k == key) {
            result.added.push(ValueEntry {
                path: key_path(path, key),
                value: vb.clone(),
            });
        }
    }

    result
}

// ---------------------------------------------------------------------------
// Arrays
// ---------------------------------------------------------------------------

fn diff_arrays(xa: &[Value], xb: &[Value], path: &str) -> DiffResult {
    let all_scalar = xa.iter().all(Value::is_scalar) && xb.iter().all(Value::is_scalar);
    if all_scalar {
        bag_diff(xa, xb, path)
    } else {
        structural_diff(xa, xb, path)
    }
}

/// Order-independent, duplicate-aware multiset comparison for flat arrays.
///
/// Per canonical key: `min(countA, countB)` same entries, the excess on
/// either side as removed/added. Keys enumerate in side A's first-occurrence
/// order, then B-only keys in side B's first-occurrence order.
fn bag_diff(xa: &[Value], xb: &[Value], path: &str) -> DiffResult {
    struct Bucket {
        item: Value,
        count_a: usize,
        count_b: usize,
    }

    let mut order: Vec<String> = Vec::new();
    let mut buckets: Vec<Bucket> = Vec::new();

    let mut tally = |items: &[Value], side_a: bool| {
        for item in items {
            let key = canonical_key(item);
            let idx = match order.iter().position(|k| *k == key) {
                Some(idx) => idx,
                None => {
                    order.push(key);
                    buckets.push(Bucket {
                        item: item.clone(),
                        count_a: 0,
                        count_b: 0,
                    });
                    buckets.len() - 1
                }
            };
            if side_a {
                buckets[idx].count_a += 1;
            } else {
                buckets[idx].count_b += 1;
            }
        }
    };
    tally(xa, true);
    tally(xb, false);

    let mut result = DiffResult::default();
    let mut n = 0;
    let mut next_path = |n: &mut usize| {
        let p = bag_path(path, *n);
        *n += 1;
        p
    };

    for bucket in &buckets {
        let shared = bucket.count_a.min(bucket.count_b);
        for _ in 0..shared {
            result.same.push(ValueEntry {
                path: next_path(&mut n),
                value: bucket.item.clone(),
            });
        }
        for _ in 0..bucket.count_a - shared {
            result.removed.push(ValueEntry {
                path: next_path(&mut n),
                value: bucket.item.clone(),
            });
        }
        for _ in 0..bucket.count_b - shared {
            result.added.push(ValueEntry {
                path: next_path(&mut n),
                value: bucket.item.clone(),
            });
        }
    }

    result
}

/// Object keys whose matching values strongly suggest two collection
/// elements are "the same thing".
const IDENTITY_KEYS: [&str; 4] = ["id", "key", "name", "type"];
const IDENTITY_BONUS: usize = 10;

/// Greedy three-pass alignment for arrays with composite elements.
///
/// 1. Exact pairing by canonical key (first unconsumed match in B); the pair
///    recurses, which for equal values yields leaf-level same entries.
/// 2. Similarity-scored pairing between remaining same-kind composites; the
///    best-scoring pair recurses at the A element's path, so a moved-and-
///    edited element reports only its actual edits.
/// 3. Everything still unconsumed is removed (A) or added (B).
fn structural_diff(xa: &[Value], xb: &[Value], path: &str) -> DiffResult {
    let mut result = DiffResult::default();
    let mut used_a = vec![false; xa.len()];
    let mut used_b = vec![false; xb.len()];

    let keys_a: Vec<String> = xa.iter().map(canonical_key).collect();
    let keys_b: Vec<String> = xb.iter().map(canonical_key).collect();

    // Pass 1: exact matches, including moved and duplicated elements.
    for i in 0..xa.len() {
        if let Some(j) = (0..xb.len()).find(|&j| !used_b[j] && keys_b[j] == keys_a[i]) {
            used_a[i] = true;
            used_b[j] = true;
            result.merge(deep_diff(&xa[i], &xb[j], &index_path(path, i)));
        }
    }

    // Pass 2: similarity pairing for restructured composites. A strictly
    // higher score wins; ties keep the earliest B index; zero-similarity
    // candidates never pair (they fall through to pass 3).
    for i in 0..xa.len() {
        if used_a[i] || xa[i].is_scalar() {
            continue;
        }
        let mut best: Option<(usize, usize)> = None; // (score, j)
        for j in 0..xb.len() {
            if used_b[j] {
                continue;
            }
            let score = match (&xa[i], &xb[j]) {
                (Value::Object(fa), Value::Object(fb)) => object_similarity(fa, fb),
                (Value::Array(ia), Value::Array(ib)) => array_similarity(ia, ib),
                _ => continue,
            };
            if score > 0 && best.is_none_or(|(s, _)| score > s) {
                best = Some((score, j));
            }
        }
        if let Some((_, j)) = best {
            used_a[i] = true;
            used_b[j] = true;
            result.merge(deep_diff(&xa[i], &xb[j], &index_path(path, i)));
        }
    }

    // Pass 3: leftovers.
    for i in 0..xa.len() {
        if !used_a[i] {
            result.removed.push(ValueEntry {
                path: index_path(path, i),
                value: xa[i].clone(),
            });
        }
    }
    for j in 0..xb.len() {
        if !used_b[j] {
            result.added.push(ValueEntry {
                path: index_path(path, j),
                value: xb[j].clone(),
            });
        }
    }

    result
}

/// Shared-key count, plus a fixed bonus per identifier-like key whose
/// values match by canonical key. The bonus makes `{id:1,name:"a"}` pair
/// with `{id:1,name:"b"}` over an unrelated object with more overlap.
fn object_similarity(fa: &[(String, Value)], fb: &[(String, Value)]) -> usize {
    let mut score = 0;
    for (key, va) in fa {
        let Some((_, vb)) = fb.iter().find(|(k, _)| k == key) else {
            continue;
        };
        score += 1;
        if IDENTITY_KEYS.contains(&key.as_str()) && canonical_key(va) == canonical_key(vb) {
            score += IDENTITY_BONUS;
        }
    }
    score
}

/// Count of shared positions (below the shorter length) whose elements
/// match by canonical key.
fn array_similarity(ia: &[Value], ib: &[Value]) -> usize {
    ia.iter()
        .zip(ib.iter())
        .filter(|(a, b)| canonical_key(a) == canonical_key(b))
        .count()
}
