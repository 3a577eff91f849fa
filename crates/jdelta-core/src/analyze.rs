//! Array-level statistics: duplicates, unique counts, identity and
//! same-unique-set tests.
//!
//! Everything here reduces to [`canonical_key`] equality. Two elements are
//! "the same" exactly when their canonical keys match, so duplicates and
//! set comparisons are order-insensitive at the element level while staying
//! sensitive to the internal order of nested arrays.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::canonical::canonical_key;
use crate::value::Value;

/// One distinct value occurring more than once in a source array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateEntry {
    /// The first occurrence of the duplicated value.
    pub item: Value,
    /// Total occurrence count, always >= 2.
    pub count: usize,
}

/// Group an array by canonical key and report every key occurring at least
/// twice, in first-encountered order.
pub fn find_duplicates(items: &[Value]) -> Vec<DuplicateEntry> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<(String, Value)> = Vec::new();

    for item in items {
        let key = canonical_key(item);
        let count = counts.entry(key.clone()).or_insert(0);
        if *count == 0 {
            order.push((key, item.clone()));
        }
        *count += 1;
    }

    order
        .into_iter()
        .filter_map(|(key, item)| {
            let count = counts.get(&key).copied().unwrap_or(0);
            (count >= 2).then_some(DuplicateEntry { item, count })
        })
        .collect()
}

/// Number of distinct canonical keys in the array.
pub fn unique_count(items: &[Value]) -> usize {
    items
        .iter()
        .map(canonical_key)
        .collect::<HashSet<_>>()
        .len()
}

/// Positional, order-sensitive equality: same length and matching canonical
/// keys at every index.
pub fn identical(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b.iter())
            .all(|(x, y)| canonical_key(x) == canonical_key(y))
}

/// Whether the two arrays contain the same set of distinct values,
/// ignoring multiplicities and order.
pub fn same_unique_set(a: &[Value], b: &[Value]) -> bool {
    let keys_a: HashSet<String> = a.iter().map(canonical_key).collect();
    let keys_b: HashSet<String> = b.iter().map(canonical_key).collect();
    keys_a == keys_b
}
