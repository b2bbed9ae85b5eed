use std::collections::BTreeMap;

use crate::analyzers::types::{Mode, ValueCount};

/// Counts occurrences of each value.
pub fn frequencies<K: Ord>(values: impl IntoIterator<Item = K>) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    counts
}

/// Returns the most frequent value, or `None` for empty input.
///
/// Ties go to the smallest value in `K`'s ordering: the map is scanned in
/// ascending key order and only a strictly greater count replaces the leader.
pub fn mode<K: Ord>(values: impl IntoIterator<Item = K>) -> Option<Mode<K>> {
    let mut best: Option<Mode<K>> = None;
    for (value, count) in frequencies(values) {
        if best.as_ref().is_none_or(|b| count > b.count) {
            best = Some(Mode { value, count });
        }
    }
    best
}

/// Frequency table sorted by count descending, then value ascending.
pub fn value_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<ValueCount> {
    let mut table: Vec<ValueCount> = frequencies(values)
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect();
    table.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    table
}
