use std::collections::BTreeMap;

use crate::analyzers::types::Mode;
use crate::error::{BikeshareError, Result};
use crate::records::TripCollection;

/// Counts occurrences of each key, ordered by key.
pub fn counts<K: Ord, I: IntoIterator<Item = K>>(items: I) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

/// Most frequent key. Ties go to the smallest key. Returns `None` for empty input.
pub fn mode<K: Ord, I: IntoIterator<Item = K>>(items: I) -> Option<Mode<K>> {
    let mut best: Option<Mode<K>> = None;
    // ascending key order, so only a strictly higher count replaces the leader
    for (value, count) in counts(items) {
        if best.as_ref().is_none_or(|b| count > b.count) {
            best = Some(Mode { value, count });
        }
    }
    best
}

/// Fails with [`BikeshareError::EmptyResult`] if `trips` is empty.
pub fn require_trips(trips: &TripCollection, statistic: &'static str) -> Result<()> {
    if trips.is_empty() {
        Err(BikeshareError::EmptyResult { statistic })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_sorted_by_key() {
        let c = counts(["b", "a", "b", "c"]);
        assert_eq!(c.into_iter().collect::<Vec<_>>(), vec![("a", 1), ("b", 2), ("c", 1)]);
    }

    #[test]
    fn test_mode_basic() {
        assert_eq!(mode(["A", "B", "A"]), Some(Mode { value: "A", count: 2 }));
    }

    #[test]
    fn test_mode_tie_goes_to_smallest_key() {
        assert_eq!(mode([3, 1, 3, 1, 2]), Some(Mode { value: 1, count: 2 }));
        assert_eq!(mode(["Tuesday", "Monday"]).unwrap().value, "Monday");
    }

    #[test]
    fn test_mode_order_independent() {
        let forward = vec![5, 7, 7, 2, 5, 9, 7];
        let mut backward = forward.clone();
        backward.reverse();
        assert_eq!(mode(forward), mode(backward));
    }

    #[test]
    fn test_mode_empty() {
        assert_eq!(mode(Vec::<u32>::new()), None);
    }
}
