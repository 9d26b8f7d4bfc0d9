//! Frequency analysis over [`ChainingMap`].

use core::hash::Hash;

use crate::chaining::ChainingMap;

/// Returns the most frequent element(s) of `values` together with their
/// frequency.
///
/// Counts occurrences in a fresh default-capacity [`ChainingMap`], then
/// scans one key/value snapshot for the maximum. When several elements
/// tie for the maximum, all of them are returned, in the snapshot's
/// bucket-then-chain order rather than input order. An empty input yields
/// `(vec![], 0)`.
pub fn find_mode<T>(values: &[T]) -> (Vec<T>, usize)
where
    T: Eq + Hash + Clone,
{
    let mut counts: ChainingMap<T, usize> = ChainingMap::new();
    for value in values {
        let current = counts.get(value).copied().unwrap_or(0);
        counts.put(value.clone(), current + 1);
    }

    let mut modes = Vec::new();
    let mut highest = 0;
    for (value, frequency) in counts.get_keys_and_values() {
        if frequency > highest {
            highest = frequency;
            modes.clear();
            modes.push(value);
        } else if frequency == highest {
            modes.push(value);
        }
    }
    (modes, highest)
}
