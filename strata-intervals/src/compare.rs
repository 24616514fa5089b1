//! Comparator composition helper
//!
//! Orders values by an ordered sequence of comparison functions, applying
//! each in turn until one reports an imbalance.

use std::cmp::Ordering;

/// Compare `a` and `b` by each comparator in order, short-circuiting at the
/// first non-equal result. An empty slice compares everything as equal.
pub fn chain_comparing<T>(a: &T, b: &T, comparators: &[&dyn Fn(&T, &T) -> Ordering]) -> Ordering {
    comparators
        .iter()
        .map(|cmp| cmp(a, b))
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}
