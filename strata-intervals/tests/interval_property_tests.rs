//! Property-Based Tests for the Canonical Interval Algebra
//!
//! Properties under test:
//! - Canonicalization is idempotent
//! - Every produced list satisfies the no-overlap/no-abutment invariant
//! - Union is commutative and associative
//! - Intersection results are subsets of both operands
//! - The canonical string form round-trips losslessly

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use strata_intervals::{Interval, SimplifiedIntervalList};

fn instant(hours: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hours)
}

/// Strategy producing arbitrary valid intervals on an hourly lattice.
///
/// A coarse lattice keeps collisions (overlaps, abutments, duplicates) common
/// enough that the merge paths are actually exercised.
fn arb_interval() -> impl Strategy<Value = Interval> {
    (0i64..720, 1i64..48).prop_map(|(start, len)| {
        Interval::new(instant(start), instant(start + len)).unwrap()
    })
}

fn arb_interval_vec() -> impl Strategy<Value = Vec<Interval>> {
    prop::collection::vec(arb_interval(), 0..12)
}

fn arb_list() -> impl Strategy<Value = SimplifiedIntervalList> {
    arb_interval_vec().prop_map(SimplifiedIntervalList::from_intervals)
}

proptest! {
    #[test]
    fn canonicalization_is_idempotent(intervals in arb_interval_vec()) {
        let once = SimplifiedIntervalList::from_intervals(intervals);
        let twice = SimplifiedIntervalList::from_intervals(once.iter().copied());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn from_intervals_output_is_canonical(intervals in arb_interval_vec()) {
        let list = SimplifiedIntervalList::from_intervals(intervals);
        for pair in list.as_slice().windows(2) {
            prop_assert!(pair[0].end() < pair[1].start());
        }
    }

    #[test]
    fn set_operations_preserve_canonical_form(a in arb_list(), b in arb_list()) {
        for produced in [a.union(&b), a.intersect(&b), a.subtract(&b)] {
            for pair in produced.as_slice().windows(2) {
                prop_assert!(pair[0].end() < pair[1].start());
            }
        }
    }

    #[test]
    fn union_is_commutative(a in arb_list(), b in arb_list()) {
        prop_assert_eq!(a.union(&b), b.union(&a));
    }

    #[test]
    fn union_is_associative(a in arb_list(), b in arb_list(), c in arb_list()) {
        prop_assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
    }

    #[test]
    fn union_covers_both_operands(a in arb_list(), b in arb_list()) {
        let u = a.union(&b);
        prop_assert!(u.contains_list(&a));
        prop_assert!(u.contains_list(&b));
    }

    #[test]
    fn intersection_is_subset_of_both(a in arb_list(), b in arb_list()) {
        let shared = a.intersect(&b);
        prop_assert!(a.contains_list(&shared));
        prop_assert!(b.contains_list(&shared));
    }

    #[test]
    fn intersection_is_commutative(a in arb_list(), b in arb_list()) {
        prop_assert_eq!(a.intersect(&b), b.intersect(&a));
    }

    #[test]
    fn subtraction_removes_all_of_other(a in arb_list(), b in arb_list()) {
        let remainder = a.subtract(&b);
        prop_assert!(a.contains_list(&remainder));
        prop_assert!(remainder.intersect(&b).is_empty());
    }

    #[test]
    fn subtraction_and_intersection_partition(a in arb_list(), b in arb_list()) {
        // A = (A - B) ∪ (A ∩ B)
        let rebuilt = a.subtract(&b).union(&a.intersect(&b));
        prop_assert_eq!(rebuilt, a);
    }

    #[test]
    fn canonical_string_round_trips(list in arb_list()) {
        let serialized = list.to_string();
        let parsed: SimplifiedIntervalList = serialized.parse().unwrap();
        prop_assert_eq!(parsed, list);
    }

    #[test]
    fn contains_instant_matches_linear_scan(list in arb_list(), probe in 0i64..800) {
        let t = instant(probe);
        let linear = list.iter().any(|iv| iv.contains_instant(t));
        prop_assert_eq!(list.contains_instant(t), linear);
    }
}
