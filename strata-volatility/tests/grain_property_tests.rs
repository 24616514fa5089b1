//! Property-Based Tests for Grain Alignment and Volatility Resolution
//!
//! Properties under test:
//! - Floor/ceil bracket the instant and are idempotent on boundaries
//! - A bucket cover is ordered, gap-free, boundary-aligned, and covers the
//!   request
//! - The resolved volatile set is a subset of both the query's bucket cover
//!   and the source's volatile set

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use strata_intervals::{Interval, SimplifiedIntervalList};
use strata_volatility::{
    BucketAligner, FnBackedSource, GranularQuery, IntervalQuery, SourceVolatileIntervalsService,
    TimeGrain, VolatileIntervalsFn, VolatileIntervalsService, VolatilityUnavailableError,
};

fn instant(hours: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hours)
}

fn arb_grain() -> impl Strategy<Value = TimeGrain> {
    prop_oneof![
        Just(TimeGrain::Hour),
        Just(TimeGrain::Day),
        Just(TimeGrain::Week),
        Just(TimeGrain::Month),
    ]
}

/// Arbitrary intervals on an hourly lattice, long enough to span several
/// buckets at the coarser grains.
fn arb_interval() -> impl Strategy<Value = Interval> {
    (0i64..1440, 1i64..720).prop_map(|(start, len)| {
        Interval::new(instant(start), instant(start + len)).unwrap()
    })
}

fn arb_list() -> impl Strategy<Value = SimplifiedIntervalList> {
    prop::collection::vec(arb_interval(), 0..6).prop_map(SimplifiedIntervalList::from_intervals)
}

/// Provider returning a fixed snapshot.
struct FixedVolatility(SimplifiedIntervalList);

impl VolatileIntervalsFn for FixedVolatility {
    fn volatile_intervals(&self) -> Result<SimplifiedIntervalList, VolatilityUnavailableError> {
        Ok(self.0.clone())
    }
}

proptest! {
    #[test]
    fn floor_and_ceil_bracket_the_instant(grain in arb_grain(), hours in 0i64..2400) {
        let t = instant(hours);
        let floor = grain.round_floor(t);
        let ceil = grain.round_ceil(t);

        prop_assert!(floor <= t);
        prop_assert!(t <= ceil);
        // Boundaries are fixed points.
        prop_assert_eq!(grain.round_floor(floor), floor);
        prop_assert_eq!(grain.round_ceil(ceil), ceil);
    }

    #[test]
    fn bucket_cover_is_aligned_gap_free_and_covering(
        grain in arb_grain(),
        interval in arb_interval(),
    ) {
        let buckets = grain.buckets(&interval);

        prop_assert!(!buckets.is_empty());
        prop_assert_eq!(buckets[0].start(), grain.round_floor(interval.start()));
        prop_assert_eq!(
            buckets.last().unwrap().end(),
            grain.round_ceil(interval.end())
        );
        for pair in buckets.windows(2) {
            prop_assert_eq!(pair[0].end(), pair[1].start());
        }
        for bucket in &buckets {
            prop_assert_eq!(grain.round_floor(bucket.start()), bucket.start());
            prop_assert_eq!(grain.round_floor(bucket.end()), bucket.end());
        }
    }

    #[test]
    fn resolved_volatility_is_subset_of_both_inputs(
        grain in arb_grain(),
        requested in arb_list(),
        volatile in arb_list(),
    ) {
        let query = IntervalQuery::new(requested, grain);
        let source = FnBackedSource::new("events", FixedVolatility(volatile.clone()));

        let result = SourceVolatileIntervalsService
            .get_volatile_intervals(&query, &source)
            .unwrap();

        prop_assert!(query.bucketed_intervals().contains_list(&result));
        prop_assert!(volatile.contains_list(&result));
    }

    #[test]
    fn empty_volatility_never_flags_buckets(grain in arb_grain(), requested in arb_list()) {
        let query = IntervalQuery::new(requested, grain);
        let source = FnBackedSource::new("events", FixedVolatility(SimplifiedIntervalList::empty()));

        let result = SourceVolatileIntervalsService
            .get_volatile_intervals(&query, &source)
            .unwrap();
        prop_assert!(result.is_empty());
    }
}
