//! Time grains and bucket alignment
//!
//! The volatility service never does grain math itself; it consumes the
//! [`BucketAligner`] contract. [`TimeGrain`] is the standard implementation
//! over natural UTC boundaries.

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use strata_intervals::Interval;

/// Produces the grain-aligned bucket cover of a raw requested interval.
///
/// Contract: the returned sequence is ordered ascending, gap-free, and
/// overlap-free; every bucket starts and ends on a natural grain boundary;
/// the buckets fully cover the input (the first may start before it, the
/// last may end after it).
pub trait BucketAligner {
    /// Snap an instant down to the nearest grain boundary at or before it.
    fn round_floor(&self, instant: DateTime<Utc>) -> DateTime<Utc>;

    /// Snap an instant up to the nearest grain boundary at or after it.
    /// An instant already on a boundary maps to itself.
    fn round_ceil(&self, instant: DateTime<Utc>) -> DateTime<Utc>;

    /// The ordered sequence of aligned buckets covering `interval`.
    fn buckets(&self, interval: &Interval) -> Vec<Interval>;
}

/// Standard time grains over UTC boundaries.
///
/// Days roll at UTC midnight, weeks start Monday (ISO), months on the 1st.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeGrain {
    Hour,
    Day,
    Week,
    Month,
}

impl TimeGrain {
    /// The boundary immediately after `boundary`, which must itself be a
    /// boundary of this grain.
    fn next_boundary(&self, boundary: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            TimeGrain::Hour => boundary + Duration::hours(1),
            TimeGrain::Day => boundary + Duration::days(1),
            TimeGrain::Week => boundary + Duration::days(7),
            TimeGrain::Month => {
                // Overshoot past the month end, then snap back to the 1st.
                let date = boundary.date_naive() + Duration::days(32);
                let month_start = date - Duration::days(date.day0() as i64);
                Utc.from_utc_datetime(&month_start.and_time(NaiveTime::MIN))
            }
        }
    }
}

impl BucketAligner for TimeGrain {
    fn round_floor(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        let date = instant.date_naive();
        let floored = match self {
            TimeGrain::Hour => {
                date.and_time(NaiveTime::MIN) + Duration::hours(instant.hour() as i64)
            }
            TimeGrain::Day => date.and_time(NaiveTime::MIN),
            TimeGrain::Week => {
                let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
                monday.and_time(NaiveTime::MIN)
            }
            TimeGrain::Month => (date - Duration::days(date.day0() as i64)).and_time(NaiveTime::MIN),
        };
        Utc.from_utc_datetime(&floored)
    }

    fn round_ceil(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        let floored = self.round_floor(instant);
        if floored == instant {
            instant
        } else {
            self.next_boundary(floored)
        }
    }

    fn buckets(&self, interval: &Interval) -> Vec<Interval> {
        let mut buckets = Vec::new();
        let mut cursor = self.round_floor(interval.start());
        while cursor < interval.end() {
            let next = self.next_boundary(cursor);
            buckets.push(Interval::new(cursor, next).expect("grain boundary must advance"));
            cursor = next;
        }
        buckets
    }
}
