//! Half-open time intervals
//!
//! `Interval` is the atom of the interval algebra: an immutable `[start, end)`
//! range over UTC instants with a total ordering by start then end. Ranges are
//! half-open so that a bucket ending at midnight and a bucket starting at
//! midnight share no instant.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::compare::chain_comparing;
use crate::error::InvalidIntervalError;

/// A half-open time range `[start, end)` over UTC instants.
///
/// Immutable value type: constructed once, validated at construction
/// (`start < end`, zero-length ranges are rejected), never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Interval {
    /// Create an interval from two instants. Fails unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvalidIntervalError> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(InvalidIntervalError::StartNotBeforeEnd { start, end })
        }
    }

    /// Construct without validation. Callers must guarantee `start < end`;
    /// used by list operations whose sweeps already establish it.
    pub(crate) fn unchecked(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(start < end);
        Self { start, end }
    }

    /// Inclusive start instant.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end instant.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Length of the interval.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True iff the two half-open ranges share at least one instant.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True iff one interval ends exactly where the other starts.
    ///
    /// Abutting intervals share no instant but are not distinct for
    /// canonicalization purposes: a simplified list merges them.
    pub fn abuts(&self, other: &Interval) -> bool {
        self.end == other.start || other.end == self.start
    }

    /// True iff `instant` falls within `[start, end)`.
    pub fn contains_instant(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// True iff `other` lies entirely within this interval.
    pub fn encloses(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The single interval covering both inputs, when they overlap or abut.
    /// Disjoint, non-abutting inputs have no gap-free cover and yield `None`.
    pub fn merge(&self, other: &Interval) -> Option<Interval> {
        if self.overlaps(other) || self.abuts(other) {
            Some(Interval {
                start: self.start.min(other.start),
                end: self.end.max(other.end),
            })
        } else {
            None
        }
    }

    /// The shared portion of two intervals, `None` when they are disjoint.
    /// Abutting intervals share no instant and so have no intersection.
    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            Some(Interval { start, end })
        } else {
            None
        }
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        chain_comparing(
            self,
            other,
            &[
                &|a: &Interval, b: &Interval| a.start.cmp(&b.start),
                &|a: &Interval, b: &Interval| a.end.cmp(&b.end),
            ],
        )
    }
}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}",
            self.start.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            self.end.to_rfc3339_opts(SecondsFormat::AutoSi, true)
        )
    }
}

impl FromStr for Interval {
    type Err = InvalidIntervalError;

    /// Parse the canonical `ISO-start/ISO-end` form, e.g.
    /// `2020-01-01T00:00:00Z/2020-01-02T00:00:00Z`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start_token, end_token) =
            s.split_once('/')
                .ok_or_else(|| InvalidIntervalError::MissingSeparator {
                    token: s.to_string(),
                })?;
        let start = parse_instant(start_token)?;
        let end = parse_instant(end_token)?;
        Interval::new(start, end)
    }
}

fn parse_instant(token: &str) -> Result<DateTime<Utc>, InvalidIntervalError> {
    DateTime::parse_from_rfc3339(token)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| InvalidIntervalError::UnparseableInstant {
            token: token.to_string(),
            reason: e.to_string(),
        })
}

impl Serialize for Interval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
