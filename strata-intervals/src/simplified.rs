//! Canonical interval sets
//!
//! `SimplifiedIntervalList` is the workhorse of the volatility subsystem: an
//! immutable, ordered collection of intervals in canonical form — sorted
//! ascending by start, with no two elements overlapping or abutting. Every
//! operation consumes and produces canonical lists, so callers never observe
//! a partially merged intermediate state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::MalformedIntervalListError;
use crate::interval::Interval;

/// An ordered set of non-overlapping, non-abutting intervals.
///
/// Canonical form invariant: for any two adjacent elements `a`, `b`,
/// `a.end < b.start`. Abutting inputs are merged at construction, so the
/// representation of any interval set is unique and minimal.
///
/// Immutable: set operations (`union`, `intersect`, `subtract`) return new
/// lists, which makes sharing across concurrent callers safe without locks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SimplifiedIntervalList {
    intervals: Vec<Interval>,
}

impl SimplifiedIntervalList {
    /// The empty interval set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a canonical list from an arbitrary collection of intervals.
    ///
    /// Sorts by start ascending, then scans left to right merging the current
    /// interval with the next whenever they overlap or abut. Duplicates and
    /// overlaps collapse; an empty input yields the empty list. O(n log n).
    pub fn from_intervals(intervals: impl IntoIterator<Item = Interval>) -> Self {
        let mut sorted: Vec<Interval> = intervals.into_iter().collect();
        sorted.sort();

        let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
        for next in sorted {
            match merged.last_mut() {
                Some(current) if current.overlaps(&next) || current.abuts(&next) => {
                    // Sorted order guarantees current.start <= next.start.
                    *current = Interval::unchecked(current.start(), current.end().max(next.end()));
                }
                _ => merged.push(next),
            }
        }
        Self { intervals: merged }
    }

    /// Number of canonical elements.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// True when the set covers no instants.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The canonical elements, sorted ascending.
    pub fn as_slice(&self) -> &[Interval] {
        &self.intervals
    }

    /// Iterate the canonical elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    /// The set covering every instant in either input.
    pub fn union(&self, other: &SimplifiedIntervalList) -> SimplifiedIntervalList {
        Self::from_intervals(self.iter().chain(other.iter()).copied())
    }

    /// The set of instants covered by both inputs.
    ///
    /// Two-pointer sweep over the canonical lists: each overlapping pair
    /// contributes `[max(start), min(end))`, advancing whichever interval
    /// ends first. O(n + m).
    pub fn intersect(&self, other: &SimplifiedIntervalList) -> SimplifiedIntervalList {
        let a = &self.intervals;
        let b = &other.intervals;
        let mut out = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            if let Some(shared) = a[i].intersection(&b[j]) {
                out.push(shared);
            }
            if a[i].end() <= b[j].end() {
                i += 1;
            } else {
                j += 1;
            }
        }
        // Gaps in either canonical input separate successive outputs strictly,
        // so the sweep emits canonical form directly.
        Self { intervals: out }
    }

    /// The set of instants covered by `self` but not by `other`.
    ///
    /// Sweeps both lists once; an interval overlapped in its middle splits
    /// into two remainders. O(n + m) amortized.
    pub fn subtract(&self, other: &SimplifiedIntervalList) -> SimplifiedIntervalList {
        let holes = &other.intervals;
        let mut out = Vec::new();
        let mut j = 0;
        for keep in &self.intervals {
            let mut cursor = keep.start();
            let end = keep.end();
            while j < holes.len() && holes[j].end() <= cursor {
                j += 1;
            }
            let mut k = j;
            while k < holes.len() && holes[k].start() < end {
                let hole = &holes[k];
                if hole.start() > cursor {
                    out.push(Interval::unchecked(cursor, hole.start()));
                }
                cursor = cursor.max(hole.end());
                if cursor >= end {
                    break;
                }
                k += 1;
            }
            if cursor < end {
                out.push(Interval::unchecked(cursor, end));
            }
        }
        Self { intervals: out }
    }

    /// True iff `instant` falls inside some element. Binary search, O(log n).
    pub fn contains_instant(&self, instant: DateTime<Utc>) -> bool {
        let idx = self.intervals.partition_point(|iv| iv.start() <= instant);
        idx > 0 && self.intervals[idx - 1].contains_instant(instant)
    }

    /// True iff every instant of `other` is covered by `self`.
    pub fn contains_list(&self, other: &SimplifiedIntervalList) -> bool {
        other.iter().all(|o| {
            let idx = self.intervals.partition_point(|iv| iv.start() <= o.start());
            idx > 0 && self.intervals[idx - 1].encloses(o)
        })
    }

    /// True iff the two sets share at least one instant.
    pub fn overlaps_list(&self, other: &SimplifiedIntervalList) -> bool {
        !self.intersect(other).is_empty()
    }

    /// The smallest single interval covering the whole set, `None` when empty.
    pub fn hull(&self) -> Option<Interval> {
        match (self.intervals.first(), self.intervals.last()) {
            (Some(first), Some(last)) => Some(Interval::unchecked(first.start(), last.end())),
            _ => None,
        }
    }
}

impl From<Interval> for SimplifiedIntervalList {
    fn from(interval: Interval) -> Self {
        Self {
            intervals: vec![interval],
        }
    }
}

impl FromIterator<Interval> for SimplifiedIntervalList {
    fn from_iter<T: IntoIterator<Item = Interval>>(iter: T) -> Self {
        Self::from_intervals(iter)
    }
}

impl<'a> IntoIterator for &'a SimplifiedIntervalList {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

impl IntoIterator for SimplifiedIntervalList {
    type Item = Interval;
    type IntoIter = std::vec::IntoIter<Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.into_iter()
    }
}

impl fmt::Display for SimplifiedIntervalList {
    /// The canonical serialized form: comma-joined `start/end` tokens,
    /// ascending. The empty set prints as the empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for interval in &self.intervals {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{interval}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for SimplifiedIntervalList {
    type Err = MalformedIntervalListError;

    /// Parse the canonical serialized form.
    ///
    /// Rejects non-canonical input (unsorted, overlapping, or abutting
    /// adjacent entries) instead of repairing it: the serialized form is a
    /// persisted contract, and malformed text means an upstream bug that
    /// should surface here, not be papered over.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::empty());
        }
        let mut intervals: Vec<Interval> = Vec::new();
        for (index, token) in s.split(',').enumerate() {
            let interval: Interval = token
                .parse()
                .map_err(|source| MalformedIntervalListError::InvalidElement { index, source })?;
            if let Some(prev) = intervals.last() {
                if interval.start() < prev.start() {
                    return Err(MalformedIntervalListError::OutOfOrder { index });
                }
                if prev.end() >= interval.start() {
                    return Err(MalformedIntervalListError::OverlappingOrAbutting {
                        index: index - 1,
                    });
                }
            }
            intervals.push(interval);
        }
        Ok(Self { intervals })
    }
}

impl Serialize for SimplifiedIntervalList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SimplifiedIntervalList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
