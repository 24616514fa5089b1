//! Error types for interval construction and canonical-form parsing

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Interval construction errors.
///
/// These are programming or data errors: they are surfaced immediately and
/// never retried. An invalid interval must not enter a list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidIntervalError {
    #[error("Interval start {start} is not before end {end}")]
    StartNotBeforeEnd {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Unparseable instant {token:?}: {reason}")]
    UnparseableInstant { token: String, reason: String },

    #[error("Interval token {token:?} is missing the '/' separator")]
    MissingSeparator { token: String },
}

/// Canonical interval-list parse errors.
///
/// The serialized form is part of the persisted/logged contract, so a parse
/// that finds unsorted or unmerged entries fails loudly instead of silently
/// repairing the input. Repairing would mask the upstream bug that produced
/// the non-canonical text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MalformedIntervalListError {
    #[error("Element {index} of interval list is invalid: {source}")]
    InvalidElement {
        index: usize,
        #[source]
        source: InvalidIntervalError,
    },

    #[error("Interval list is out of order at element {index}")]
    OutOfOrder { index: usize },

    #[error("Interval list element {index} overlaps or abuts its successor")]
    OverlappingOrAbutting { index: usize },
}
