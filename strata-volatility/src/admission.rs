//! Cache admission decisions
//!
//! The cache layer calls this after computing a response: volatile buckets
//! are served to the caller but must never be persisted. This module encodes
//! the fail-closed caller contract once so every consumer inherits it.

use strata_intervals::SimplifiedIntervalList;

use crate::error::VolatilityUnavailableError;

/// The portion of `requested` that is safe to persist: everything not
/// covered by `volatile`.
pub fn cacheable_intervals(
    requested: &SimplifiedIntervalList,
    volatile: &SimplifiedIntervalList,
) -> SimplifiedIntervalList {
    requested.subtract(volatile)
}

/// Outcome of a cache-admission decision for one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheAdmission {
    /// Persist exactly these intervals; the rest of the response is volatile.
    Persist(SimplifiedIntervalList),
    /// Persist nothing. Either the whole request is volatile or volatility
    /// could not be determined.
    SkipAll,
}

impl CacheAdmission {
    /// Decide what to persist from a response covering `requested`, given
    /// the volatility service's result.
    ///
    /// An unavailable snapshot fails closed: the entire request is treated
    /// as volatile, never as finalized.
    pub fn decide(
        requested: &SimplifiedIntervalList,
        volatility: Result<SimplifiedIntervalList, VolatilityUnavailableError>,
    ) -> Self {
        match volatility {
            Err(e) => {
                tracing::warn!(
                    source = %e.source_name,
                    error = %e,
                    "Volatility unknown; skipping cache write"
                );
                CacheAdmission::SkipAll
            }
            Ok(volatile) => {
                let safe = cacheable_intervals(requested, &volatile);
                if safe.is_empty() {
                    CacheAdmission::SkipAll
                } else {
                    CacheAdmission::Persist(safe)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(s: &str) -> SimplifiedIntervalList {
        s.parse().unwrap()
    }

    #[test]
    fn no_volatility_persists_everything() {
        let requested = list("2020-01-01T00:00:00Z/2020-01-05T00:00:00Z");
        let decision = CacheAdmission::decide(&requested, Ok(SimplifiedIntervalList::empty()));
        assert_eq!(decision, CacheAdmission::Persist(requested));
    }

    #[test]
    fn partial_volatility_persists_the_remainder() {
        let requested = list("2020-01-01T00:00:00Z/2020-01-05T00:00:00Z");
        let volatile = list("2020-01-04T00:00:00Z/2020-01-05T00:00:00Z");
        let decision = CacheAdmission::decide(&requested, Ok(volatile));
        assert_eq!(
            decision,
            CacheAdmission::Persist(list("2020-01-01T00:00:00Z/2020-01-04T00:00:00Z"))
        );
    }

    #[test]
    fn full_volatility_skips() {
        let requested = list("2020-01-01T00:00:00Z/2020-01-05T00:00:00Z");
        let volatile = list("2019-12-01T00:00:00Z/2020-02-01T00:00:00Z");
        assert_eq!(
            CacheAdmission::decide(&requested, Ok(volatile)),
            CacheAdmission::SkipAll
        );
    }

    #[test]
    fn unavailable_volatility_fails_closed() {
        let requested = list("2020-01-01T00:00:00Z/2020-01-05T00:00:00Z");
        let err = VolatilityUnavailableError::new("events", "segment metadata timeout");
        assert_eq!(
            CacheAdmission::decide(&requested, Err(err)),
            CacheAdmission::SkipAll
        );
    }
}
