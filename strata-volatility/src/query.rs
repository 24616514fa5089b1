//! Query collaborator contract
//!
//! The volatility service consumes queries as a black box: it needs the
//! requested time range and the grain it will be bucketed at, nothing else.
//! Filter and having trees, dimensions, and column resolution live upstream.

use strata_intervals::SimplifiedIntervalList;

use crate::grain::{BucketAligner, TimeGrain};

/// A query viewed through the volatility lens: a requested time range
/// evaluated at a single grain.
pub trait GranularQuery: Send + Sync {
    /// The raw requested intervals, before bucket alignment.
    fn requested_intervals(&self) -> &SimplifiedIntervalList;

    /// The grain the query's buckets are evaluated at.
    fn grain(&self) -> TimeGrain;

    /// The bucket-aligned cover of the request, simplified.
    ///
    /// Default implementation aligns each requested interval via the grain
    /// and canonicalizes. Buckets abutting within one request collapse; that
    /// is fine here, since volatility only intersects against this cover.
    fn bucketed_intervals(&self) -> SimplifiedIntervalList {
        let grain = self.grain();
        SimplifiedIntervalList::from_intervals(
            self.requested_intervals()
                .iter()
                .flat_map(|interval| grain.buckets(interval)),
        )
    }
}

/// Minimal owned implementation of [`GranularQuery`].
///
/// The request-handling layer builds richer query objects; this one exists
/// for composition at the service seam and for tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalQuery {
    requested: SimplifiedIntervalList,
    grain: TimeGrain,
}

impl IntervalQuery {
    pub fn new(requested: SimplifiedIntervalList, grain: TimeGrain) -> Self {
        Self { requested, grain }
    }
}

impl GranularQuery for IntervalQuery {
    fn requested_intervals(&self) -> &SimplifiedIntervalList {
        &self.requested
    }

    fn grain(&self) -> TimeGrain {
        self.grain
    }
}
