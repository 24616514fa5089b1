//! STRATA Volatility - Volatile-Interval Resolution
//!
//! Determines which of a query's time buckets are volatile against a backing
//! physical source. Volatile buckets sit on the forward edge of real-time
//! ingestion and may later be replaced by fuller historical segments, so they
//! are returned to callers but excluded from cache writes.
//!
//! The flow: a query's requested range is aligned to grain buckets
//! ([`grain`]), intersected with the source's volatile set ([`source`],
//! [`service`]), and the result drives the cache-admission decision
//! ([`admission`]). All interval math lives in `strata-intervals`.

pub mod admission;
pub mod error;
pub mod grain;
pub mod query;
pub mod service;
pub mod source;

pub use admission::{cacheable_intervals, CacheAdmission};
pub use error::VolatilityUnavailableError;
pub use grain::{BucketAligner, TimeGrain};
pub use query::{GranularQuery, IntervalQuery};
pub use service::{
    DefaultingVolatileIntervalsService, SourceVolatileIntervalsService, VolatileIntervalsService,
};
pub use source::{FnBackedSource, NoVolatility, PhysicalSource, TrailingWindow, VolatileIntervalsFn};
