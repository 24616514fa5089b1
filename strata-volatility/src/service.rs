//! Volatile-interval resolution services
//!
//! A volatile intervals service determines which of a query's time buckets
//! are volatile against a given physical source. Volatile buckets are still
//! returned to the caller; they are only excluded from cache writes, because
//! real-time ingestion may later replace them with fuller historical
//! segments.

use std::collections::HashMap;
use std::sync::Arc;

use strata_intervals::SimplifiedIntervalList;

use crate::error::VolatilityUnavailableError;
use crate::query::GranularQuery;
use crate::source::{PhysicalSource, VolatileIntervalsFn};

/// Resolves the volatile subset of a query's bucket-aligned intervals.
///
/// Stateless and reentrant: implementations hold no mutable state, read the
/// source's volatility snapshot exactly once per call, and are purely
/// functional given that read.
pub trait VolatileIntervalsService: Send + Sync {
    /// The simplified list of the query's time buckets that are partially or
    /// fully volatile on `source`.
    ///
    /// Guarantees: the result is canonical, a subset of both the query's
    /// bucket cover and the source's volatile set, and empty when the source
    /// declares no volatility or the request precedes it entirely.
    ///
    /// Fails closed: when the source cannot report volatility this returns
    /// `Err` rather than an empty list, so callers skip caching instead of
    /// silently assuming the data is final.
    fn get_volatile_intervals(
        &self,
        query: &dyn GranularQuery,
        source: &dyn PhysicalSource,
    ) -> Result<SimplifiedIntervalList, VolatilityUnavailableError>;
}

fn resolve(
    buckets: SimplifiedIntervalList,
    snapshot: Result<SimplifiedIntervalList, VolatilityUnavailableError>,
    source_name: &str,
) -> Result<SimplifiedIntervalList, VolatilityUnavailableError> {
    let volatile_set = snapshot.map_err(|e| {
        tracing::warn!(
            source = source_name,
            error = %e,
            "Source failed to report volatility; failing closed"
        );
        e
    })?;
    let volatile_buckets = buckets.intersect(&volatile_set);
    tracing::debug!(
        source = source_name,
        requested = %buckets,
        volatile = %volatile_buckets,
        "Resolved volatile buckets"
    );
    Ok(volatile_buckets)
}

/// Service that trusts each source to report its own volatility snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceVolatileIntervalsService;

impl VolatileIntervalsService for SourceVolatileIntervalsService {
    fn get_volatile_intervals(
        &self,
        query: &dyn GranularQuery,
        source: &dyn PhysicalSource,
    ) -> Result<SimplifiedIntervalList, VolatilityUnavailableError> {
        resolve(
            query.bucketed_intervals(),
            source.volatile_intervals(),
            source.name(),
        )
    }
}

/// Service resolving volatility from configured provider functions: one
/// default plus per-source overrides, keyed by source name.
///
/// Collaborators are injected explicitly at construction; there is no
/// ambient registry lookup.
pub struct DefaultingVolatileIntervalsService {
    default_fn: Arc<dyn VolatileIntervalsFn>,
    overrides: HashMap<String, Arc<dyn VolatileIntervalsFn>>,
}

impl DefaultingVolatileIntervalsService {
    /// Use `default_fn` for every source.
    pub fn new(default_fn: Arc<dyn VolatileIntervalsFn>) -> Self {
        Self {
            default_fn,
            overrides: HashMap::new(),
        }
    }

    /// Use `default_fn` except for the named sources in `overrides`.
    pub fn with_overrides(
        default_fn: Arc<dyn VolatileIntervalsFn>,
        overrides: HashMap<String, Arc<dyn VolatileIntervalsFn>>,
    ) -> Self {
        Self {
            default_fn,
            overrides,
        }
    }

    fn provider_for(&self, source_name: &str) -> &dyn VolatileIntervalsFn {
        self.overrides
            .get(source_name)
            .unwrap_or(&self.default_fn)
            .as_ref()
    }
}

impl VolatileIntervalsService for DefaultingVolatileIntervalsService {
    fn get_volatile_intervals(
        &self,
        query: &dyn GranularQuery,
        source: &dyn PhysicalSource,
    ) -> Result<SimplifiedIntervalList, VolatilityUnavailableError> {
        resolve(
            query.bucketed_intervals(),
            self.provider_for(source.name()).volatile_intervals(),
            source.name(),
        )
    }
}
