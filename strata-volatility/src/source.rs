//! Physical sources and volatility provider functions
//!
//! How a source decides what is volatile is deliberately opaque to the
//! service: some sources track explicit unfinalized-segment metadata, others
//! approximate with a trailing real-time window. Both hide behind
//! [`VolatileIntervalsFn`].

use chrono::{DateTime, Duration, Utc};
use strata_intervals::{Interval, SimplifiedIntervalList};

use crate::error::VolatilityUnavailableError;
use crate::grain::{BucketAligner, TimeGrain};

/// A backing physical data source, as seen by the volatility service.
pub trait PhysicalSource: Send + Sync {
    /// Stable name of the source, used for override resolution and logging.
    fn name(&self) -> &str;

    /// Snapshot of the intervals currently considered volatile.
    ///
    /// Read exactly once per service call; repeated reads within one
    /// invocation are not assumed consistent, since ingestion advances
    /// underneath. May fail when segment metadata cannot be reached.
    fn volatile_intervals(&self) -> Result<SimplifiedIntervalList, VolatilityUnavailableError>;
}

/// Supplier of the currently volatile intervals for one source.
pub trait VolatileIntervalsFn: Send + Sync {
    fn volatile_intervals(&self) -> Result<SimplifiedIntervalList, VolatilityUnavailableError>;
}

/// The common historical-only case: nothing is ever volatile.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVolatility;

impl VolatileIntervalsFn for NoVolatility {
    fn volatile_intervals(&self) -> Result<SimplifiedIntervalList, VolatilityUnavailableError> {
        Ok(SimplifiedIntervalList::empty())
    }
}

/// Real-time ingestion heuristic: everything within a trailing window of
/// "now" is volatile.
///
/// The window is aligned outward to a grain so that a partially ingested
/// bucket is reported volatile whole; under-reporting a bucket's volatility
/// would let stale data into the cache.
pub struct TrailingWindow {
    window: Duration,
    grain: TimeGrain,
    clock: Box<dyn Fn() -> DateTime<Utc> + Send + Sync>,
}

impl TrailingWindow {
    /// # Panics
    ///
    /// Panics when `window` is negative. A negative window would place the
    /// volatile range entirely after "now" and the provider would report no
    /// volatility at all; that misconfiguration must fail loudly at
    /// construction, not silently admit unfinalized data into the cache.
    pub fn new(window: Duration, grain: TimeGrain) -> Self {
        Self::with_clock(window, grain, Utc::now)
    }

    /// Construct with an injected clock, for deterministic tests.
    ///
    /// # Panics
    ///
    /// Panics when `window` is negative, as with [`TrailingWindow::new`].
    pub fn with_clock(
        window: Duration,
        grain: TimeGrain,
        clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
    ) -> Self {
        assert!(
            window >= Duration::zero(),
            "trailing window must be non-negative, got {window}"
        );
        Self {
            window,
            grain,
            clock: Box::new(clock),
        }
    }
}

impl std::fmt::Debug for TrailingWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrailingWindow")
            .field("window", &self.window)
            .field("grain", &self.grain)
            .finish_non_exhaustive()
    }
}

impl VolatileIntervalsFn for TrailingWindow {
    fn volatile_intervals(&self) -> Result<SimplifiedIntervalList, VolatilityUnavailableError> {
        let now = (self.clock)();
        let start = self.grain.round_floor(now - self.window);
        let end = self.grain.round_ceil(now);
        match Interval::new(start, end) {
            Ok(interval) => Ok(SimplifiedIntervalList::from(interval)),
            // A zero window evaluated exactly on a grain boundary covers no
            // instants.
            Err(_) => Ok(SimplifiedIntervalList::empty()),
        }
    }
}

/// A named source whose volatility comes from a provider function.
pub struct FnBackedSource {
    name: String,
    provider: Box<dyn VolatileIntervalsFn>,
}

impl FnBackedSource {
    pub fn new(name: impl Into<String>, provider: impl VolatileIntervalsFn + 'static) -> Self {
        Self {
            name: name.into(),
            provider: Box::new(provider),
        }
    }
}

impl PhysicalSource for FnBackedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn volatile_intervals(&self) -> Result<SimplifiedIntervalList, VolatilityUnavailableError> {
        self.provider.volatile_intervals()
    }
}
