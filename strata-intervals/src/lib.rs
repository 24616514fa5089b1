//! STRATA Intervals - Canonical Time-Interval Algebra
//!
//! Pure value types with no I/O and no policy. The volatility service and the
//! cache-admission layer both build on the types here.
//!
//! The central invariant is *canonical form*: a [`SimplifiedIntervalList`] is
//! always sorted ascending by start with no overlapping or abutting elements,
//! so any set of instants has exactly one representation.

pub mod compare;
pub mod error;
pub mod interval;
pub mod simplified;

pub use compare::chain_comparing;
pub use error::{InvalidIntervalError, MalformedIntervalListError};
pub use interval::Interval;
pub use simplified::SimplifiedIntervalList;
