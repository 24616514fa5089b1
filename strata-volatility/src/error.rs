//! Error types for volatility resolution

use thiserror::Error;

/// A physical source failed to report its volatility snapshot.
///
/// Callers must fail closed on this error: treat the entire requested range
/// as volatile and skip cache writes. Defaulting to "no volatility" would
/// admit unfinalized data into the cache permanently.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Volatility unavailable for source {source_name}: {reason}")]
pub struct VolatilityUnavailableError {
    /// Name of the physical source that failed to report.
    pub source_name: String,
    /// Collaborator-provided failure description.
    pub reason: String,
}

impl VolatilityUnavailableError {
    pub fn new(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}
