//! Engine error types.

use fundlens_traits::TraitError;
use thiserror::Error;

/// Snapshot engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The inbound query failed validation
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The data source failed
    #[error("data source error: {0}")]
    Source(#[source] TraitError),

    /// The snapshot store failed on an explicit cache operation
    #[error("cache error: {0}")]
    Cache(#[source] TraitError),

    /// The payload could not be serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    /// Creates an invalid query error.
    pub fn invalid_query(reason: impl Into<String>) -> Self {
        Self::InvalidQuery(reason.into())
    }
}

impl From<TraitError> for EngineError {
    fn from(e: TraitError) -> Self {
        EngineError::Source(e)
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
