use thiserror::Error;

use tripsplit_core::DomainError;

/// Infrastructure failure (storage, encoding) or a domain rejection surfaced
/// through a store operation.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Imported data could not be turned into a trip.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("store lock poisoned")]
    LockPoisoned,

    /// A store call running off the async executor panicked or was cancelled.
    #[error("background task failed: {0}")]
    Background(String),
}
