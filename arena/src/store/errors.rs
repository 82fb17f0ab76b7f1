//! Resource store error types.

use thiserror::Error;

/// Failures while loading or persisting a backing collection.
///
/// Id misses are not errors; lookups return `Option`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Corrupt or unreadable collection file
    #[error("Store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
