//! Store error types
//!
//! Store failures are transient infrastructure errors. This layer never
//! retries them; retry policy belongs to the concrete store driver.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by a document store implementation
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store could not be reached or failed mid-operation
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the query shape it was handed
    #[error("store rejected query: {0}")]
    Rejected(String),
}
