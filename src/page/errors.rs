//! Paging error taxonomy
//!
//! Invalid input is fatal to the call; translator failures and store I/O
//! failures propagate unchanged. This layer performs no retries.

use thiserror::Error;

use crate::store::StoreError;
use crate::translate::UnsupportedExpression;

/// Errors from assembling a page
#[derive(Debug, Clone, Error)]
pub enum PageError {
    /// Bad page or page size, a client input error
    #[error("invalid page request: {0}")]
    InvalidRequest(String),

    /// The composed filter cannot be represented by the store
    #[error("unsupported filter: {0}")]
    UnsupportedFilter(#[from] UnsupportedExpression),

    /// The store failed; retry policy belongs to the store driver
    #[error(transparent)]
    Store(#[from] StoreError),
}
