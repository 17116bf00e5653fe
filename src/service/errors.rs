//! Service error taxonomy
//!
//! Policy rejections are distinct from not-found so transport layers can
//! choose whether to mask them. Everything below the service propagates
//! unchanged.

use thiserror::Error;

use crate::model::ModelError;
use crate::page::PageError;
use crate::policy::DenyReason;
use crate::store::StoreError;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the record services
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The access policy rejected the operation
    #[error("access denied: {0}")]
    AccessDenied(DenyReason),

    /// A unique field collides with an existing record
    #[error("duplicate record: {} already in use", .fields.join(", "))]
    Duplicate {
        /// Every colliding field, merged into one rejection
        fields: Vec<&'static str>,
    },

    /// The referenced parent does not exist or is not a family parent
    #[error("invalid parent reference: {0}")]
    InvalidParent(i64),

    /// A record draft failed to encode for storage
    #[error("record encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// Paged listing failure
    #[error(transparent)]
    Page(#[from] PageError),

    /// Store failure outside the paginator
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A stored record failed to decode
    #[error(transparent)]
    Model(#[from] ModelError),
}
