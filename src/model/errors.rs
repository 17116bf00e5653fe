//! Model error types

use thiserror::Error;

/// Errors mapping stored records to typed models
#[derive(Debug, Error)]
pub enum ModelError {
    /// The stored record does not decode into the entity's shape
    #[error("malformed {collection} record {id}: {source}")]
    Malformed {
        /// Collection the record came from
        collection: &'static str,
        /// Record id
        id: i64,
        /// Decode failure
        #[source]
        source: serde_json::Error,
    },
}
