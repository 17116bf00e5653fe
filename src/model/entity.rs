//! Per-entity listing configuration

use serde_json::Value;

use crate::store::{Document, OrderBy};

use super::errors::ModelError;
use super::fields;
use super::principal::FamilyScoped;

/// A record type with a stored collection behind it
///
/// `SEARCH_FIELD` is the single designated search field of the entity;
/// entities with nothing searchable carry `None` and listing requests with a
/// search term become no-ops for them.
pub trait Entity: Sized {
    /// Collection the entity's records live in
    const COLLECTION: &'static str;

    /// Designated prefix-search field, if any
    const SEARCH_FIELD: Option<&'static str>;

    /// Sort applied to listings unless the request overrides it
    fn default_sort() -> OrderBy;

    /// Decodes a stored record into the typed model
    fn from_document(document: &Document) -> Result<Self, ModelError>;
}

impl FamilyScoped for Document {
    fn record_id(&self) -> i64 {
        self.id
    }

    fn record_parent_id(&self) -> Option<i64> {
        self.field(fields::PARENT_ID).and_then(Value::as_i64)
    }
}
