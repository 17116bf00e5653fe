//! Family records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::{Document, OrderBy};

use super::entity::Entity;
use super::errors::ModelError;
use super::fields;
use super::principal::FamilyScoped;

fn default_active() -> bool {
    true
}

/// A stored family record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Family {
    pub id: i64,
    pub name: String,
    #[serde(rename = "is-active", default = "default_active")]
    pub is_active: bool,
    #[serde(rename = "joined-date", default, skip_serializing_if = "Option::is_none")]
    pub joined_date: Option<NaiveDate>,
}

/// Input for creating a family; the store assigns the id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyDraft {
    pub name: String,
    #[serde(rename = "is-active", default = "default_active")]
    pub is_active: bool,
    #[serde(rename = "joined-date", default, skip_serializing_if = "Option::is_none")]
    pub joined_date: Option<NaiveDate>,
}

impl Entity for Family {
    const COLLECTION: &'static str = "families";
    // Families have no searchable fields; listing search is a no-op
    const SEARCH_FIELD: Option<&'static str> = None;

    fn default_sort() -> OrderBy {
        OrderBy::desc(fields::ID)
    }

    fn from_document(document: &Document) -> Result<Self, ModelError> {
        serde_json::from_value(document.body.clone()).map_err(|source| ModelError::Malformed {
            collection: Self::COLLECTION,
            id: document.id,
            source,
        })
    }
}

impl FamilyScoped for Family {
    fn record_id(&self) -> i64 {
        self.id
    }

    fn record_parent_id(&self) -> Option<i64> {
        None
    }
}
