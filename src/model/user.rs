//! User records
//!
//! A user is any person in the directory: staff, a family parent, or a
//! family member. Family members carry the owning parent's id in
//! `parent-id`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::{Document, OrderBy};

use super::entity::Entity;
use super::enums::{Gender, Relation};
use super::errors::ModelError;
use super::fields;
use super::principal::FamilyScoped;
use super::role::Role;

fn default_active() -> bool {
    true
}

/// A stored user record
///
/// The stored password never decodes into the model; it stays in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "birth-date", default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    pub gender: Gender,
    pub relation: Relation,
    pub role: Role,
    #[serde(rename = "parent-id", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(rename = "joined-date", default, skip_serializing_if = "Option::is_none")]
    pub joined_date: Option<NaiveDate>,
    #[serde(rename = "is-active", default = "default_active")]
    pub is_active: bool,
}

/// Input for creating a user; the store assigns the id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    #[serde(rename = "birth-date", default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    pub gender: Gender,
    pub relation: Relation,
    pub role: Role,
    #[serde(rename = "parent-id", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(rename = "joined-date", default, skip_serializing_if = "Option::is_none")]
    pub joined_date: Option<NaiveDate>,
    #[serde(rename = "is-active", default = "default_active")]
    pub is_active: bool,
}

impl Entity for User {
    const COLLECTION: &'static str = "users";
    const SEARCH_FIELD: Option<&'static str> = Some(fields::NAME);

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

impl FamilyScoped for User {
    fn record_id(&self) -> i64 {
        self.id
    }

    fn record_parent_id(&self) -> Option<i64> {
        self.parent_id
    }
}
