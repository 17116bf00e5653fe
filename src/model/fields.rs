//! Canonical stored field names
//!
//! The single source of truth for the keys records carry in the store.
//! Filters, scope clauses and patches all reference these constants.

pub const ID: &str = "id";
pub const NAME: &str = "name";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const PASSWORD: &str = "password";
pub const BIRTH_DATE: &str = "birth-date";
pub const GENDER: &str = "gender";
pub const RELATION: &str = "relation";
pub const ROLE: &str = "role";
pub const PARENT_ID: &str = "parent-id";
pub const JOINED_DATE: &str = "joined-date";
pub const IS_ACTIVE: &str = "is-active";
