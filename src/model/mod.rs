//! Typed records and the canonical field mapping
//!
//! Each entity has exactly one stored representation: the dashed field names
//! in [`fields`]. Models map to and from it through explicit serde renames;
//! there is no fallback between alternative key spellings. Listing behavior
//! (collection name, designated search field, default sort) is part of the
//! per-entity [`Entity`] configuration.

mod entity;
mod enums;
mod errors;
mod family;
pub mod fields;
mod principal;
mod role;
mod user;

pub use entity::Entity;
pub use enums::{Gender, Relation};
pub use errors::ModelError;
pub use family::{Family, FamilyDraft};
pub use principal::{FamilyScoped, Principal};
pub use role::Role;
pub use user::{User, UserDraft};
