//! Principals and family-scoped records

use super::role::Role;

/// The authenticated actor an access decision is made for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    /// Record id of the principal's own user record
    pub id: i64,
    /// The principal's role
    pub role: Role,
    /// Owning FamilyParent's id; populated only for FamilyMember principals
    pub parent_id: Option<i64>,
}

impl Principal {
    /// Creates a principal without a parent reference
    pub fn new(id: i64, role: Role) -> Self {
        Self {
            id,
            role,
            parent_id: None,
        }
    }

    /// Creates a FamilyMember principal owned by the given parent
    pub fn family_member(id: i64, parent_id: i64) -> Self {
        Self {
            id,
            role: Role::FamilyMember,
            parent_id: Some(parent_id),
        }
    }
}

/// A record that can be placed inside (or outside) a family scope
///
/// Implemented by the typed models and by raw store documents, so policy
/// decisions work before a record is decoded.
pub trait FamilyScoped {
    /// The record's id
    fn record_id(&self) -> i64;

    /// The owning FamilyParent's id, if the record has one
    fn record_parent_id(&self) -> Option<i64>;
}
