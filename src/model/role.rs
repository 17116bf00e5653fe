//! Principal roles
//!
//! One enumerated value per principal; every access decision is a pure
//! function of it (no per-call boolean flags).

use serde::{Deserialize, Serialize};

/// Role of an authenticated principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access
    Admin,
    /// Staff access to all records
    Employee,
    /// Head of a family; scoped to their own household
    FamilyParent,
    /// Member of a family; scoped to their household
    FamilyMember,
}

impl Role {
    /// Returns the stored string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
            Role::FamilyParent => "familyparent",
            Role::FamilyMember => "familymember",
        }
    }

    /// True for staff roles with unrestricted record visibility
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Employee)
    }
}
