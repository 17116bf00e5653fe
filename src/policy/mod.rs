//! Hierarchical access control
//!
//! Pure decision functions over the data model: no store access, no
//! request context. [`AccessPolicy::can_access`] answers allow/deny for one
//! record; [`AccessPolicy::scope_filter`] produces the equivalent filter
//! expression so listings never fetch records the principal may not see.
//!
//! # Decision table
//!
//! | Principal       | Allowed targets                                  |
//! |-----------------|--------------------------------------------------|
//! | Admin, Employee | any record                                       |
//! | FamilyParent    | self, own children                               |
//! | FamilyMember    | self, siblings, own parent                       |

mod access;

pub use access::{AccessDecision, AccessPolicy, DenyReason, ModifyAction};
