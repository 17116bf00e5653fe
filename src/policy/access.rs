//! Access decisions and scope filters

use std::fmt;

use serde_json::json;

use crate::filter::FilterExpr;
use crate::model::{fields, FamilyScoped, Principal, Role};

/// Why an operation was denied
///
/// Distinct from not-found; callers may mask a denial as not-found to avoid
/// leaking record existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The record lies outside the principal's family scope
    OutsideFamilyScope,
    /// The principal's role may not perform this action at all
    ActionNotPermitted,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::OutsideFamilyScope => "record is outside the principal's family scope",
            DenyReason::ActionNotPermitted => "role is not permitted to perform this action",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of an access check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(DenyReason),
}

impl AccessDecision {
    /// True when the operation may proceed
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }

    /// The denial reason, if any
    pub fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            AccessDecision::Allow => None,
            AccessDecision::Deny(reason) => Some(*reason),
        }
    }
}

/// Mutating actions gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifyAction {
    Update,
    Delete,
    Activate,
    Deactivate,
}

impl ModifyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModifyAction::Update => "update",
            ModifyAction::Delete => "delete",
            ModifyAction::Activate => "activate",
            ModifyAction::Deactivate => "deactivate",
        }
    }
}

/// The access-control policy
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    /// Creates the policy
    pub fn new() -> Self {
        Self
    }

    /// Decides whether the principal may read the target record
    pub fn can_access(&self, principal: &Principal, target: &impl FamilyScoped) -> AccessDecision {
        match principal.role {
            Role::Admin | Role::Employee => AccessDecision::Allow,

            Role::FamilyParent => {
                let own_record = target.record_id() == principal.id;
                let own_child = target.record_parent_id() == Some(principal.id);
                if own_record || own_child {
                    AccessDecision::Allow
                } else {
                    AccessDecision::Deny(DenyReason::OutsideFamilyScope)
                }
            }

            Role::FamilyMember => {
                let own_record = target.record_id() == principal.id;
                let sibling = principal.parent_id.is_some()
                    && target.record_parent_id() == principal.parent_id;
                let own_parent = principal.parent_id == Some(target.record_id());
                if own_record || sibling || own_parent {
                    AccessDecision::Allow
                } else {
                    AccessDecision::Deny(DenyReason::OutsideFamilyScope)
                }
            }
        }
    }

    /// The filter expression equivalent to the principal's allowed targets.
    ///
    /// Built as a disjunction of single-condition conjunctions so it lowers
    /// straight onto the paginator's fan-out path.
    pub fn scope_filter(&self, principal: &Principal) -> FilterExpr {
        match principal.role {
            Role::Admin | Role::Employee => FilterExpr::always(),

            Role::FamilyParent => FilterExpr::or([
                FilterExpr::and([FilterExpr::eq(fields::ID, json!(principal.id))]),
                FilterExpr::and([FilterExpr::eq(fields::PARENT_ID, json!(principal.id))]),
            ]),

            Role::FamilyMember => {
                let mut clauses = vec![FilterExpr::and([FilterExpr::eq(
                    fields::ID,
                    json!(principal.id),
                )])];
                if let Some(parent_id) = principal.parent_id {
                    clauses.push(FilterExpr::and([FilterExpr::eq(
                        fields::PARENT_ID,
                        json!(parent_id),
                    )]));
                    clauses.push(FilterExpr::and([FilterExpr::eq(
                        fields::ID,
                        json!(parent_id),
                    )]));
                }
                FilterExpr::or(clauses)
            }
        }
    }

    /// Role gate for a mutating action, independent of the target record
    pub fn can_perform(&self, role: Role, action: ModifyAction) -> bool {
        match action {
            ModifyAction::Update => role.is_staff() || role == Role::FamilyParent,
            ModifyAction::Delete | ModifyAction::Activate | ModifyAction::Deactivate => {
                role == Role::Admin
            }
        }
    }

    /// Full pre-flight check for a mutation: role gate, then record scope
    pub fn can_modify(
        &self,
        principal: &Principal,
        action: ModifyAction,
        target: &impl FamilyScoped,
    ) -> AccessDecision {
        if !self.can_perform(principal.role, action) {
            return AccessDecision::Deny(DenyReason::ActionNotPermitted);
        }
        self.can_access(principal, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Predicate;
    use crate::translate::QueryTranslator;

    struct Target {
        id: i64,
        parent_id: Option<i64>,
    }

    impl FamilyScoped for Target {
        fn record_id(&self) -> i64 {
            self.id
        }

        fn record_parent_id(&self) -> Option<i64> {
            self.parent_id
        }
    }

    #[test]
    fn test_staff_access_any_record() {
        let policy = AccessPolicy::new();
        let target = Target {
            id: 42,
            parent_id: Some(7),
        };

        for role in [Role::Admin, Role::Employee] {
            let principal = Principal::new(1, role);
            assert!(policy.can_access(&principal, &target).is_allowed());
        }
    }

    #[test]
    fn test_parent_scope() {
        let policy = AccessPolicy::new();
        let parent = Principal::new(5, Role::FamilyParent);

        // Self and own children
        assert!(policy
            .can_access(&parent, &Target { id: 5, parent_id: None })
            .is_allowed());
        assert!(policy
            .can_access(&parent, &Target { id: 9, parent_id: Some(5) })
            .is_allowed());

        // Someone else's child
        let decision = policy.can_access(&parent, &Target { id: 9, parent_id: Some(7) });
        assert_eq!(
            decision.deny_reason(),
            Some(DenyReason::OutsideFamilyScope)
        );
    }

    #[test]
    fn test_member_scope() {
        let policy = AccessPolicy::new();
        let member = Principal::family_member(8, 5);

        // Other household's record
        let decision = policy.can_access(&member, &Target { id: 9, parent_id: Some(7) });
        assert_eq!(decision.deny_reason(), Some(DenyReason::OutsideFamilyScope));

        // Own parent
        assert!(policy
            .can_access(&member, &Target { id: 5, parent_id: None })
            .is_allowed());

        // Sibling
        assert!(policy
            .can_access(&member, &Target { id: 11, parent_id: Some(5) })
            .is_allowed());

        // Self
        assert!(policy
            .can_access(&member, &Target { id: 8, parent_id: Some(5) })
            .is_allowed());
    }

    #[test]
    fn test_staff_scope_filter_is_universal() {
        let policy = AccessPolicy::new();
        let filter = policy.scope_filter(&Principal::new(1, Role::Employee));
        assert_eq!(filter, FilterExpr::always());
    }

    #[test]
    fn test_parent_scope_filter_lowers_to_two_disjuncts() {
        let policy = AccessPolicy::new();
        let filter = policy.scope_filter(&Principal::new(5, Role::FamilyParent));

        let plan = QueryTranslator::translate(&filter).unwrap();
        assert_eq!(
            plan.disjuncts,
            vec![
                vec![Predicate::eq(fields::ID, json!(5))],
                vec![Predicate::eq(fields::PARENT_ID, json!(5))],
            ]
        );
    }

    #[test]
    fn test_member_scope_filter_covers_household() {
        let policy = AccessPolicy::new();
        let filter = policy.scope_filter(&Principal::family_member(8, 5));

        let plan = QueryTranslator::translate(&filter).unwrap();
        assert_eq!(
            plan.disjuncts,
            vec![
                vec![Predicate::eq(fields::ID, json!(8))],
                vec![Predicate::eq(fields::PARENT_ID, json!(5))],
                vec![Predicate::eq(fields::ID, json!(5))],
            ]
        );
    }

    #[test]
    fn test_action_gates() {
        let policy = AccessPolicy::new();

        assert!(policy.can_perform(Role::Admin, ModifyAction::Delete));
        assert!(!policy.can_perform(Role::Employee, ModifyAction::Delete));
        assert!(!policy.can_perform(Role::Employee, ModifyAction::Activate));
        assert!(policy.can_perform(Role::FamilyParent, ModifyAction::Update));
        assert!(!policy.can_perform(Role::FamilyMember, ModifyAction::Update));
    }

    #[test]
    fn test_can_modify_checks_gate_before_scope() {
        let policy = AccessPolicy::new();
        let member = Principal::family_member(8, 5);

        // Own record, but members may not update at all
        let decision = policy.can_modify(
            &member,
            ModifyAction::Update,
            &Target { id: 8, parent_id: Some(5) },
        );
        assert_eq!(decision.deny_reason(), Some(DenyReason::ActionNotPermitted));

        // Parent passes the gate but not the scope for a foreign record
        let parent = Principal::new(5, Role::FamilyParent);
        let decision = policy.can_modify(
            &parent,
            ModifyAction::Update,
            &Target { id: 2, parent_id: Some(3) },
        );
        assert_eq!(decision.deny_reason(), Some(DenyReason::OutsideFamilyScope));
    }
}
