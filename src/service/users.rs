//! User directory service
//!
//! Wraps the generic record operations with the user-specific rules:
//! creation-time policy enforcement, parent-reference validation and
//! duplicate detection on the unique contact fields.

use std::collections::HashSet;

use futures_util::future::try_join_all;
use serde_json::{json, Value};

use crate::filter::FilterExpr;
use crate::model::{fields, Entity, Principal, Role, User, UserDraft};
use crate::observability::{Event, Logger};
use crate::page::{PageError, PageRequest, PageResult};
use crate::policy::DenyReason;
use crate::store::DocumentStore;
use crate::translate::QueryTranslator;

use super::errors::{ServiceError, ServiceResult};
use super::records::RecordService;

/// Service for the `users` collection
pub struct UserService<S> {
    records: RecordService<S>,
}

impl<S: DocumentStore> UserService<S> {
    /// Creates the service over shared record operations
    pub fn new(records: RecordService<S>) -> Self {
        Self { records }
    }

    /// The underlying generic operations
    pub fn records(&self) -> &RecordService<S> {
        &self.records
    }

    /// Paged user listing, pinned to the directory's stable order
    pub async fn get_users_paged(
        &self,
        request: PageRequest,
        principal: &Principal,
    ) -> ServiceResult<PageResult<User>> {
        let sort = User::default_sort();
        let request = request.with_sort(sort.field, sort.direction);
        self.records.get_page::<User>(request, principal).await
    }

    /// Fetches one user, subject to the access policy
    pub async fn get_user(&self, id: i64, principal: &Principal) -> ServiceResult<Option<User>> {
        self.records.get::<User>(id, principal).await
    }

    /// Creates a user.
    ///
    /// A FamilyParent creator always produces a FamilyMember of their own
    /// family: the stored `parent-id` and `role` are overridden server-side
    /// regardless of the payload. FamilyMembers may not create records.
    pub async fn add_user(&self, draft: UserDraft, principal: &Principal) -> ServiceResult<User> {
        let mut draft = draft;
        match principal.role {
            Role::Admin | Role::Employee => {}
            Role::FamilyParent => {
                draft.parent_id = Some(principal.id);
                draft.role = Role::FamilyMember;
            }
            Role::FamilyMember => {
                Logger::log(
                    Event::AccessDenied,
                    &[
                        ("collection", User::COLLECTION.to_string()),
                        ("principal", principal.id.to_string()),
                        ("role", principal.role.as_str().to_string()),
                    ],
                );
                return Err(ServiceError::AccessDenied(DenyReason::ActionNotPermitted));
            }
        }

        if let Some(parent_id) = draft.parent_id {
            self.ensure_family_parent(parent_id).await?;
        }

        let colliding = self.colliding_fields(&draft).await?;
        if !colliding.is_empty() {
            Logger::log(
                Event::DuplicateRejected,
                &[
                    ("collection", User::COLLECTION.to_string()),
                    ("fields", colliding.join(",")),
                ],
            );
            return Err(ServiceError::Duplicate { fields: colliding });
        }

        let body = serde_json::to_value(&draft)?;
        let document = self.records.store().create(User::COLLECTION, body).await?;
        Logger::log(
            Event::RecordCreated,
            &[
                ("collection", User::COLLECTION.to_string()),
                ("id", document.id.to_string()),
            ],
        );

        Ok(User::from_document(&document)?)
    }

    /// Patches a user.
    ///
    /// Non-staff principals cannot rewire family structure or change roles;
    /// those keys are stripped from the patch before it is applied.
    pub async fn update_user(
        &self,
        id: i64,
        patch: Value,
        principal: &Principal,
    ) -> ServiceResult<Option<User>> {
        let mut patch = patch;
        if !principal.role.is_staff() {
            if let Some(object) = patch.as_object_mut() {
                object.remove(fields::ROLE);
                object.remove(fields::PARENT_ID);
            }
        }
        self.records.update::<User>(id, patch, principal).await
    }

    /// Hard-deletes a user
    pub async fn delete_user(&self, id: i64, principal: &Principal) -> ServiceResult<bool> {
        self.records.delete::<User>(id, principal).await
    }

    /// Re-activates a user
    pub async fn activate_user(
        &self,
        id: i64,
        principal: &Principal,
    ) -> ServiceResult<Option<User>> {
        self.records.set_active::<User>(id, true, principal).await
    }

    /// Deactivates a user
    pub async fn deactivate_user(
        &self,
        id: i64,
        principal: &Principal,
    ) -> ServiceResult<Option<User>> {
        self.records.set_active::<User>(id, false, principal).await
    }

    async fn ensure_family_parent(&self, parent_id: i64) -> ServiceResult<()> {
        let expected_role = json!(Role::FamilyParent.as_str());
        let parent = self
            .records
            .fetch_document(User::COLLECTION, parent_id)
            .await?;

        match parent {
            Some(document) if document.field(fields::ROLE) == Some(&expected_role) => Ok(()),
            _ => Err(ServiceError::InvalidParent(parent_id)),
        }
    }

    /// Which unique contact fields collide with existing records.
    ///
    /// One store query per disjunct, deduplicated by record id: a record
    /// matching on both email and phone yields a single rejection naming
    /// both fields.
    async fn colliding_fields(&self, draft: &UserDraft) -> ServiceResult<Vec<&'static str>> {
        let email_value = json!(draft.email.clone());
        let phone_value = draft.phone.as_ref().map(|phone| json!(phone.clone()));

        let mut clauses = vec![FilterExpr::and([FilterExpr::eq(
            fields::EMAIL,
            email_value.clone(),
        )])];
        if let Some(phone) = &phone_value {
            clauses.push(FilterExpr::and([FilterExpr::eq(
                fields::PHONE,
                phone.clone(),
            )]));
        }

        let plan =
            QueryTranslator::translate(&FilterExpr::or(clauses)).map_err(PageError::from)?;
        let queries = plan.disjuncts.iter().map(|predicates| {
            self.records
                .store()
                .query(User::COLLECTION, predicates, None, None, None)
        });
        let batches = try_join_all(queries).await?;

        let mut seen = HashSet::new();
        let mut colliding: Vec<&'static str> = Vec::new();
        for document in batches.into_iter().flatten() {
            if !seen.insert(document.id) {
                continue;
            }
            if document.field(fields::EMAIL) == Some(&email_value)
                && !colliding.contains(&fields::EMAIL)
            {
                colliding.push(fields::EMAIL);
            }
            if let Some(phone) = &phone_value {
                if document.field(fields::PHONE) == Some(phone)
                    && !colliding.contains(&fields::PHONE)
                {
                    colliding.push(fields::PHONE);
                }
            }
        }

        Ok(colliding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, Relation};
    use crate::policy::AccessPolicy;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn draft(name: &str, email: &str) -> UserDraft {
        UserDraft {
            name: name.into(),
            email: email.into(),
            phone: None,
            password: "hash".into(),
            birth_date: None,
            gender: Gender::Male,
            relation: Relation::Father,
            role: Role::FamilyParent,
            parent_id: None,
            joined_date: None,
            is_active: true,
        }
    }

    fn service() -> UserService<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        UserService::new(RecordService::new(store, AccessPolicy::new()))
    }

    #[tokio::test]
    async fn test_admin_creates_as_given() {
        let service = service();
        let admin = Principal::new(1, Role::Admin);

        let user = service.add_user(draft("Omar", "omar@example.com"), &admin).await.unwrap();

        assert_eq!(user.role, Role::FamilyParent);
        assert_eq!(user.parent_id, None);
    }

    #[tokio::test]
    async fn test_parent_creation_overrides_payload() {
        let service = service();
        let admin = Principal::new(1, Role::Admin);
        let parent = service
            .add_user(draft("Omar", "omar@example.com"), &admin)
            .await
            .unwrap();

        // Payload claims a foreign parent and an admin role
        let mut child = draft("Sara", "sara@example.com");
        child.parent_id = Some(999);
        child.role = Role::Admin;

        let creator = Principal::new(parent.id, Role::FamilyParent);
        let stored = service.add_user(child, &creator).await.unwrap();

        assert_eq!(stored.parent_id, Some(parent.id));
        assert_eq!(stored.role, Role::FamilyMember);
    }

    #[tokio::test]
    async fn test_member_cannot_create() {
        let service = service();
        let member = Principal::family_member(8, 5);

        let result = service.add_user(draft("X", "x@example.com"), &member).await;
        assert!(matches!(
            result,
            Err(ServiceError::AccessDenied(DenyReason::ActionNotPermitted))
        ));
    }

    #[tokio::test]
    async fn test_unknown_parent_rejected() {
        let service = service();
        let admin = Principal::new(1, Role::Admin);

        let mut orphan = draft("Sara", "sara@example.com");
        orphan.role = Role::FamilyMember;
        orphan.parent_id = Some(77);

        let result = service.add_user(orphan, &admin).await;
        assert!(matches!(result, Err(ServiceError::InvalidParent(77))));
    }

    #[tokio::test]
    async fn test_duplicates_merge_into_one_rejection() {
        let service = service();
        let admin = Principal::new(1, Role::Admin);

        let mut existing = draft("Omar", "omar@example.com");
        existing.phone = Some("123".into());
        service.add_user(existing, &admin).await.unwrap();

        // Same record matches on both email and phone
        let mut dupe = draft("Other", "omar@example.com");
        dupe.phone = Some("123".into());

        match service.add_user(dupe, &admin).await {
            Err(ServiceError::Duplicate { fields }) => {
                assert_eq!(fields, vec![crate::model::fields::EMAIL, crate::model::fields::PHONE]);
            }
            other => panic!("expected duplicate rejection, got {:?}", other.map(|u| u.id)),
        }
    }

    #[tokio::test]
    async fn test_parent_patch_cannot_rewire_family() {
        let service = service();
        let admin = Principal::new(1, Role::Admin);
        let parent = service
            .add_user(draft("Omar", "omar@example.com"), &admin)
            .await
            .unwrap();

        let creator = Principal::new(parent.id, Role::FamilyParent);
        let child = service
            .add_user(draft("Sara", "sara@example.com"), &creator)
            .await
            .unwrap();

        let updated = service
            .update_user(
                child.id,
                json!({"name": "Sara B", "role": "admin", "parent-id": 999}),
                &creator,
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Sara B");
        assert_eq!(updated.role, Role::FamilyMember);
        assert_eq!(updated.parent_id, Some(parent.id));
    }
}
