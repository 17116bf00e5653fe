//! Family directory service
//!
//! Families have no family-scope hierarchy of their own; the generic record
//! operations carry all of the policy weight. Only staff may create them.

use serde_json::Value;

use crate::model::{Entity, Family, FamilyDraft, Principal};
use crate::observability::{Event, Logger};
use crate::page::{PageRequest, PageResult};
use crate::policy::DenyReason;
use crate::store::DocumentStore;

use super::errors::{ServiceError, ServiceResult};
use super::records::RecordService;

/// Service for the `families` collection
pub struct FamilyService<S> {
    records: RecordService<S>,
}

impl<S: DocumentStore> FamilyService<S> {
    /// Creates the service over shared record operations
    pub fn new(records: RecordService<S>) -> Self {
        Self { records }
    }

    /// Paged family listing, pinned to the directory's stable order
    pub async fn get_families_paged(
        &self,
        request: PageRequest,
        principal: &Principal,
    ) -> ServiceResult<PageResult<Family>> {
        let sort = Family::default_sort();
        let request = request.with_sort(sort.field, sort.direction);
        self.records.get_page::<Family>(request, principal).await
    }

    /// Fetches one family, subject to the access policy
    pub async fn get_family(
        &self,
        id: i64,
        principal: &Principal,
    ) -> ServiceResult<Option<Family>> {
        self.records.get::<Family>(id, principal).await
    }

    /// Creates a family; staff only
    pub async fn add_family(
        &self,
        draft: FamilyDraft,
        principal: &Principal,
    ) -> ServiceResult<Family> {
        if !principal.role.is_staff() {
            Logger::log(
                Event::AccessDenied,
                &[
                    ("collection", Family::COLLECTION.to_string()),
                    ("principal", principal.id.to_string()),
                    ("role", principal.role.as_str().to_string()),
                ],
            );
            return Err(ServiceError::AccessDenied(DenyReason::ActionNotPermitted));
        }

        let body = serde_json::to_value(&draft)?;
        let document = self
            .records
            .store()
            .create(Family::COLLECTION, body)
            .await?;
        Logger::log(
            Event::RecordCreated,
            &[
                ("collection", Family::COLLECTION.to_string()),
                ("id", document.id.to_string()),
            ],
        );

        Ok(Family::from_document(&document)?)
    }

    /// Patches a family
    pub async fn update_family(
        &self,
        id: i64,
        patch: Value,
        principal: &Principal,
    ) -> ServiceResult<Option<Family>> {
        self.records.update::<Family>(id, patch, principal).await
    }

    /// Hard-deletes a family
    pub async fn delete_family(&self, id: i64, principal: &Principal) -> ServiceResult<bool> {
        self.records.delete::<Family>(id, principal).await
    }

    /// Re-activates a family
    pub async fn activate_family(
        &self,
        id: i64,
        principal: &Principal,
    ) -> ServiceResult<Option<Family>> {
        self.records.set_active::<Family>(id, true, principal).await
    }

    /// Deactivates a family
    pub async fn deactivate_family(
        &self,
        id: i64,
        principal: &Principal,
    ) -> ServiceResult<Option<Family>> {
        self.records.set_active::<Family>(id, false, principal).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use crate::policy::AccessPolicy;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn service() -> FamilyService<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        FamilyService::new(RecordService::new(store, AccessPolicy::new()))
    }

    fn family_draft(name: &str) -> FamilyDraft {
        FamilyDraft {
            name: name.into(),
            is_active: true,
            joined_date: None,
        }
    }

    #[tokio::test]
    async fn test_staff_create_and_list() {
        let service = service();
        let employee = Principal::new(1, Role::Employee);

        for name in ["Haddad", "Nassar"] {
            service.add_family(family_draft(name), &employee).await.unwrap();
        }

        let page = service
            .get_families_paged(PageRequest::new(1, 10), &employee)
            .await
            .unwrap();

        assert_eq!(page.total_count, 2);
        // Newest first
        assert_eq!(page.items[0].name, "Nassar");
    }

    #[tokio::test]
    async fn test_non_staff_cannot_create() {
        let service = service();
        let parent = Principal::new(5, Role::FamilyParent);

        let result = service.add_family(family_draft("Haddad"), &parent).await;
        assert!(matches!(result, Err(ServiceError::AccessDenied(_))));
    }

    #[tokio::test]
    async fn test_only_admin_deactivates() {
        let service = service();
        let admin = Principal::new(1, Role::Admin);
        let employee = Principal::new(2, Role::Employee);

        let family = service.add_family(family_draft("Haddad"), &admin).await.unwrap();

        let denied = service.deactivate_family(family.id, &employee).await;
        assert!(matches!(denied, Err(ServiceError::AccessDenied(_))));

        let updated = service
            .deactivate_family(family.id, &admin)
            .await
            .unwrap()
            .unwrap();
        assert!(!updated.is_active);
    }
}
