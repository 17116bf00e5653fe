//! Generic record operations shared by the entity services

use std::sync::Arc;

use serde_json::{json, Value};

use crate::filter::FilterExpr;
use crate::model::{fields, Entity, Principal};
use crate::observability::{Event, Logger};
use crate::page::{PageRequest, PageResult, Paginator};
use crate::policy::{AccessDecision, AccessPolicy, ModifyAction};
use crate::store::{Document, DocumentStore};

use super::errors::{ServiceError, ServiceResult};

/// Policy-aware CRUD and listing over one document store
pub struct RecordService<S> {
    store: Arc<S>,
    paginator: Paginator<S>,
    policy: AccessPolicy,
}

impl<S: DocumentStore> RecordService<S> {
    /// Creates a service over the given store and policy
    pub fn new(store: Arc<S>, policy: AccessPolicy) -> Self {
        let paginator = Paginator::new(Arc::clone(&store));
        Self {
            store,
            paginator,
            policy,
        }
    }

    /// Overrides the maximum page size accepted by listings
    pub fn with_max_page_size(mut self, max_page_size: usize) -> Self {
        self.paginator = Paginator::new(Arc::clone(&self.store)).with_max_page_size(max_page_size);
        self
    }

    /// The store handle services share
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The access policy in effect
    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// Fetches one page of an entity's records, scoped to the principal.
    ///
    /// The principal's scope filter is conjoined with the request filters so
    /// denied records are never fetched, and the entity's designated search
    /// field replaces whatever the request carried.
    pub async fn get_page<E: Entity>(
        &self,
        request: PageRequest,
        principal: &Principal,
    ) -> ServiceResult<PageResult<E>> {
        let mut request = request;
        request.filters = FilterExpr::and([
            self.policy.scope_filter(principal),
            request.filters,
        ]);
        request.search_field = E::SEARCH_FIELD.map(str::to_string);

        let page = self.paginator.get_page(E::COLLECTION, &request).await?;
        Logger::log(
            Event::PageServed,
            &[
                ("collection", E::COLLECTION.to_string()),
                ("page", page.page.to_string()),
                ("items", page.items.len().to_string()),
            ],
        );

        Ok(page.try_map(|doc| E::from_document(&doc))?)
    }

    /// Fetches a record by id, subject to the access policy
    pub async fn get<E: Entity>(
        &self,
        id: i64,
        principal: &Principal,
    ) -> ServiceResult<Option<E>> {
        let document = match self.store.get(E::COLLECTION, id).await? {
            Some(document) => document,
            None => return Ok(None),
        };

        match self.policy.can_access(principal, &document) {
            AccessDecision::Allow => Ok(Some(E::from_document(&document)?)),
            AccessDecision::Deny(reason) => {
                self.log_denied(E::COLLECTION, id, principal);
                Err(ServiceError::AccessDenied(reason))
            }
        }
    }

    /// Pre-flight check for a mutating action.
    ///
    /// Returns `None` when the record does not exist; transport layers
    /// surface that separately from a denial.
    pub async fn can_modify<E: Entity>(
        &self,
        principal: &Principal,
        action: ModifyAction,
        id: i64,
    ) -> ServiceResult<Option<AccessDecision>> {
        let document = match self.store.get(E::COLLECTION, id).await? {
            Some(document) => document,
            None => return Ok(None),
        };
        Ok(Some(self.policy.can_modify(principal, action, &document)))
    }

    /// Applies a partial patch to a record, last write wins
    pub async fn update<E: Entity>(
        &self,
        id: i64,
        patch: Value,
        principal: &Principal,
    ) -> ServiceResult<Option<E>> {
        let document = match self.store.get(E::COLLECTION, id).await? {
            Some(document) => document,
            None => return Ok(None),
        };

        if let AccessDecision::Deny(reason) =
            self.policy.can_modify(principal, ModifyAction::Update, &document)
        {
            self.log_denied(E::COLLECTION, id, principal);
            return Err(ServiceError::AccessDenied(reason));
        }

        let updated = self.store.update(E::COLLECTION, id, patch).await?;
        Logger::log(
            Event::RecordUpdated,
            &[
                ("collection", E::COLLECTION.to_string()),
                ("id", id.to_string()),
            ],
        );

        updated
            .map(|doc| E::from_document(&doc))
            .transpose()
            .map_err(Into::into)
    }

    /// Hard-deletes a record; returns whether it existed
    pub async fn delete<E: Entity>(&self, id: i64, principal: &Principal) -> ServiceResult<bool> {
        let document = match self.store.get(E::COLLECTION, id).await? {
            Some(document) => document,
            None => return Ok(false),
        };

        if let AccessDecision::Deny(reason) =
            self.policy.can_modify(principal, ModifyAction::Delete, &document)
        {
            self.log_denied(E::COLLECTION, id, principal);
            return Err(ServiceError::AccessDenied(reason));
        }

        let existed = self.store.delete(E::COLLECTION, id).await?;
        Logger::log(
            Event::RecordDeleted,
            &[
                ("collection", E::COLLECTION.to_string()),
                ("id", id.to_string()),
            ],
        );
        Ok(existed)
    }

    /// Activates or deactivates a record
    pub async fn set_active<E: Entity>(
        &self,
        id: i64,
        active: bool,
        principal: &Principal,
    ) -> ServiceResult<Option<E>> {
        let action = if active {
            ModifyAction::Activate
        } else {
            ModifyAction::Deactivate
        };

        let document = match self.store.get(E::COLLECTION, id).await? {
            Some(document) => document,
            None => return Ok(None),
        };

        if let AccessDecision::Deny(reason) = self.policy.can_modify(principal, action, &document) {
            self.log_denied(E::COLLECTION, id, principal);
            return Err(ServiceError::AccessDenied(reason));
        }

        let updated = self
            .store
            .update(E::COLLECTION, id, json!({ fields::IS_ACTIVE: active }))
            .await?;
        Logger::log(
            Event::RecordUpdated,
            &[
                ("collection", E::COLLECTION.to_string()),
                ("id", id.to_string()),
                ("active", active.to_string()),
            ],
        );

        updated
            .map(|doc| E::from_document(&doc))
            .transpose()
            .map_err(Into::into)
    }

    pub(crate) fn log_denied(&self, collection: &str, id: i64, principal: &Principal) {
        Logger::log(
            Event::AccessDenied,
            &[
                ("collection", collection.to_string()),
                ("id", id.to_string()),
                ("principal", principal.id.to_string()),
                ("role", principal.role.as_str().to_string()),
            ],
        );
    }

    /// Raw document fetch for service-internal checks
    pub(crate) async fn fetch_document(
        &self,
        collection: &str,
        id: i64,
    ) -> ServiceResult<Option<Document>> {
        Ok(self.store.get(collection, id).await?)
    }
}
