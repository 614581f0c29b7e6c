//! Transaction tag use cases

use super::model::{TransactionTagCreate, TransactionTagFilters, TransactionTagPublic, TransactionTagUpdate};
use super::service::TransactionTagService;
use crate::core::auth::CurrentUser;
use crate::core::error::DomainResult;
use crate::core::extractors::ListQuery;
use crate::core::options::SearchOptions;
use crate::core::query::{Page, PageLimits};
use crate::entities::tags::TagPublic;
use uuid::Uuid;

#[derive(Clone)]
pub struct ListTransactionTags {
    service: TransactionTagService,
    limits: PageLimits,
}

impl ListTransactionTags {
    pub fn new(service: TransactionTagService, limits: PageLimits) -> Self {
        Self { service, limits }
    }

    pub async fn execute(
        &self,
        user: &CurrentUser,
        query: ListQuery<TransactionTagFilters>,
    ) -> DomainResult<Page<TransactionTagPublic>> {
        let ListQuery {
            params,
            filters,
            extra,
        } = query;

        let options = SearchOptions::builder()
            .filters(
                extra
                    .equals_opt("transaction_id", filters.transaction_id)
                    .equals_opt("tag_id", filters.tag_id),
            )
            .pagination(params.pagination(self.limits))
            .sorting(params.sorting()?)
            .build();

        self.service.list_transaction_tags(user, options).await
    }
}

#[derive(Clone)]
pub struct GetTransactionTag {
    service: TransactionTagService,
}

impl GetTransactionTag {
    pub fn new(service: TransactionTagService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, user: &CurrentUser, id: Uuid) -> DomainResult<TransactionTagPublic> {
        self.service.get_transaction_tag(user, &id).await
    }
}

#[derive(Clone)]
pub struct CreateTransactionTag {
    service: TransactionTagService,
}

impl CreateTransactionTag {
    pub fn new(service: TransactionTagService) -> Self {
        Self { service }
    }

    pub async fn execute(
        &self,
        user: &CurrentUser,
        payload: TransactionTagCreate,
    ) -> DomainResult<TransactionTagPublic> {
        self.service.create_transaction_tag(user, payload).await
    }
}

#[derive(Clone)]
pub struct UpdateTransactionTag {
    service: TransactionTagService,
}

impl UpdateTransactionTag {
    pub fn new(service: TransactionTagService) -> Self {
        Self { service }
    }

    pub async fn execute(
        &self,
        user: &CurrentUser,
        id: Uuid,
        patch: TransactionTagUpdate,
    ) -> DomainResult<TransactionTagPublic> {
        self.service.update_transaction_tag(user, &id, patch).await
    }
}

#[derive(Clone)]
pub struct DeleteTransactionTag {
    service: TransactionTagService,
}

impl DeleteTransactionTag {
    pub fn new(service: TransactionTagService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, user: &CurrentUser, id: Uuid) -> DomainResult<()> {
        self.service.delete_transaction_tag(user, &id).await
    }
}

/// `GET /transactions/{id}/tags`
#[derive(Clone)]
pub struct ListTagsOfTransaction {
    service: TransactionTagService,
}

impl ListTagsOfTransaction {
    pub fn new(service: TransactionTagService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, user: &CurrentUser, transaction_id: Uuid) -> DomainResult<Page<TagPublic>> {
        self.service.tags_of(user, &transaction_id).await
    }
}

/// `POST /transactions/{id}/tags/{tag_id}`
#[derive(Clone)]
pub struct TagTransaction {
    service: TransactionTagService,
}

impl TagTransaction {
    pub fn new(service: TransactionTagService) -> Self {
        Self { service }
    }

    pub async fn execute(
        &self,
        user: &CurrentUser,
        transaction_id: Uuid,
        tag_id: Uuid,
    ) -> DomainResult<TransactionTagPublic> {
        self.service.tag_transaction(user, &transaction_id, &tag_id).await
    }
}

/// `DELETE /transactions/{id}/tags/{tag_id}`
#[derive(Clone)]
pub struct UntagTransaction {
    service: TransactionTagService,
}

impl UntagTransaction {
    pub fn new(service: TransactionTagService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, user: &CurrentUser, transaction_id: Uuid, tag_id: Uuid) -> DomainResult<()> {
        self.service.untag_transaction(user, &transaction_id, &tag_id).await
    }
}
