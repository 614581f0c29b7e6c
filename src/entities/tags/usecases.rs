//! Tag use cases

use super::model::{TagCreateIn, TagFilters, TagPublic, TagUpdate};
use super::service::TagService;
use crate::core::auth::CurrentUser;
use crate::core::error::DomainResult;
use crate::core::extractors::ListQuery;
use crate::core::options::SearchOptions;
use crate::core::query::{Page, PageLimits};
use uuid::Uuid;

#[derive(Clone)]
pub struct ListTags {
    service: TagService,
    limits: PageLimits,
}

impl ListTags {
    pub fn new(service: TagService, limits: PageLimits) -> Self {
        Self { service, limits }
    }

    pub async fn execute(
        &self,
        user: &CurrentUser,
        query: ListQuery<TagFilters>,
    ) -> DomainResult<Page<TagPublic>> {
        let ListQuery {
            params,
            filters,
            extra,
        } = query;

        let options = SearchOptions::builder()
            .filters(extra.equals_opt("label", filters.label))
            .pagination(params.pagination(self.limits))
            .sorting(params.sorting()?)
            .build();

        self.service.list_tags(user, filters.user_id, options).await
    }
}

#[derive(Clone)]
pub struct GetTag {
    service: TagService,
}

impl GetTag {
    pub fn new(service: TagService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, user: &CurrentUser, id: Uuid) -> DomainResult<TagPublic> {
        self.service.get_tag(user, &id).await
    }
}

#[derive(Clone)]
pub struct CreateTag {
    service: TagService,
}

impl CreateTag {
    pub fn new(service: TagService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, user: &CurrentUser, payload: TagCreateIn) -> DomainResult<TagPublic> {
        self.service.create_tag(user, payload).await
    }
}

#[derive(Clone)]
pub struct UpdateTag {
    service: TagService,
}

impl UpdateTag {
    pub fn new(service: TagService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, user: &CurrentUser, id: Uuid, patch: TagUpdate) -> DomainResult<TagPublic> {
        self.service.update_tag(user, &id, patch).await
    }
}

#[derive(Clone)]
pub struct DeleteTag {
    service: TagService,
}

impl DeleteTag {
    pub fn new(service: TagService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, user: &CurrentUser, id: Uuid) -> DomainResult<()> {
        self.service.delete_tag(user, &id).await
    }
}
