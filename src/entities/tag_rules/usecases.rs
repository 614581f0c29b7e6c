//! Tag rule use cases

use super::model::{
    ApplyRulesRequest, ApplyRulesResponse, TagRuleCreateIn, TagRuleFilters, TagRulePublic,
    TagRuleUpdate,
};
use super::service::TagRuleService;
use crate::core::auth::CurrentUser;
use crate::core::error::DomainResult;
use crate::core::extractors::ListQuery;
use crate::core::options::SearchOptions;
use crate::core::query::{Page, PageLimits};
use uuid::Uuid;

#[derive(Clone)]
pub struct ListTagRules {
    service: TagRuleService,
    limits: PageLimits,
}

impl ListTagRules {
    pub fn new(service: TagRuleService, limits: PageLimits) -> Self {
        Self { service, limits }
    }

    pub async fn execute(
        &self,
        user: &CurrentUser,
        query: ListQuery<TagRuleFilters>,
    ) -> DomainResult<Page<TagRulePublic>> {
        let ListQuery {
            params,
            filters,
            extra,
        } = query;

        let options = SearchOptions::builder()
            .filters(
                extra
                    .equals_opt("tag_id", filters.tag_id)
                    .equals_opt("enabled", filters.enabled),
            )
            .pagination(params.pagination(self.limits))
            .sorting(params.sorting()?)
            .build();

        self.service.list_rules(user, filters.user_id, options).await
    }
}

#[derive(Clone)]
pub struct GetTagRule {
    service: TagRuleService,
}

impl GetTagRule {
    pub fn new(service: TagRuleService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, user: &CurrentUser, id: Uuid) -> DomainResult<TagRulePublic> {
        self.service.get_rule(user, &id).await
    }
}

#[derive(Clone)]
pub struct CreateTagRule {
    service: TagRuleService,
}

impl CreateTagRule {
    pub fn new(service: TagRuleService) -> Self {
        Self { service }
    }

    pub async fn execute(
        &self,
        user: &CurrentUser,
        payload: TagRuleCreateIn,
    ) -> DomainResult<TagRulePublic> {
        self.service.create_rule(user, payload).await
    }
}

#[derive(Clone)]
pub struct UpdateTagRule {
    service: TagRuleService,
}

impl UpdateTagRule {
    pub fn new(service: TagRuleService) -> Self {
        Self { service }
    }

    pub async fn execute(
        &self,
        user: &CurrentUser,
        id: Uuid,
        patch: TagRuleUpdate,
    ) -> DomainResult<TagRulePublic> {
        self.service.update_rule(user, &id, patch).await
    }
}

#[derive(Clone)]
pub struct DeleteTagRule {
    service: TagRuleService,
}

impl DeleteTagRule {
    pub fn new(service: TagRuleService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, user: &CurrentUser, id: Uuid) -> DomainResult<()> {
        self.service.delete_rule(user, &id).await
    }
}

#[derive(Clone)]
pub struct ApplyTagRules {
    service: TagRuleService,
}

impl ApplyTagRules {
    pub fn new(service: TagRuleService) -> Self {
        Self { service }
    }

    pub async fn execute(
        &self,
        user: &CurrentUser,
        request: ApplyRulesRequest,
    ) -> DomainResult<ApplyRulesResponse> {
        self.service.apply_rules(user, request).await
    }
}
