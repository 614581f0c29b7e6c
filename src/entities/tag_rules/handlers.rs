//! Tag rule HTTP handlers

use super::model::{
    ApplyRulesRequest, ApplyRulesResponse, TagRuleCreateIn, TagRuleFilters, TagRulePublic,
    TagRuleUpdate,
};
use super::service::TagRuleService;
use super::usecases::{
    ApplyTagRules, CreateTagRule, DeleteTagRule, GetTagRule, ListTagRules, UpdateTagRule,
};
use crate::core::auth::CurrentUser;
use crate::core::error::DomainError;
use crate::core::extractors::{JsonBody, ListQuery, PathParams, ValidatedJson};
use crate::core::query::{Page, PageLimits};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use uuid::Uuid;

/// TagRule-specific AppState
#[derive(Clone)]
pub struct TagRuleAppState {
    pub list: ListTagRules,
    pub get: GetTagRule,
    pub create: CreateTagRule,
    pub update: UpdateTagRule,
    pub delete: DeleteTagRule,
    pub apply: ApplyTagRules,
}

impl TagRuleAppState {
    pub fn new(service: TagRuleService, limits: PageLimits) -> Self {
        Self {
            list: ListTagRules::new(service.clone(), limits),
            get: GetTagRule::new(service.clone()),
            create: CreateTagRule::new(service.clone()),
            update: UpdateTagRule::new(service.clone()),
            delete: DeleteTagRule::new(service.clone()),
            apply: ApplyTagRules::new(service),
        }
    }
}

pub async fn list_tag_rules(
    State(state): State<TagRuleAppState>,
    user: CurrentUser,
    query: ListQuery<TagRuleFilters>,
) -> Result<Json<Page<TagRulePublic>>, DomainError> {
    state.list.execute(&user, query).await.map(Json)
}

pub async fn get_tag_rule(
    State(state): State<TagRuleAppState>,
    user: CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> Result<Json<TagRulePublic>, DomainError> {
    state.get.execute(&user, id).await.map(Json)
}

pub async fn create_tag_rule(
    State(state): State<TagRuleAppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<TagRuleCreateIn>,
) -> Result<(StatusCode, Json<TagRulePublic>), DomainError> {
    let rule = state.create.execute(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(rule)))
}

pub async fn update_tag_rule(
    State(state): State<TagRuleAppState>,
    user: CurrentUser,
    PathParams(id): PathParams<Uuid>,
    ValidatedJson(patch): ValidatedJson<TagRuleUpdate>,
) -> Result<Json<TagRulePublic>, DomainError> {
    state.update.execute(&user, id, patch).await.map(Json)
}

pub async fn delete_tag_rule(
    State(state): State<TagRuleAppState>,
    user: CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> Result<StatusCode, DomainError> {
    state.delete.execute(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn apply_tag_rules(
    State(state): State<TagRuleAppState>,
    user: CurrentUser,
    JsonBody(request): JsonBody<ApplyRulesRequest>,
) -> Result<Json<ApplyRulesResponse>, DomainError> {
    state.apply.execute(&user, request).await.map(Json)
}
