//! Tag HTTP handlers

use super::model::{TagCreateIn, TagFilters, TagPublic, TagUpdate};
use super::service::TagService;
use super::usecases::{CreateTag, DeleteTag, GetTag, ListTags, UpdateTag};
use crate::core::auth::CurrentUser;
use crate::core::error::DomainError;
use crate::core::extractors::{ListQuery, PathParams, ValidatedJson};
use crate::core::query::{Page, PageLimits};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use uuid::Uuid;

/// Tag-specific AppState
#[derive(Clone)]
pub struct TagAppState {
    pub list: ListTags,
    pub get: GetTag,
    pub create: CreateTag,
    pub update: UpdateTag,
    pub delete: DeleteTag,
}

impl TagAppState {
    pub fn new(service: TagService, limits: PageLimits) -> Self {
        Self {
            list: ListTags::new(service.clone(), limits),
            get: GetTag::new(service.clone()),
            create: CreateTag::new(service.clone()),
            update: UpdateTag::new(service.clone()),
            delete: DeleteTag::new(service),
        }
    }
}

pub async fn list_tags(
    State(state): State<TagAppState>,
    user: CurrentUser,
    query: ListQuery<TagFilters>,
) -> Result<Json<Page<TagPublic>>, DomainError> {
    state.list.execute(&user, query).await.map(Json)
}

pub async fn get_tag(
    State(state): State<TagAppState>,
    user: CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> Result<Json<TagPublic>, DomainError> {
    state.get.execute(&user, id).await.map(Json)
}

pub async fn create_tag(
    State(state): State<TagAppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<TagCreateIn>,
) -> Result<(StatusCode, Json<TagPublic>), DomainError> {
    let tag = state.create.execute(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

pub async fn update_tag(
    State(state): State<TagAppState>,
    user: CurrentUser,
    PathParams(id): PathParams<Uuid>,
    ValidatedJson(patch): ValidatedJson<TagUpdate>,
) -> Result<Json<TagPublic>, DomainError> {
    state.update.execute(&user, id, patch).await.map(Json)
}

pub async fn delete_tag(
    State(state): State<TagAppState>,
    user: CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> Result<StatusCode, DomainError> {
    state.delete.execute(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
