//! Transaction tag HTTP handlers

use super::model::{TransactionTagCreate, TransactionTagFilters, TransactionTagPublic, TransactionTagUpdate};
use super::service::TransactionTagService;
use super::usecases::{
    CreateTransactionTag, DeleteTransactionTag, GetTransactionTag, ListTransactionTags,
    UpdateTransactionTag,
};
use crate::core::auth::CurrentUser;
use crate::core::error::DomainError;
use crate::core::extractors::{JsonBody, ListQuery, PathParams, ValidatedJson};
use crate::core::query::{Page, PageLimits};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use uuid::Uuid;

/// TransactionTag-specific AppState
#[derive(Clone)]
pub struct TransactionTagAppState {
    pub list: ListTransactionTags,
    pub get: GetTransactionTag,
    pub create: CreateTransactionTag,
    pub update: UpdateTransactionTag,
    pub delete: DeleteTransactionTag,
}

impl TransactionTagAppState {
    pub fn new(service: TransactionTagService, limits: PageLimits) -> Self {
        Self {
            list: ListTransactionTags::new(service.clone(), limits),
            get: GetTransactionTag::new(service.clone()),
            create: CreateTransactionTag::new(service.clone()),
            update: UpdateTransactionTag::new(service.clone()),
            delete: DeleteTransactionTag::new(service),
        }
    }
}

pub async fn list_transaction_tags(
    State(state): State<TransactionTagAppState>,
    user: CurrentUser,
    query: ListQuery<TransactionTagFilters>,
) -> Result<Json<Page<TransactionTagPublic>>, DomainError> {
    state.list.execute(&user, query).await.map(Json)
}

pub async fn get_transaction_tag(
    State(state): State<TransactionTagAppState>,
    user: CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> Result<Json<TransactionTagPublic>, DomainError> {
    state.get.execute(&user, id).await.map(Json)
}

pub async fn create_transaction_tag(
    State(state): State<TransactionTagAppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<TransactionTagCreate>,
) -> Result<(StatusCode, Json<TransactionTagPublic>), DomainError> {
    let link = state.create.execute(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

pub async fn update_transaction_tag(
    State(state): State<TransactionTagAppState>,
    user: CurrentUser,
    PathParams(id): PathParams<Uuid>,
    JsonBody(patch): JsonBody<TransactionTagUpdate>,
) -> Result<Json<TransactionTagPublic>, DomainError> {
    state.update.execute(&user, id, patch).await.map(Json)
}

pub async fn delete_transaction_tag(
    State(state): State<TransactionTagAppState>,
    user: CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> Result<StatusCode, DomainError> {
    state.delete.execute(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
