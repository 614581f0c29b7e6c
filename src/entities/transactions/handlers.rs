//! Transaction HTTP handlers, including the per-transaction tag routes

use super::model::{TransactionCreate, TransactionFilters, TransactionPublic, TransactionUpdate};
use super::service::TransactionService;
use super::summary::{SpendingQuery, SpendingSummary};
use super::usecases::{
    CreateTransaction, DeleteTransaction, GetSpendingSummary, GetTransaction, ListTransactions,
    UpdateTransaction,
};
use crate::core::auth::CurrentUser;
use crate::core::error::DomainError;
use crate::core::extractors::{ListQuery, PathParams, QueryParams, ValidatedJson};
use crate::core::query::{Page, PageLimits};
use crate::entities::tags::TagPublic;
use crate::entities::transaction_tags::TransactionTagPublic;
use crate::entities::transaction_tags::service::TransactionTagService;
use crate::entities::transaction_tags::usecases::{ListTagsOfTransaction, TagTransaction, UntagTransaction};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use uuid::Uuid;

/// Transaction-specific AppState
#[derive(Clone)]
pub struct TransactionAppState {
    pub list: ListTransactions,
    pub get: GetTransaction,
    pub create: CreateTransaction,
    pub update: UpdateTransaction,
    pub delete: DeleteTransaction,
    pub summary: GetSpendingSummary,
    pub tags: ListTagsOfTransaction,
    pub tag: TagTransaction,
    pub untag: UntagTransaction,
}

impl TransactionAppState {
    pub fn new(
        service: TransactionService,
        tagging: TransactionTagService,
        limits: PageLimits,
    ) -> Self {
        Self {
            list: ListTransactions::new(service.clone(), limits),
            get: GetTransaction::new(service.clone()),
            create: CreateTransaction::new(service.clone()),
            update: UpdateTransaction::new(service.clone()),
            delete: DeleteTransaction::new(service.clone()),
            summary: GetSpendingSummary::new(service),
            tags: ListTagsOfTransaction::new(tagging.clone()),
            tag: TagTransaction::new(tagging.clone()),
            untag: UntagTransaction::new(tagging),
        }
    }
}

pub async fn list_transactions(
    State(state): State<TransactionAppState>,
    user: CurrentUser,
    query: ListQuery<TransactionFilters>,
) -> Result<Json<Page<TransactionPublic>>, DomainError> {
    state.list.execute(&user, query).await.map(Json)
}

pub async fn get_transaction(
    State(state): State<TransactionAppState>,
    user: CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> Result<Json<TransactionPublic>, DomainError> {
    state.get.execute(&user, id).await.map(Json)
}

pub async fn create_transaction(
    State(state): State<TransactionAppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<TransactionCreate>,
) -> Result<(StatusCode, Json<TransactionPublic>), DomainError> {
    let transaction = state.create.execute(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn update_transaction(
    State(state): State<TransactionAppState>,
    user: CurrentUser,
    PathParams(id): PathParams<Uuid>,
    ValidatedJson(patch): ValidatedJson<TransactionUpdate>,
) -> Result<Json<TransactionPublic>, DomainError> {
    state.update.execute(&user, id, patch).await.map(Json)
}

pub async fn delete_transaction(
    State(state): State<TransactionAppState>,
    user: CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> Result<StatusCode, DomainError> {
    state.delete.execute(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn spending_summary(
    State(state): State<TransactionAppState>,
    user: CurrentUser,
    QueryParams(query): QueryParams<SpendingQuery>,
) -> Result<Json<SpendingSummary>, DomainError> {
    state.summary.execute(&user, query).await.map(Json)
}

pub async fn list_transaction_tags(
    State(state): State<TransactionAppState>,
    user: CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> Result<Json<Page<TagPublic>>, DomainError> {
    state.tags.execute(&user, id).await.map(Json)
}

pub async fn tag_transaction(
    State(state): State<TransactionAppState>,
    user: CurrentUser,
    PathParams((id, tag_id)): PathParams<(Uuid, Uuid)>,
) -> Result<(StatusCode, Json<TransactionTagPublic>), DomainError> {
    let link = state.tag.execute(&user, id, tag_id).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

pub async fn untag_transaction(
    State(state): State<TransactionAppState>,
    user: CurrentUser,
    PathParams((id, tag_id)): PathParams<(Uuid, Uuid)>,
) -> Result<StatusCode, DomainError> {
    state.untag.execute(&user, id, tag_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
