//! Card statement HTTP handlers

use super::model::{CardStatementCreate, CardStatementFilters, CardStatementPublic, CardStatementUpdate};
use super::service::CardStatementService;
use super::usecases::{
    CreateCardStatement, DeleteCardStatement, GetCardStatement, ListCardStatements,
    UpdateCardStatement,
};
use crate::core::auth::CurrentUser;
use crate::core::error::DomainError;
use crate::core::extractors::{ListQuery, PathParams, ValidatedJson};
use crate::core::query::{Page, PageLimits};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use uuid::Uuid;

/// CardStatement-specific AppState
#[derive(Clone)]
pub struct CardStatementAppState {
    pub list: ListCardStatements,
    pub get: GetCardStatement,
    pub create: CreateCardStatement,
    pub update: UpdateCardStatement,
    pub delete: DeleteCardStatement,
}

impl CardStatementAppState {
    pub fn new(service: CardStatementService, limits: PageLimits) -> Self {
        Self {
            list: ListCardStatements::new(service.clone(), limits),
            get: GetCardStatement::new(service.clone()),
            create: CreateCardStatement::new(service.clone()),
            update: UpdateCardStatement::new(service.clone()),
            delete: DeleteCardStatement::new(service),
        }
    }
}

pub async fn list_card_statements(
    State(state): State<CardStatementAppState>,
    user: CurrentUser,
    query: ListQuery<CardStatementFilters>,
) -> Result<Json<Page<CardStatementPublic>>, DomainError> {
    state.list.execute(&user, query).await.map(Json)
}

pub async fn get_card_statement(
    State(state): State<CardStatementAppState>,
    user: CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> Result<Json<CardStatementPublic>, DomainError> {
    state.get.execute(&user, id).await.map(Json)
}

pub async fn create_card_statement(
    State(state): State<CardStatementAppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CardStatementCreate>,
) -> Result<(StatusCode, Json<CardStatementPublic>), DomainError> {
    let statement = state.create.execute(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(statement)))
}

pub async fn update_card_statement(
    State(state): State<CardStatementAppState>,
    user: CurrentUser,
    PathParams(id): PathParams<Uuid>,
    ValidatedJson(patch): ValidatedJson<CardStatementUpdate>,
) -> Result<Json<CardStatementPublic>, DomainError> {
    state.update.execute(&user, id, patch).await.map(Json)
}

pub async fn delete_card_statement(
    State(state): State<CardStatementAppState>,
    user: CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> Result<StatusCode, DomainError> {
    state.delete.execute(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
