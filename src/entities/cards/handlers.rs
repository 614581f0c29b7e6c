//! Card HTTP handlers

use super::model::{CardFilters, CardSummary, CreditCardCreateIn, CreditCardPublic, CreditCardUpdate};
use super::service::CardService;
use super::usecases::{CreateCard, DeleteCard, GetCard, GetCardSummary, ListCards, UpdateCard};
use crate::core::auth::CurrentUser;
use crate::core::error::DomainError;
use crate::core::extractors::{ListQuery, PathParams, ValidatedJson};
use crate::core::query::{Page, PageLimits};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use uuid::Uuid;

/// Card-specific AppState
#[derive(Clone)]
pub struct CardAppState {
    pub list: ListCards,
    pub get: GetCard,
    pub create: CreateCard,
    pub update: UpdateCard,
    pub delete: DeleteCard,
    pub summary: GetCardSummary,
}

impl CardAppState {
    pub fn new(service: CardService, limits: PageLimits) -> Self {
        Self {
            list: ListCards::new(service.clone(), limits),
            get: GetCard::new(service.clone()),
            create: CreateCard::new(service.clone()),
            update: UpdateCard::new(service.clone()),
            delete: DeleteCard::new(service.clone()),
            summary: GetCardSummary::new(service),
        }
    }
}

pub async fn list_cards(
    State(state): State<CardAppState>,
    user: CurrentUser,
    query: ListQuery<CardFilters>,
) -> Result<Json<Page<CreditCardPublic>>, DomainError> {
    state.list.execute(&user, query).await.map(Json)
}

pub async fn get_card(
    State(state): State<CardAppState>,
    user: CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> Result<Json<CreditCardPublic>, DomainError> {
    state.get.execute(&user, id).await.map(Json)
}

pub async fn create_card(
    State(state): State<CardAppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreditCardCreateIn>,
) -> Result<(StatusCode, Json<CreditCardPublic>), DomainError> {
    let card = state.create.execute(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

pub async fn update_card(
    State(state): State<CardAppState>,
    user: CurrentUser,
    PathParams(id): PathParams<Uuid>,
    ValidatedJson(patch): ValidatedJson<CreditCardUpdate>,
) -> Result<Json<CreditCardPublic>, DomainError> {
    state.update.execute(&user, id, patch).await.map(Json)
}

pub async fn delete_card(
    State(state): State<CardAppState>,
    user: CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> Result<StatusCode, DomainError> {
    state.delete.execute(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn card_summary(
    State(state): State<CardAppState>,
    user: CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> Result<Json<CardSummary>, DomainError> {
    state.summary.execute(&user, id).await.map(Json)
}
