//! Card use cases

use super::model::{CardFilters, CardSummary, CreditCardCreateIn, CreditCardPublic, CreditCardUpdate};
use super::service::CardService;
use crate::core::auth::CurrentUser;
use crate::core::error::DomainResult;
use crate::core::extractors::ListQuery;
use crate::core::options::SearchOptions;
use crate::core::query::{Page, PageLimits};
use uuid::Uuid;

#[derive(Clone)]
pub struct ListCards {
    service: CardService,
    limits: PageLimits,
}

impl ListCards {
    pub fn new(service: CardService, limits: PageLimits) -> Self {
        Self { service, limits }
    }

    pub async fn execute(
        &self,
        user: &CurrentUser,
        query: ListQuery<CardFilters>,
    ) -> DomainResult<Page<CreditCardPublic>> {
        let ListQuery {
            params,
            filters,
            extra,
        } = query;

        let options = SearchOptions::builder()
            .filters(
                extra
                    .equals_opt("bank", filters.bank)
                    .equals_opt("brand", filters.brand),
            )
            .pagination(params.pagination(self.limits))
            .sorting(params.sorting()?)
            .build();

        self.service.list_cards(user, filters.user_id, options).await
    }
}

#[derive(Clone)]
pub struct GetCard {
    service: CardService,
}

impl GetCard {
    pub fn new(service: CardService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, user: &CurrentUser, id: Uuid) -> DomainResult<CreditCardPublic> {
        self.service.get_card(user, &id).await
    }
}

#[derive(Clone)]
pub struct CreateCard {
    service: CardService,
}

impl CreateCard {
    pub fn new(service: CardService) -> Self {
        Self { service }
    }

    pub async fn execute(
        &self,
        user: &CurrentUser,
        payload: CreditCardCreateIn,
    ) -> DomainResult<CreditCardPublic> {
        self.service.create_card(user, payload).await
    }
}

#[derive(Clone)]
pub struct UpdateCard {
    service: CardService,
}

impl UpdateCard {
    pub fn new(service: CardService) -> Self {
        Self { service }
    }

    pub async fn execute(
        &self,
        user: &CurrentUser,
        id: Uuid,
        patch: CreditCardUpdate,
    ) -> DomainResult<CreditCardPublic> {
        self.service.update_card(user, &id, patch).await
    }
}

#[derive(Clone)]
pub struct DeleteCard {
    service: CardService,
}

impl DeleteCard {
    pub fn new(service: CardService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, user: &CurrentUser, id: Uuid) -> DomainResult<()> {
        self.service.delete_card(user, &id).await
    }
}

#[derive(Clone)]
pub struct GetCardSummary {
    service: CardService,
}

impl GetCardSummary {
    pub fn new(service: CardService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, user: &CurrentUser, id: Uuid) -> DomainResult<CardSummary> {
        self.service.card_summary(user, &id).await
    }
}
