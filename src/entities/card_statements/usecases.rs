//! Card statement use cases
//!
//! Each use case is one application operation. List use cases turn the
//! primitive query inputs (optional filter values, skip/limit integers,
//! sort strings) into [`SearchOptions`] before calling the service.

use super::model::{CardStatementCreate, CardStatementFilters, CardStatementPublic, CardStatementUpdate};
use super::service::CardStatementService;
use crate::core::auth::CurrentUser;
use crate::core::error::DomainResult;
use crate::core::extractors::ListQuery;
use crate::core::options::SearchOptions;
use crate::core::query::{Page, PageLimits};
use uuid::Uuid;

#[derive(Clone)]
pub struct ListCardStatements {
    service: CardStatementService,
    limits: PageLimits,
}

impl ListCardStatements {
    pub fn new(service: CardStatementService, limits: PageLimits) -> Self {
        Self { service, limits }
    }

    pub async fn execute(
        &self,
        user: &CurrentUser,
        query: ListQuery<CardStatementFilters>,
    ) -> DomainResult<Page<CardStatementPublic>> {
        let ListQuery {
            params,
            filters,
            extra,
        } = query;

        let options = SearchOptions::builder()
            .filters(
                extra
                    .equals_opt("card_id", filters.card_id)
                    .equals_opt("is_fully_paid", filters.is_fully_paid)
                    .between("close_date", filters.close_from, filters.close_to),
            )
            .pagination(params.pagination(self.limits))
            .sorting(params.sorting()?)
            .build();

        self.service.list_statements(user, options).await
    }
}

#[derive(Clone)]
pub struct GetCardStatement {
    service: CardStatementService,
}

impl GetCardStatement {
    pub fn new(service: CardStatementService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, user: &CurrentUser, id: Uuid) -> DomainResult<CardStatementPublic> {
        self.service.get_statement(user, &id).await
    }
}

#[derive(Clone)]
pub struct CreateCardStatement {
    service: CardStatementService,
}

impl CreateCardStatement {
    pub fn new(service: CardStatementService) -> Self {
        Self { service }
    }

    pub async fn execute(
        &self,
        user: &CurrentUser,
        payload: CardStatementCreate,
    ) -> DomainResult<CardStatementPublic> {
        self.service.create_statement(user, payload).await
    }
}

#[derive(Clone)]
pub struct UpdateCardStatement {
    service: CardStatementService,
}

impl UpdateCardStatement {
    pub fn new(service: CardStatementService) -> Self {
        Self { service }
    }

    pub async fn execute(
        &self,
        user: &CurrentUser,
        id: Uuid,
        patch: CardStatementUpdate,
    ) -> DomainResult<CardStatementPublic> {
        self.service.update_statement(user, &id, patch).await
    }
}

#[derive(Clone)]
pub struct DeleteCardStatement {
    service: CardStatementService,
}

impl DeleteCardStatement {
    pub fn new(service: CardStatementService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, user: &CurrentUser, id: Uuid) -> DomainResult<()> {
        self.service.delete_statement(user, &id).await
    }
}
