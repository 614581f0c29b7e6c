//! Transaction use cases

use super::model::{TransactionCreate, TransactionFilters, TransactionPublic, TransactionUpdate};
use super::service::TransactionService;
use super::summary::{SpendingQuery, SpendingSummary};
use crate::core::auth::CurrentUser;
use crate::core::error::DomainResult;
use crate::core::extractors::ListQuery;
use crate::core::options::SearchOptions;
use crate::core::query::{Page, PageLimits};
use uuid::Uuid;

#[derive(Clone)]
pub struct ListTransactions {
    service: TransactionService,
    limits: PageLimits,
}

impl ListTransactions {
    pub fn new(service: TransactionService, limits: PageLimits) -> Self {
        Self { service, limits }
    }

    /// `date_from`/`date_to` bound `txn_date` and `amount_min`/`amount_max`
    /// bound `amount`, all inclusive
    pub async fn execute(
        &self,
        user: &CurrentUser,
        query: ListQuery<TransactionFilters>,
    ) -> DomainResult<Page<TransactionPublic>> {
        let ListQuery {
            params,
            filters,
            extra,
        } = query;

        let options = SearchOptions::builder()
            .filters(
                extra
                    .equals_opt("statement_id", filters.statement_id)
                    .equals_opt("currency", filters.currency.map(|c| c.to_uppercase()))
                    .between("txn_date", filters.date_from, filters.date_to)
                    .between("amount", filters.amount_min, filters.amount_max),
            )
            .pagination(params.pagination(self.limits))
            .sorting(params.sorting()?)
            .build();

        self.service.list_transactions(user, options).await
    }
}

#[derive(Clone)]
pub struct GetTransaction {
    service: TransactionService,
}

impl GetTransaction {
    pub fn new(service: TransactionService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, user: &CurrentUser, id: Uuid) -> DomainResult<TransactionPublic> {
        self.service.get_transaction(user, &id).await
    }
}

#[derive(Clone)]
pub struct CreateTransaction {
    service: TransactionService,
}

impl CreateTransaction {
    pub fn new(service: TransactionService) -> Self {
        Self { service }
    }

    pub async fn execute(
        &self,
        user: &CurrentUser,
        payload: TransactionCreate,
    ) -> DomainResult<TransactionPublic> {
        self.service.create_transaction(user, payload).await
    }
}

#[derive(Clone)]
pub struct UpdateTransaction {
    service: TransactionService,
}

impl UpdateTransaction {
    pub fn new(service: TransactionService) -> Self {
        Self { service }
    }

    pub async fn execute(
        &self,
        user: &CurrentUser,
        id: Uuid,
        patch: TransactionUpdate,
    ) -> DomainResult<TransactionPublic> {
        self.service.update_transaction(user, &id, patch).await
    }
}

#[derive(Clone)]
pub struct DeleteTransaction {
    service: TransactionService,
}

impl DeleteTransaction {
    pub fn new(service: TransactionService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, user: &CurrentUser, id: Uuid) -> DomainResult<()> {
        self.service.delete_transaction(user, &id).await
    }
}

#[derive(Clone)]
pub struct GetSpendingSummary {
    service: TransactionService,
}

impl GetSpendingSummary {
    pub fn new(service: TransactionService) -> Self {
        Self { service }
    }

    pub async fn execute(
        &self,
        user: &CurrentUser,
        query: SpendingQuery,
    ) -> DomainResult<SpendingSummary> {
        self.service.spending_summary(user, query).await
    }
}
