//! Resolution of the user that owns a record
//!
//! Cards, tags and tag rules carry `user_id` directly. Statements and
//! transactions are owned through the `transaction -> statement -> card`
//! chain.

use super::Repositories;
use super::card_statements::CardStatement;
use super::cards::CreditCard;
use super::transactions::Transaction;
use crate::core::auth::CurrentUser;
use crate::core::error::DomainResult;
use crate::core::options::{SearchFilters, SearchOptions, SearchPagination};
use crate::core::repository::Repository;
use std::sync::Arc;
use uuid::Uuid;

/// Walks the ownership chain of statements and transactions
#[derive(Clone)]
pub struct Ownership {
    cards: Arc<dyn Repository<CreditCard>>,
    statements: Arc<dyn Repository<CardStatement>>,
    transactions: Arc<dyn Repository<Transaction>>,
}

/// Fetch every record matching `filters`
pub(crate) async fn all<T: crate::core::entity::Record>(
    repository: &dyn Repository<T>,
    filters: SearchFilters,
) -> DomainResult<Vec<T>> {
    let total = repository.count(&filters).await?;
    let options = SearchOptions::builder()
        .filters(filters)
        .pagination(SearchPagination::new(0, total.max(1) as i64))
        .build();
    repository.list(&options).await
}

/// Treat a NotFound from an ownership check as a pass
///
/// Used before create and update, where the repository reports a missing
/// parent as a dangling reference (InvalidData) instead.
pub fn allow_missing(check: DomainResult<()>) -> DomainResult<()> {
    match check {
        Err(e) if e.is_not_found() => Ok(()),
        other => other,
    }
}

impl Ownership {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            cards: repos.cards.clone(),
            statements: repos.card_statements.clone(),
            transactions: repos.transactions.clone(),
        }
    }

    pub async fn card_owner(&self, card_id: &Uuid) -> DomainResult<Uuid> {
        Ok(self.cards.get_by_id(card_id).await?.user_id)
    }

    pub async fn statement_owner(&self, statement_id: &Uuid) -> DomainResult<Uuid> {
        let statement = self.statements.get_by_id(statement_id).await?;
        self.card_owner(&statement.card_id).await
    }

    pub async fn transaction_owner(&self, transaction_id: &Uuid) -> DomainResult<Uuid> {
        let transaction = self.transactions.get_by_id(transaction_id).await?;
        self.statement_owner(&transaction.statement_id).await
    }

    /// Forbidden unless `user` may act on the card
    pub async fn ensure_card(&self, user: &CurrentUser, card_id: &Uuid) -> DomainResult<()> {
        let owner = self.card_owner(card_id).await?;
        user.ensure_owner(owner)
    }

    /// Forbidden unless `user` may act on the statement
    pub async fn ensure_statement(&self, user: &CurrentUser, statement_id: &Uuid) -> DomainResult<()> {
        let owner = self.statement_owner(statement_id).await?;
        user.ensure_owner(owner)
    }

    /// Forbidden unless `user` may act on the transaction
    pub async fn ensure_transaction(
        &self,
        user: &CurrentUser,
        transaction_id: &Uuid,
    ) -> DomainResult<()> {
        let owner = self.transaction_owner(transaction_id).await?;
        user.ensure_owner(owner)
    }

    /// Ids of the cards owned by `user_id`
    pub async fn card_ids(&self, user_id: Uuid) -> DomainResult<Vec<Uuid>> {
        let cards = all(
            self.cards.as_ref(),
            SearchFilters::new().equals("user_id", user_id),
        )
        .await?;
        Ok(cards.into_iter().map(|c| c.id).collect())
    }

    /// Ids of the statements on cards owned by `user_id`
    pub async fn statement_ids(&self, user_id: Uuid) -> DomainResult<Vec<Uuid>> {
        let card_ids = self.card_ids(user_id).await?;
        let statements = all(
            self.statements.as_ref(),
            SearchFilters::new().any_of("card_id", card_ids),
        )
        .await?;
        Ok(statements.into_iter().map(|s| s.id).collect())
    }

    /// Ids of the transactions on statements owned by `user_id`
    pub async fn transaction_ids(&self, user_id: Uuid) -> DomainResult<Vec<Uuid>> {
        let statement_ids = self.statement_ids(user_id).await?;
        let transactions = all(
            self.transactions.as_ref(),
            SearchFilters::new().any_of("statement_id", statement_ids),
        )
        .await?;
        Ok(transactions.into_iter().map(|t| t.id).collect())
    }
}
