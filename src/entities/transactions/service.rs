//! Transaction service

use super::model::{Transaction, TransactionCreate, TransactionPublic, TransactionUpdate};
use super::summary::{self, SpendingQuery, SpendingSummary, SummaryGroupBy, SummaryPeriod};
use crate::core::auth::CurrentUser;
use crate::core::error::DomainResult;
use crate::core::options::{SearchFilters, SearchOptions};
use crate::core::query::Page;
use crate::core::repository::Repository;
use crate::entities::Repositories;
use crate::entities::ownership::{Ownership, all, allow_missing};
use crate::entities::tags::Tag;
use crate::entities::transaction_tags::TransactionTag;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct TransactionService {
    transactions: Arc<dyn Repository<Transaction>>,
    transaction_tags: Arc<dyn Repository<TransactionTag>>,
    tags: Arc<dyn Repository<Tag>>,
    ownership: Ownership,
}

impl TransactionService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            transactions: repos.transactions.clone(),
            transaction_tags: repos.transaction_tags.clone(),
            tags: repos.tags.clone(),
            ownership: Ownership::new(repos),
        }
    }

    pub async fn create_transaction(
        &self,
        user: &CurrentUser,
        payload: TransactionCreate,
    ) -> DomainResult<TransactionPublic> {
        allow_missing(
            self.ownership
                .ensure_statement(user, &payload.statement_id)
                .await,
        )?;
        Ok(self.transactions.create(payload).await?.into())
    }

    pub async fn get_transaction(
        &self,
        user: &CurrentUser,
        id: &Uuid,
    ) -> DomainResult<TransactionPublic> {
        let transaction = self.transactions.get_by_id(id).await?;
        self.ownership
            .ensure_statement(user, &transaction.statement_id)
            .await?;
        Ok(transaction.into())
    }

    pub async fn list_transactions(
        &self,
        user: &CurrentUser,
        options: SearchOptions,
    ) -> DomainResult<Page<TransactionPublic>> {
        let options = match user.scope(None)? {
            Some(owner) => {
                let statement_ids = self.ownership.statement_ids(owner).await?;
                options.narrowed(|f| f.any_of("statement_id", statement_ids))
            }
            None => options,
        };
        let (transactions, count) = self.transactions.search(&options).await?;
        Ok(Page::new(transactions, count).map(Into::into))
    }

    pub async fn update_transaction(
        &self,
        user: &CurrentUser,
        id: &Uuid,
        patch: TransactionUpdate,
    ) -> DomainResult<TransactionPublic> {
        self.ownership.ensure_transaction(user, id).await?;
        if let Some(statement_id) = &patch.statement_id {
            allow_missing(self.ownership.ensure_statement(user, statement_id).await)?;
        }
        Ok(self.transactions.update(id, patch).await?.into())
    }

    /// Delete a transaction together with its tag applications
    pub async fn delete_transaction(&self, user: &CurrentUser, id: &Uuid) -> DomainResult<()> {
        self.ownership.ensure_transaction(user, id).await?;

        let untagged = self
            .transaction_tags
            .delete_where(&SearchFilters::new().equals("transaction_id", *id))
            .await?;
        tracing::debug!(transaction_id = %id, count = untagged, "removed tag applications");

        self.transactions.delete(id).await
    }

    /// Labels of the tags on each of `transactions`
    async fn labels_of(
        &self,
        transactions: &[Transaction],
    ) -> DomainResult<HashMap<Uuid, Vec<String>>> {
        let links = all(
            self.transaction_tags.as_ref(),
            SearchFilters::new().any_of("transaction_id", transactions.iter().map(|t| t.id)),
        )
        .await?;
        let tags: HashMap<Uuid, String> = all(
            self.tags.as_ref(),
            SearchFilters::new().any_of("id", links.iter().map(|l| l.tag_id)),
        )
        .await?
        .into_iter()
        .map(|tag| (tag.id, tag.label))
        .collect();

        let mut labels: HashMap<Uuid, Vec<String>> = HashMap::new();
        for link in links {
            if let Some(label) = tags.get(&link.tag_id) {
                labels
                    .entry(link.transaction_id)
                    .or_default()
                    .push(label.clone());
            }
        }
        Ok(labels)
    }

    /// Spending of the caller's own transactions, grouped by tag or month
    pub async fn spending_summary(
        &self,
        user: &CurrentUser,
        query: SpendingQuery,
    ) -> DomainResult<SpendingSummary> {
        query.check_range()?;
        let currencies = query.currency_list()?;

        let statement_ids = self.ownership.statement_ids(user.id).await?;
        let transactions = all(
            self.transactions.as_ref(),
            SearchFilters::new()
                .any_of("statement_id", statement_ids)
                .between("txn_date", query.date_from, query.date_to),
        )
        .await?;

        let labels = match query.group_by {
            SummaryGroupBy::Tag => self.labels_of(&transactions).await?,
            SummaryGroupBy::Month => HashMap::new(),
        };
        let (currencies, data) =
            summary::summarize(&transactions, &labels, query.group_by, &currencies);

        tracing::debug!(
            user_id = %user.id,
            transactions = transactions.len(),
            groups = data.len(),
            "summarized spending"
        );

        Ok(SpendingSummary {
            group_by: query.group_by,
            period: SummaryPeriod {
                from: query.date_from,
                to: query.date_to,
            },
            currencies,
            data,
        })
    }
}
