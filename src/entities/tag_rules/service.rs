//! Tag rule service and rule application

use super::engine;
use super::model::{
    ApplyRulesRequest, ApplyRulesResponse, TagRule, TagRuleCreateIn, TagRulePublic, TagRuleUpdate,
};
use crate::core::auth::CurrentUser;
use crate::core::error::{DomainError, DomainResult};
use crate::core::options::{SearchFilters, SearchOptions};
use crate::core::query::Page;
use crate::core::repository::Repository;
use crate::entities::Repositories;
use crate::entities::ownership::{Ownership, all};
use crate::entities::tags::Tag;
use crate::entities::transaction_tags::{TransactionTag, TransactionTagCreate};
use crate::entities::transactions::Transaction;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct TagRuleService {
    tag_rules: Arc<dyn Repository<TagRule>>,
    tags: Arc<dyn Repository<Tag>>,
    transactions: Arc<dyn Repository<Transaction>>,
    transaction_tags: Arc<dyn Repository<TransactionTag>>,
    ownership: Ownership,
}

impl TagRuleService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            tag_rules: repos.tag_rules.clone(),
            tags: repos.tags.clone(),
            transactions: repos.transactions.clone(),
            transaction_tags: repos.transaction_tags.clone(),
            ownership: Ownership::new(repos),
        }
    }

    async fn owned(&self, user: &CurrentUser, id: &Uuid) -> DomainResult<TagRule> {
        let rule = self.tag_rules.get_by_id(id).await?;
        user.ensure_owner(rule.user_id)?;
        Ok(rule)
    }

    /// Forbidden when the tag belongs to someone other than `owner`
    ///
    /// A missing tag passes; the repository reports it as a dangling
    /// reference.
    async fn ensure_tag_of(&self, owner: Uuid, tag_id: &Uuid) -> DomainResult<()> {
        match self.tags.get_by_id(tag_id).await {
            Ok(tag) if tag.user_id != owner => Err(DomainError::forbidden(format!(
                "tag {} belongs to another user",
                tag_id
            ))),
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(e),
        }
    }

    pub async fn create_rule(
        &self,
        user: &CurrentUser,
        payload: TagRuleCreateIn,
    ) -> DomainResult<TagRulePublic> {
        self.ensure_tag_of(user.id, &payload.tag_id).await?;
        let rule = self.tag_rules.create(payload.into_create(user.id)).await?;
        Ok(rule.into())
    }

    pub async fn get_rule(&self, user: &CurrentUser, id: &Uuid) -> DomainResult<TagRulePublic> {
        Ok(self.owned(user, id).await?.into())
    }

    pub async fn list_rules(
        &self,
        user: &CurrentUser,
        user_id: Option<Uuid>,
        options: SearchOptions,
    ) -> DomainResult<Page<TagRulePublic>> {
        let options = match user.scope(user_id)? {
            Some(owner) => options.narrowed(|f| f.equals("user_id", owner)),
            None => options,
        };
        let (rules, count) = self.tag_rules.search(&options).await?;
        Ok(Page::new(rules, count).map(Into::into))
    }

    pub async fn update_rule(
        &self,
        user: &CurrentUser,
        id: &Uuid,
        patch: TagRuleUpdate,
    ) -> DomainResult<TagRulePublic> {
        let rule = self.owned(user, id).await?;
        if let Some(tag_id) = &patch.tag_id {
            self.ensure_tag_of(rule.user_id, tag_id).await?;
        }
        Ok(self.tag_rules.update(id, patch).await?.into())
    }

    pub async fn delete_rule(&self, user: &CurrentUser, id: &Uuid) -> DomainResult<()> {
        self.owned(user, id).await?;
        self.tag_rules.delete(id).await
    }

    /// Transactions of `user` selected by the request
    ///
    /// The request only narrows the caller's own transactions, so an id
    /// naming someone else's record selects nothing.
    async fn candidates(
        &self,
        user: &CurrentUser,
        request: &ApplyRulesRequest,
    ) -> DomainResult<Vec<Transaction>> {
        let statement_ids = self.ownership.statement_ids(user.id).await?;
        let mut filters = SearchFilters::new().any_of("statement_id", statement_ids);

        if let Some(transaction_id) = request.transaction_id {
            filters = filters.equals("id", transaction_id);
        } else if let Some(statement_id) = request.statement_id {
            filters = filters.equals("statement_id", statement_id);
        }

        let filters = filters.between("txn_date", request.date_from, request.date_to);
        all(self.transactions.as_ref(), filters).await
    }

    /// Run the caller's enabled rules over the selected transactions
    ///
    /// Tags already attached are skipped. A dry run reports the would-be
    /// applications without writing them.
    pub async fn apply_rules(
        &self,
        user: &CurrentUser,
        request: ApplyRulesRequest,
    ) -> DomainResult<ApplyRulesResponse> {
        let rules = all(
            self.tag_rules.as_ref(),
            SearchFilters::new().equals("user_id", user.id),
        )
        .await?;
        let matchers = engine::compile(&engine::applicable(rules))?;

        let transactions = self.candidates(user, &request).await?;
        let existing: HashSet<(Uuid, Uuid)> = all(
            self.transaction_tags.as_ref(),
            SearchFilters::new().any_of("transaction_id", transactions.iter().map(|t| t.id)),
        )
        .await?
        .into_iter()
        .map(|link| (link.transaction_id, link.tag_id))
        .collect();

        let planned = engine::plan(&matchers, &transactions, &existing);

        let mut applied = planned.len();
        if !request.dry_run {
            applied = 0;
            for tag in &planned {
                let created = self
                    .transaction_tags
                    .create(TransactionTagCreate {
                        transaction_id: tag.transaction_id,
                        tag_id: tag.tag_id,
                    })
                    .await;
                match created {
                    Ok(_) => applied += 1,
                    // tagged concurrently since `existing` was read
                    Err(DomainError::Conflict { .. }) => {}
                    Err(e) => return Err(e),
                }
            }
        }

        tracing::info!(
            user_id = %user.id,
            rules = matchers.len(),
            evaluated = transactions.len(),
            applied,
            dry_run = request.dry_run,
            "applied tag rules"
        );

        Ok(ApplyRulesResponse {
            evaluated_count: transactions.len(),
            applied_count: applied,
            details: request.dry_run.then_some(planned),
        })
    }
}
