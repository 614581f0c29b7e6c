//! Card statement service

use super::model::{CardStatement, CardStatementCreate, CardStatementPublic, CardStatementUpdate};
use crate::core::auth::CurrentUser;
use crate::core::error::DomainResult;
use crate::core::options::SearchOptions;
use crate::core::query::Page;
use crate::core::repository::Repository;
use crate::entities::Repositories;
use crate::entities::ownership::{Ownership, allow_missing};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct CardStatementService {
    statements: Arc<dyn Repository<CardStatement>>,
    ownership: Ownership,
}

impl CardStatementService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            statements: repos.card_statements.clone(),
            ownership: Ownership::new(repos),
        }
    }

    /// Create a statement on a card the caller owns
    ///
    /// A missing card surfaces as InvalidData, like any dangling reference.
    pub async fn create_statement(
        &self,
        user: &CurrentUser,
        payload: CardStatementCreate,
    ) -> DomainResult<CardStatementPublic> {
        allow_missing(self.ownership.ensure_card(user, &payload.card_id).await)?;
        let statement = self.statements.create(payload).await?;
        Ok(statement.into())
    }

    pub async fn get_statement(
        &self,
        user: &CurrentUser,
        id: &Uuid,
    ) -> DomainResult<CardStatementPublic> {
        let statement = self.statements.get_by_id(id).await?;
        self.ownership.ensure_card(user, &statement.card_id).await?;
        Ok(statement.into())
    }

    /// Statements visible to `user`: every statement for superusers, the
    /// statements of the caller's cards otherwise
    pub async fn list_statements(
        &self,
        user: &CurrentUser,
        options: SearchOptions,
    ) -> DomainResult<Page<CardStatementPublic>> {
        let options = match user.scope(None)? {
            Some(owner) => {
                let card_ids = self.ownership.card_ids(owner).await?;
                options.narrowed(|f| f.any_of("card_id", card_ids))
            }
            None => options,
        };
        let (statements, count) = self.statements.search(&options).await?;
        Ok(Page::new(statements, count).map(Into::into))
    }

    pub async fn update_statement(
        &self,
        user: &CurrentUser,
        id: &Uuid,
        patch: CardStatementUpdate,
    ) -> DomainResult<CardStatementPublic> {
        self.ownership.ensure_statement(user, id).await?;
        if let Some(card_id) = &patch.card_id {
            allow_missing(self.ownership.ensure_card(user, card_id).await)?;
        }
        Ok(self.statements.update(id, patch).await?.into())
    }

    /// Delete a statement; fails with Conflict while it still has transactions
    pub async fn delete_statement(&self, user: &CurrentUser, id: &Uuid) -> DomainResult<()> {
        self.ownership.ensure_statement(user, id).await?;
        self.statements.delete(id).await
    }
}
