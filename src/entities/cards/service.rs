//! Card service

use super::model::{CardSummary, CreditCard, CreditCardCreateIn, CreditCardPublic, CreditCardUpdate};
use crate::core::auth::CurrentUser;
use crate::core::error::DomainResult;
use crate::core::options::{SearchFilters, SearchOptions};
use crate::core::query::Page;
use crate::core::repository::Repository;
use crate::entities::Repositories;
use crate::entities::card_statements::CardStatement;
use crate::entities::ownership::all;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct CardService {
    cards: Arc<dyn Repository<CreditCard>>,
    statements: Arc<dyn Repository<CardStatement>>,
}

impl CardService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            cards: repos.cards.clone(),
            statements: repos.card_statements.clone(),
        }
    }

    async fn owned(&self, user: &CurrentUser, id: &Uuid) -> DomainResult<CreditCard> {
        let card = self.cards.get_by_id(id).await?;
        user.ensure_owner(card.user_id)?;
        Ok(card)
    }

    pub async fn create_card(
        &self,
        user: &CurrentUser,
        payload: CreditCardCreateIn,
    ) -> DomainResult<CreditCardPublic> {
        let owner = match payload.user_id {
            Some(user_id) if user.is_superuser => user_id,
            _ => user.id,
        };
        let card = self.cards.create(payload.into_create(owner)).await?;
        Ok(card.into())
    }

    pub async fn get_card(&self, user: &CurrentUser, id: &Uuid) -> DomainResult<CreditCardPublic> {
        Ok(self.owned(user, id).await?.into())
    }

    /// Cards visible to `user`, optionally narrowed to `user_id`
    pub async fn list_cards(
        &self,
        user: &CurrentUser,
        user_id: Option<Uuid>,
        options: SearchOptions,
    ) -> DomainResult<Page<CreditCardPublic>> {
        let options = match user.scope(user_id)? {
            Some(owner) => options.narrowed(|f| f.equals("user_id", owner)),
            None => options,
        };
        let (cards, count) = self.cards.search(&options).await?;
        Ok(Page::new(cards, count).map(Into::into))
    }

    pub async fn update_card(
        &self,
        user: &CurrentUser,
        id: &Uuid,
        patch: CreditCardUpdate,
    ) -> DomainResult<CreditCardPublic> {
        self.owned(user, id).await?;
        Ok(self.cards.update(id, patch).await?.into())
    }

    /// Delete a card; fails with Conflict while it still has statements
    pub async fn delete_card(&self, user: &CurrentUser, id: &Uuid) -> DomainResult<()> {
        self.owned(user, id).await?;
        self.cards.delete(id).await
    }

    pub async fn card_summary(&self, user: &CurrentUser, id: &Uuid) -> DomainResult<CardSummary> {
        let card = self.owned(user, id).await?;
        let statements = all(
            self.statements.as_ref(),
            SearchFilters::new().equals("card_id", card.id),
        )
        .await?;

        let latest = statements
            .iter()
            .max_by_key(|s| (s.close_date, s.created_at));
        let unpaid_minimum_total = statements
            .iter()
            .filter(|s| !s.is_fully_paid)
            .map(|s| s.minimum_payment)
            .sum::<Decimal>();

        Ok(CardSummary {
            card_id: card.id,
            statement_count: statements.len(),
            latest_balance: latest.map(|s| s.current_balance),
            latest_close_date: latest.map(|s| s.close_date),
            unpaid_minimum_total,
        })
    }
}
