//! Transaction tag service: manual tagging of transactions

use super::model::{TransactionTag, TransactionTagCreate, TransactionTagPublic, TransactionTagUpdate};
use crate::core::auth::CurrentUser;
use crate::core::entity::Record;
use crate::core::error::{DomainError, DomainResult};
use crate::core::options::{SearchFilters, SearchOptions};
use crate::core::query::Page;
use crate::core::repository::Repository;
use crate::entities::Repositories;
use crate::entities::ownership::{Ownership, all};
use crate::entities::tags::{Tag, TagPublic};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct TransactionTagService {
    transaction_tags: Arc<dyn Repository<TransactionTag>>,
    tags: Arc<dyn Repository<Tag>>,
    ownership: Ownership,
}

impl TransactionTagService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            transaction_tags: repos.transaction_tags.clone(),
            tags: repos.tags.clone(),
            ownership: Ownership::new(repos),
        }
    }

    /// Check that `user` owns the transaction and that the tag belongs to
    /// the same user as the transaction
    ///
    /// With `strict` set, a missing transaction or tag is NotFound;
    /// otherwise the check passes and the repository rejects the dangling
    /// reference.
    async fn ensure_pair(
        &self,
        user: &CurrentUser,
        transaction_id: &Uuid,
        tag_id: &Uuid,
        strict: bool,
    ) -> DomainResult<()> {
        let owner = match self.ownership.transaction_owner(transaction_id).await {
            Ok(owner) => owner,
            Err(e) if e.is_not_found() && !strict => return Ok(()),
            Err(e) => return Err(e),
        };
        user.ensure_owner(owner)?;

        let tag = match self.tags.get_by_id(tag_id).await {
            Ok(tag) => tag,
            Err(e) if e.is_not_found() && !strict => return Ok(()),
            Err(e) => return Err(e),
        };
        if tag.user_id != owner {
            return Err(DomainError::forbidden(format!(
                "tag {} does not belong to the owner of transaction {}",
                tag_id, transaction_id
            )));
        }
        Ok(())
    }

    pub async fn create_transaction_tag(
        &self,
        user: &CurrentUser,
        payload: TransactionTagCreate,
    ) -> DomainResult<TransactionTagPublic> {
        self.ensure_pair(user, &payload.transaction_id, &payload.tag_id, false)
            .await?;
        Ok(self.transaction_tags.create(payload).await?.into())
    }

    pub async fn get_transaction_tag(
        &self,
        user: &CurrentUser,
        id: &Uuid,
    ) -> DomainResult<TransactionTagPublic> {
        let link = self.transaction_tags.get_by_id(id).await?;
        self.ownership
            .ensure_transaction(user, &link.transaction_id)
            .await?;
        Ok(link.into())
    }

    pub async fn list_transaction_tags(
        &self,
        user: &CurrentUser,
        options: SearchOptions,
    ) -> DomainResult<Page<TransactionTagPublic>> {
        let options = match user.scope(None)? {
            Some(owner) => {
                let transaction_ids = self.ownership.transaction_ids(owner).await?;
                options.narrowed(|f| f.any_of("transaction_id", transaction_ids))
            }
            None => options,
        };
        let (links, count) = self.transaction_tags.search(&options).await?;
        Ok(Page::new(links, count).map(Into::into))
    }

    /// Applications carry no mutable attributes; this checks access and
    /// returns the stored record
    pub async fn update_transaction_tag(
        &self,
        user: &CurrentUser,
        id: &Uuid,
        patch: TransactionTagUpdate,
    ) -> DomainResult<TransactionTagPublic> {
        self.get_transaction_tag(user, id).await?;
        Ok(self.transaction_tags.update(id, patch).await?.into())
    }

    pub async fn delete_transaction_tag(&self, user: &CurrentUser, id: &Uuid) -> DomainResult<()> {
        self.get_transaction_tag(user, id).await?;
        self.transaction_tags.delete(id).await
    }

    /// Tags attached to one transaction
    pub async fn tags_of(
        &self,
        user: &CurrentUser,
        transaction_id: &Uuid,
    ) -> DomainResult<Page<TagPublic>> {
        self.ownership.ensure_transaction(user, transaction_id).await?;

        let links = all(
            self.transaction_tags.as_ref(),
            SearchFilters::new().equals("transaction_id", *transaction_id),
        )
        .await?;
        let tags = all(
            self.tags.as_ref(),
            SearchFilters::new().any_of("id", links.iter().map(|l| l.tag_id)),
        )
        .await?;

        let count = tags.len();
        Ok(Page::new(tags, count).map(Into::into))
    }

    /// Attach a tag to a transaction
    pub async fn tag_transaction(
        &self,
        user: &CurrentUser,
        transaction_id: &Uuid,
        tag_id: &Uuid,
    ) -> DomainResult<TransactionTagPublic> {
        self.ensure_pair(user, transaction_id, tag_id, true).await?;
        let link = self
            .transaction_tags
            .create(TransactionTagCreate {
                transaction_id: *transaction_id,
                tag_id: *tag_id,
            })
            .await?;
        Ok(link.into())
    }

    /// Detach a tag from a transaction; NotFound when it was not attached
    pub async fn untag_transaction(
        &self,
        user: &CurrentUser,
        transaction_id: &Uuid,
        tag_id: &Uuid,
    ) -> DomainResult<()> {
        self.ownership.ensure_transaction(user, transaction_id).await?;

        let removed = self
            .transaction_tags
            .delete_where(
                &SearchFilters::new()
                    .equals("transaction_id", *transaction_id)
                    .equals("tag_id", *tag_id),
            )
            .await?;

        if removed == 0 {
            return Err(DomainError::not_found(Tag::ENTITY, *tag_id));
        }
        Ok(())
    }
}
