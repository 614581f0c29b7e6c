//! Tag service

use super::model::{Tag, TagCreateIn, TagPublic, TagUpdate};
use crate::core::auth::CurrentUser;
use crate::core::error::DomainResult;
use crate::core::options::{SearchFilters, SearchOptions};
use crate::core::query::Page;
use crate::core::repository::Repository;
use crate::entities::Repositories;
use crate::entities::tag_rules::TagRule;
use crate::entities::transaction_tags::TransactionTag;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct TagService {
    tags: Arc<dyn Repository<Tag>>,
    tag_rules: Arc<dyn Repository<TagRule>>,
    transaction_tags: Arc<dyn Repository<TransactionTag>>,
}

impl TagService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            tags: repos.tags.clone(),
            tag_rules: repos.tag_rules.clone(),
            transaction_tags: repos.transaction_tags.clone(),
        }
    }

    async fn owned(&self, user: &CurrentUser, id: &Uuid) -> DomainResult<Tag> {
        let tag = self.tags.get_by_id(id).await?;
        user.ensure_owner(tag.user_id)?;
        Ok(tag)
    }

    /// Create a tag; a label already used by the same owner is a Conflict
    pub async fn create_tag(&self, user: &CurrentUser, payload: TagCreateIn) -> DomainResult<TagPublic> {
        let owner = match payload.user_id {
            Some(user_id) if user.is_superuser => user_id,
            _ => user.id,
        };
        Ok(self.tags.create(payload.into_create(owner)).await?.into())
    }

    pub async fn get_tag(&self, user: &CurrentUser, id: &Uuid) -> DomainResult<TagPublic> {
        Ok(self.owned(user, id).await?.into())
    }

    pub async fn list_tags(
        &self,
        user: &CurrentUser,
        user_id: Option<Uuid>,
        options: SearchOptions,
    ) -> DomainResult<Page<TagPublic>> {
        let options = match user.scope(user_id)? {
            Some(owner) => options.narrowed(|f| f.equals("user_id", owner)),
            None => options,
        };
        let (tags, count) = self.tags.search(&options).await?;
        Ok(Page::new(tags, count).map(Into::into))
    }

    pub async fn update_tag(
        &self,
        user: &CurrentUser,
        id: &Uuid,
        patch: TagUpdate,
    ) -> DomainResult<TagPublic> {
        self.owned(user, id).await?;
        Ok(self.tags.update(id, patch).await?.into())
    }

    /// Delete a tag with the rules that assign it and its applications
    ///
    /// The steps are not atomic: a failure part-way leaves the dependents
    /// already removed.
    pub async fn delete_tag(&self, user: &CurrentUser, id: &Uuid) -> DomainResult<()> {
        self.owned(user, id).await?;

        let by_tag = SearchFilters::new().equals("tag_id", *id);
        let rules = self.tag_rules.delete_where(&by_tag).await?;
        let applications = self.transaction_tags.delete_where(&by_tag).await?;
        tracing::debug!(tag_id = %id, rules, applications, "removed tag dependents");

        self.tags.delete(id).await
    }
}
