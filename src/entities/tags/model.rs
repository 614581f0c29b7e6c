//! Tag records

use crate::core::error::DomainResult;
use crate::core::extractors::FilterParams;
use crate::core::patch::merge;
use crate::core::validation::{filters, validators};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A user-defined label for transactions
///
/// Labels are unique per user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    pub id: Uuid,
    pub user_id: Uuid,
    pub label: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TagCreate {
    pub user_id: Uuid,
    pub label: String,
}

/// Body of `POST /tags`
///
/// `user_id` is honoured for superusers only.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TagCreateIn {
    #[validate(length(min = 1, max = 200))]
    pub label: String,
    pub user_id: Option<Uuid>,
}

impl TagCreateIn {
    pub fn into_create(self, user_id: Uuid) -> TagCreate {
        TagCreate {
            user_id,
            label: self.label,
        }
    }
}

/// Body of `PATCH /tags/{id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TagUpdate {
    #[validate(length(min = 1, max = 200))]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TagPublic {
    pub id: Uuid,
    pub user_id: Uuid,
    pub label: String,
    pub created_at: DateTime<Utc>,
}

crate::impl_public!(Tag => TagPublic { id, user_id, label, created_at });

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagFilters {
    pub user_id: Option<Uuid>,
    pub label: Option<String>,
}

impl FilterParams for TagFilters {
    const KEYS: &'static [&'static str] = &["user_id", "label"];
}

crate::impl_record!(
    Tag,
    "tag",
    create: TagCreate,
    update: TagUpdate,
    fields: [id, user_id, label, created_at],
    {
        fn from_create(payload: TagCreate) -> Self {
            Self {
                id: Uuid::new_v4(),
                user_id: payload.user_id,
                label: filters::trim(payload.label),
                created_at: Utc::now(),
            }
        }

        fn apply_update(&mut self, patch: TagUpdate) {
            merge(&mut self.label, patch.label.map(filters::trim));
        }

        fn validate(&self) -> DomainResult<()> {
            validators::not_blank("label", &self.label)?;
            validators::max_chars("label", Some(&self.label), 200)
        }

        fn duplicates(&self, other: &Self) -> bool {
            self.user_id == other.user_id && self.label == other.label
        }
    }
);
