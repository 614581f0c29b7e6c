//! Transaction tag records (tag applied to a transaction)

use crate::core::extractors::FilterParams;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Association between a transaction and a tag
///
/// A pair appears at most once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionTag {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub tag_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /transaction-tags`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TransactionTagCreate {
    pub transaction_id: Uuid,
    pub tag_id: Uuid,
}

/// Associations are immutable; updates carry nothing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionTagUpdate {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionTagPublic {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub tag_id: Uuid,
    pub created_at: DateTime<Utc>,
}

crate::impl_public!(TransactionTag => TransactionTagPublic {
    id, transaction_id, tag_id, created_at
});

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionTagFilters {
    pub transaction_id: Option<Uuid>,
    pub tag_id: Option<Uuid>,
}

impl FilterParams for TransactionTagFilters {
    const KEYS: &'static [&'static str] = &["transaction_id", "tag_id"];
}

crate::impl_record!(
    TransactionTag,
    "transaction_tag",
    create: TransactionTagCreate,
    update: TransactionTagUpdate,
    fields: [id, transaction_id, tag_id, created_at],
    {
        fn from_create(payload: TransactionTagCreate) -> Self {
            Self {
                id: Uuid::new_v4(),
                transaction_id: payload.transaction_id,
                tag_id: payload.tag_id,
                created_at: Utc::now(),
            }
        }

        fn apply_update(&mut self, _patch: TransactionTagUpdate) {}

        fn duplicates(&self, other: &Self) -> bool {
            self.transaction_id == other.transaction_id && self.tag_id == other.tag_id
        }
    }
);
