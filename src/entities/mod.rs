//! Application domains
//!
//! Each domain follows the same layering:
//!
//! ```text
//! handlers -> usecases -> service -> Repository<T> -> Database
//! ```
//!
//! - `model`: the stored record with its create, update and public shapes
//! - `service`: projections, ownership checks and cross-domain steps
//! - `usecases`: one struct per operation, binding transport inputs to
//!   [`SearchOptions`](crate::core::options::SearchOptions)
//! - `handlers`: axum handlers and the domain's route table

pub mod macros;

pub mod card_statements;
pub mod cards;
pub mod ownership;
pub mod tag_rules;
pub mod tags;
pub mod transaction_tags;
pub mod transactions;

use crate::core::repository::Repository;
use crate::storage::{Database, InMemoryRepository, UnknownFieldPolicy};
use card_statements::CardStatement;
use cards::CreditCard;
use std::sync::Arc;
use tag_rules::TagRule;
use tags::Tag;
use transaction_tags::TransactionTag;
use transactions::Transaction;

/// One repository per record type, shared by every service
#[derive(Clone)]
pub struct Repositories {
    pub cards: Arc<dyn Repository<CreditCard>>,
    pub card_statements: Arc<dyn Repository<CardStatement>>,
    pub transactions: Arc<dyn Repository<Transaction>>,
    pub tags: Arc<dyn Repository<Tag>>,
    pub tag_rules: Arc<dyn Repository<TagRule>>,
    pub transaction_tags: Arc<dyn Repository<TransactionTag>>,
}

impl Repositories {
    /// Repositories backed by one in-memory [`Database`]
    pub fn in_memory(db: &Database, policy: UnknownFieldPolicy) -> Self {
        Self {
            cards: Arc::new(InMemoryRepository::<CreditCard>::with_policy(db.clone(), policy)),
            card_statements: Arc::new(InMemoryRepository::<CardStatement>::with_policy(
                db.clone(),
                policy,
            )),
            transactions: Arc::new(InMemoryRepository::<Transaction>::with_policy(
                db.clone(),
                policy,
            )),
            tags: Arc::new(InMemoryRepository::<Tag>::with_policy(db.clone(), policy)),
            tag_rules: Arc::new(InMemoryRepository::<TagRule>::with_policy(db.clone(), policy)),
            transaction_tags: Arc::new(InMemoryRepository::<TransactionTag>::with_policy(
                db.clone(),
                policy,
            )),
        }
    }
}
