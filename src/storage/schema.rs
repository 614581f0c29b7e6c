//! Tables of the in-memory store and the foreign keys between them

use crate::core::entity::Record;
use crate::entities::card_statements::CardStatement;
use crate::entities::cards::CreditCard;
use crate::entities::tag_rules::TagRule;
use crate::entities::tags::Tag;
use crate::entities::transaction_tags::TransactionTag;
use crate::entities::transactions::Transaction;
use indexmap::IndexMap;
use uuid::Uuid;

/// Records keyed by id, iterated in insertion order
pub type Table<T> = IndexMap<Uuid, T>;

/// Every table of the application
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub cards: Table<CreditCard>,
    pub card_statements: Table<CardStatement>,
    pub transactions: Table<Transaction>,
    pub tags: Table<Tag>,
    pub tag_rules: Table<TagRule>,
    pub transaction_tags: Table<TransactionTag>,
}

impl Store {
    /// Name of the first entity that still references `entity` `id`
    pub fn first_dependent(&self, entity: &str, id: &Uuid) -> Option<&'static str> {
        fn referenced<T: Stored>(table: &Table<T>, entity: &str, id: &Uuid) -> Option<&'static str> {
            table
                .values()
                .any(|record| {
                    record
                        .references()
                        .iter()
                        .any(|r| r.entity == entity && r.id == *id)
                })
                .then_some(T::ENTITY)
        }

        referenced(&self.card_statements, entity, id)
            .or_else(|| referenced(&self.transactions, entity, id))
            .or_else(|| referenced(&self.tag_rules, entity, id))
            .or_else(|| referenced(&self.transaction_tags, entity, id))
    }
}

/// A foreign key held by a record
#[derive(Clone, Copy)]
pub struct Reference {
    /// Attribute holding the key
    pub field: &'static str,
    /// Entity the key points to
    pub entity: &'static str,
    pub id: Uuid,
    exists: fn(&Store, &Uuid) -> bool,
}

impl Reference {
    pub fn new(
        field: &'static str,
        entity: &'static str,
        id: Uuid,
        exists: fn(&Store, &Uuid) -> bool,
    ) -> Self {
        Self {
            field,
            entity,
            id,
            exists,
        }
    }

    /// Whether the referenced record is present in `store`
    pub fn resolves(&self, store: &Store) -> bool {
        (self.exists)(store, &self.id)
    }
}

/// A record type with a table in [`Store`]
pub trait Stored: Record {
    fn table(store: &Store) -> &Table<Self>;

    fn table_mut(store: &mut Store) -> &mut Table<Self>;

    /// Parent records this record points to
    fn references(&self) -> Vec<Reference>;
}

/// Implement [`Stored`] for a record
///
/// ```rust,ignore
/// impl_stored!(CardStatement, card_statements, [card_id => CreditCard]);
/// ```
macro_rules! impl_stored {
    ($type:ty, $table:ident, [$($field:ident => $parent:ty),* $(,)?]) => {
        impl Stored for $type {
            fn table(store: &Store) -> &Table<Self> {
                &store.$table
            }

            fn table_mut(store: &mut Store) -> &mut Table<Self> {
                &mut store.$table
            }

            fn references(&self) -> Vec<Reference> {
                vec![$(
                    Reference::new(
                        stringify!($field),
                        <$parent as Record>::ENTITY,
                        self.$field,
                        |store, id| <$parent as Stored>::table(store).contains_key(id),
                    )
                ),*]
            }
        }
    };
}

impl_stored!(CreditCard, cards, []);
impl_stored!(CardStatement, card_statements, [card_id => CreditCard]);
impl_stored!(Transaction, transactions, [statement_id => CardStatement]);
impl_stored!(Tag, tags, []);
impl_stored!(TagRule, tag_rules, [tag_id => Tag]);
impl_stored!(
    TransactionTag,
    transaction_tags,
    [transaction_id => Transaction, tag_id => Tag]
);
