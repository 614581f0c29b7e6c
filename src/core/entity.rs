//! Record trait defining the core abstraction for all persisted domain types

use super::error::DomainResult;
use super::field::FieldValue;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Base trait for every persisted record.
///
/// A record has:
/// - an immutable, generated identifier
/// - a create payload (`Create`) used only when the record is first stored
/// - an update payload (`Update`) whose present fields are merged in place
/// - named attributes readable as [`FieldValue`]s for filtering and sorting
///
/// Identity and timestamps are assigned by [`Record::from_create`]; the
/// storage layer never lets callers choose an id.
pub trait Record: Clone + Send + Sync + 'static {
    /// Payload accepted at creation time
    type Create: Send + 'static;

    /// Partial update payload
    type Update: Send + 'static;

    /// Singular entity name used in errors and logs (e.g. "card_statement")
    const ENTITY: &'static str;

    /// Unique identifier of this record
    fn id(&self) -> Uuid;

    /// Creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Attribute names that can be filtered and sorted on
    fn fields() -> &'static [&'static str];

    /// Read an attribute by name
    ///
    /// Returns `None` when `field` is not an attribute of this record type.
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Build a new record with a fresh identifier from a create payload
    fn from_create(payload: Self::Create) -> Self;

    /// Merge the present fields of `patch` into this record
    fn apply_update(&mut self, patch: Self::Update);

    /// Check invariants spanning several attributes
    fn validate(&self) -> DomainResult<()> {
        Ok(())
    }

    /// Whether `other` violates a uniqueness constraint with this record
    fn duplicates(&self, _other: &Self) -> bool {
        false
    }

    /// Refresh the modification timestamp, if the record has one
    fn touch(&mut self) {}

    /// Check whether `field` is a known attribute
    fn has_field(field: &str) -> bool {
        Self::fields().contains(&field)
    }
}
