//! Repository trait for persisted records

use super::entity::Record;
use super::error::DomainResult;
use super::options::{SearchFilters, SearchOptions};
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence operations for one record type
///
/// Implementations translate [`SearchOptions`] into store queries and raise
/// `NotFound` for missing identifiers. Every mutating call is committed
/// before it returns; a failed call leaves the store untouched.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// Persist a new record built from `payload`
    async fn create(&self, payload: T::Create) -> DomainResult<T>;

    /// Fetch one record, or `NotFound`
    async fn get_by_id(&self, id: &Uuid) -> DomainResult<T>;

    /// Records matching the filters, sorted, then windowed by skip/limit
    async fn list(&self, options: &SearchOptions) -> DomainResult<Vec<T>>;

    /// Number of records matching `filters`, ignoring pagination
    async fn count(&self, filters: &SearchFilters) -> DomainResult<usize>;

    /// One page of records plus the total count
    async fn search(&self, options: &SearchOptions) -> DomainResult<(Vec<T>, usize)> {
        let records = self.list(options).await?;
        let count = self.count(options.filters()).await?;
        Ok((records, count))
    }

    /// Merge the present fields of `patch` into an existing record
    async fn update(&self, id: &Uuid, patch: T::Update) -> DomainResult<T>;

    /// Remove a record, or `NotFound`
    async fn delete(&self, id: &Uuid) -> DomainResult<()>;

    /// Remove every record matching `filters`, returning how many were removed
    async fn delete_where(&self, filters: &SearchFilters) -> DomainResult<usize>;
}
