//! In-memory implementation of [`Repository`]

use super::database::Database;
use super::query::{QueryPlan, UnknownFieldPolicy};
use super::schema::{Store, Stored, Table};
use crate::core::error::{DomainError, DomainResult};
use crate::core::options::{SearchFilters, SearchOptions};
use crate::core::repository::Repository;
use async_trait::async_trait;
use std::collections::HashSet;
use std::marker::PhantomData;
use uuid::Uuid;

/// Generic repository over one table of a [`Database`]
///
/// Foreign keys are checked on create and update; deletes are restricted
/// while other records still reference the target.
pub struct InMemoryRepository<T> {
    db: Database,
    policy: UnknownFieldPolicy,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            policy: self.policy,
            _record: PhantomData,
        }
    }
}

impl<T: Stored> InMemoryRepository<T> {
    pub fn new(db: Database) -> Self {
        Self::with_policy(db, UnknownFieldPolicy::default())
    }

    pub fn with_policy(db: Database, policy: UnknownFieldPolicy) -> Self {
        Self {
            db,
            policy,
            _record: PhantomData,
        }
    }

    fn select(&self, store: &Store, options: &SearchOptions) -> DomainResult<(Vec<T>, usize)> {
        let plan = QueryPlan::new::<T>(options, self.policy)?;
        let mut matched: Vec<&T> = T::table(store)
            .values()
            .filter(|record| plan.matches(*record))
            .collect();
        let count = matched.len();

        plan.sort(&mut matched);

        let pagination = options.pagination();
        let page = matched
            .into_iter()
            .skip(pagination.skip())
            .take(pagination.limit())
            .cloned()
            .collect();

        Ok((page, count))
    }
}

fn check_references<T: Stored>(store: &Store, record: &T) -> DomainResult<()> {
    match record.references().into_iter().find(|r| !r.resolves(store)) {
        Some(missing) => Err(DomainError::InvalidData {
            message: format!("{} '{}' does not exist", missing.entity, missing.id),
            details: Some(serde_json::json!({
                "field": missing.field,
                "id": missing.id.to_string(),
            })),
        }),
        None => Ok(()),
    }
}

fn check_unique<T: Stored>(table: &Table<T>, record: &T) -> DomainResult<()> {
    let clash = table
        .values()
        .any(|other| other.id() != record.id() && record.duplicates(other));

    if clash {
        Err(DomainError::conflict(format!(
            "{} already exists",
            T::ENTITY
        )))
    } else {
        Ok(())
    }
}

fn check_unreferenced<T: Stored>(store: &Store, id: &Uuid) -> DomainResult<()> {
    match store.first_dependent(T::ENTITY, id) {
        Some(dependent) => Err(DomainError::conflict(format!(
            "{} '{}' is still referenced by {} records",
            T::ENTITY,
            id,
            dependent
        ))),
        None => Ok(()),
    }
}

#[async_trait]
impl<T: Stored> Repository<T> for InMemoryRepository<T> {
    async fn create(&self, payload: T::Create) -> DomainResult<T> {
        let record = T::from_create(payload);
        record.validate()?;

        let created = self.db.transaction(|store| {
            check_references(store, &record)?;
            check_unique(T::table(store), &record)?;
            T::table_mut(store).insert(record.id(), record.clone());
            Ok(record)
        })?;

        tracing::info!(entity = T::ENTITY, id = %created.id(), "created");
        Ok(created)
    }

    async fn get_by_id(&self, id: &Uuid) -> DomainResult<T> {
        tracing::debug!(entity = T::ENTITY, id = %id, "get");
        self.db.read(|store| {
            T::table(store)
                .get(id)
                .cloned()
                .ok_or_else(|| DomainError::not_found(T::ENTITY, *id))
        })
    }

    async fn list(&self, options: &SearchOptions) -> DomainResult<Vec<T>> {
        let (records, _) = self.db.read(|store| self.select(store, options))?;
        tracing::debug!(entity = T::ENTITY, count = records.len(), "list");
        Ok(records)
    }

    async fn count(&self, filters: &SearchFilters) -> DomainResult<usize> {
        self.db.read(|store| {
            let plan = QueryPlan::for_filters::<T>(filters, self.policy)?;
            Ok(T::table(store).values().filter(|r| plan.matches(*r)).count())
        })
    }

    async fn search(&self, options: &SearchOptions) -> DomainResult<(Vec<T>, usize)> {
        let (records, count) = self.db.read(|store| self.select(store, options))?;
        tracing::debug!(entity = T::ENTITY, count, returned = records.len(), "search");
        Ok((records, count))
    }

    async fn update(&self, id: &Uuid, patch: T::Update) -> DomainResult<T> {
        let updated = self.db.transaction(|store| {
            let mut updated = T::table(store)
                .get(id)
                .cloned()
                .ok_or_else(|| DomainError::not_found(T::ENTITY, *id))?;

            updated.apply_update(patch);
            updated.touch();
            updated.validate()?;
            check_references(store, &updated)?;
            check_unique(T::table(store), &updated)?;

            T::table_mut(store).insert(*id, updated.clone());
            Ok(updated)
        })?;

        tracing::info!(entity = T::ENTITY, id = %id, "updated");
        Ok(updated)
    }

    async fn delete(&self, id: &Uuid) -> DomainResult<()> {
        self.db.transaction(|store| {
            if !T::table(store).contains_key(id) {
                return Err(DomainError::not_found(T::ENTITY, *id));
            }
            check_unreferenced::<T>(store, id)?;
            T::table_mut(store).shift_remove(id);
            Ok(())
        })?;

        tracing::info!(entity = T::ENTITY, id = %id, "deleted");
        Ok(())
    }

    async fn delete_where(&self, filters: &SearchFilters) -> DomainResult<usize> {
        let removed = self.db.transaction(|store| {
            let plan = QueryPlan::for_filters::<T>(filters, self.policy)?;
            let ids: HashSet<Uuid> = T::table(store)
                .values()
                .filter(|r| plan.matches(*r))
                .map(|r| r.id())
                .collect();

            for id in &ids {
                check_unreferenced::<T>(store, id)?;
            }

            let table = T::table_mut(store);
            table.retain(|id, _| !ids.contains(id));
            Ok(ids.len())
        })?;

        tracing::info!(entity = T::ENTITY, count = removed, "bulk deleted");
        Ok(removed)
    }
}
