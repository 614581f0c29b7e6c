//! Shared handle to the in-memory store

use super::schema::Store;
use crate::core::error::{DomainError, DomainResult};
use std::sync::{Arc, RwLock};

/// Cloneable handle to one [`Store`]
///
/// Each call takes a session (a read or write lock) for the duration of
/// one closure and releases it when the closure returns, including on
/// error. Closures are synchronous, so no lock is ever held across an
/// `.await`.
#[derive(Clone, Default)]
pub struct Database {
    store: Arc<RwLock<Store>>,
}

impl Database {
    /// Create an empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against a read-only session
    pub fn read<R>(&self, f: impl FnOnce(&Store) -> DomainResult<R>) -> DomainResult<R> {
        let store = self
            .store
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        f(&store)
    }

    /// Run `f` against a write session and commit on return
    ///
    /// `f` must finish all of its checks before its first write; an error
    /// returned after a write would leave that write in place.
    pub fn transaction<R>(&self, f: impl FnOnce(&mut Store) -> DomainResult<R>) -> DomainResult<R> {
        let mut store = self
            .store
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        f(&mut store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_share_one_store() {
        let db = Database::new();
        let clone = db.clone();

        clone
            .transaction(|store| {
                store.cards.clear();
                Ok(())
            })
            .unwrap();

        let count = db.read(|store| Ok(store.cards.len())).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_error_releases_lock() {
        let db = Database::new();
        let failed: DomainResult<()> = db.transaction(|_| Err(DomainError::conflict("nope")));
        assert!(failed.is_err());

        assert!(db.transaction(|_| Ok(())).is_ok());
    }
}
