//! # In-Memory User Store
//!
//! A `UserStore` kept in process memory, used by tests and local runs
//! without a database. Mirrors the Postgres backend: serial ids start at
//! 1 and are never reused, and ids that don't parse as an integer are a
//! storage error.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::errors::{StoreError, StoreResult};
use super::model::User;
use super::store::UserStore;

#[derive(Debug)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, User>,
}

/// In-memory user store
#[derive(Debug)]
pub struct MemoryUserStore {
    table: RwLock<Table>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                last_id: 0,
                rows: BTreeMap::new(),
            }),
        }
    }

    /// Number of rows currently stored
    pub fn len(&self) -> usize {
        self.table.read().map(|t| t.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Coerce a path id the way `$1::integer` does (surrounding whitespace allowed)
fn parse_id(id: &str) -> StoreResult<i32> {
    id.trim()
        .parse::<i32>()
        .map_err(|_| StoreError::InvalidId(id.to_string()))
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> StoreResult<Vec<User>> {
        let table = self.table.read().map_err(|_| StoreError::Poisoned)?;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<User>> {
        let id = parse_id(id)?;
        let table = self.table.read().map_err(|_| StoreError::Poisoned)?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn create(&self, name: &str, email: &str) -> StoreResult<i32> {
        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;
        let id = table
            .last_id
            .checked_add(1)
            .ok_or(StoreError::SequenceExhausted(i32::MAX))?;
        table.last_id = id;
        table.rows.insert(id, User::new(id, name, email));
        Ok(id)
    }

    async fn update(&self, id: &str, name: &str, email: &str) -> StoreResult<u64> {
        let id = parse_id(id)?;
        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;
        match table.rows.get_mut(&id) {
            Some(user) => {
                user.name = name.to_string();
                user.email = email.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let id = parse_id(id)?;
        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;
        Ok(table.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_strictly_increase() {
        let store = MemoryUserStore::new();
        let mut last = 0;
        for i in 0..5 {
            let id = store
                .create(&format!("user{i}"), &format!("u{i}@x.com"))
                .await
                .unwrap();
            assert!(id > last);
            last = id;
        }
        assert_eq!(store.len(), 5);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = MemoryUserStore::new();
        let first = store.create("a", "a@x").await.unwrap();
        assert!(store.delete(&first.to_string()).await.unwrap());

        let second = store.create("b", "b@x").await.unwrap();
        assert_eq!(second, first + 1);
    }

    #[tokio::test]
    async fn test_sequence_exhaustion_is_an_error() {
        let store = MemoryUserStore::new();
        store.table.write().unwrap().last_id = i32::MAX - 1;

        assert_eq!(store.create("last", "l@x").await.unwrap(), i32::MAX);
        assert!(matches!(
            store.create("over", "o@x").await,
            Err(StoreError::SequenceExhausted(i32::MAX))
        ));

        // Lock is not poisoned; the store keeps serving
        assert_eq!(store.len(), 1);
        assert!(store.get(&i32::MAX.to_string()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_get_returns_created_row() {
        let store = MemoryUserStore::new();
        let id = store.create("Ann", "ann@x.com").await.unwrap();

        let user = store.get(&id.to_string()).await.unwrap();
        assert_eq!(user, Some(User::new(id, "Ann", "ann@x.com")));
        assert_eq!(store.get("999").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_missing_row_affects_nothing() {
        let store = MemoryUserStore::new();
        assert_eq!(store.update("7", "x", "y").await.unwrap(), 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_update_overwrites_name_and_email() {
        let store = MemoryUserStore::new();
        let id = store.create("Ann", "ann@x.com").await.unwrap();

        assert_eq!(store.update(&id.to_string(), "Ann2", "a2@x.com").await.unwrap(), 1);
        let user = store.get(&id.to_string()).await.unwrap().unwrap();
        assert_eq!(user, User::new(id, "Ann2", "a2@x.com"));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = MemoryUserStore::new();
        let id = store.create("Ann", "ann@x.com").await.unwrap().to_string();

        assert!(store.delete(&id).await.unwrap());
        assert!(!store.delete(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_storage_error() {
        let store = MemoryUserStore::new();

        assert!(matches!(store.get("abc").await, Err(StoreError::InvalidId(_))));
        assert!(matches!(store.update("1.5", "a", "b").await, Err(StoreError::InvalidId(_))));
        assert!(matches!(store.delete("99999999999").await, Err(StoreError::InvalidId(_))));
    }

    #[tokio::test]
    async fn test_whitespace_around_id_accepted() {
        let store = MemoryUserStore::new();
        let id = store.create("Ann", "ann@x.com").await.unwrap();

        assert!(store.get(&format!(" {id} ")).await.unwrap().is_some());
    }
}
