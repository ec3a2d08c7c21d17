//! # User Store
//!
//! Storage seam between the HTTP handlers and the database.

use async_trait::async_trait;

use super::errors::StoreResult;
use super::model::User;

/// Storage operations over the `users` table.
///
/// Ids are taken as the raw path segment; each backend coerces them the
/// way the database would, so a non-numeric id is a storage error rather
/// than a missing row.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All rows, in storage order
    async fn list(&self) -> StoreResult<Vec<User>>;

    /// One row by id, `None` when absent
    async fn get(&self, id: &str) -> StoreResult<Option<User>>;

    /// Insert `(name, email)` and return the generated id
    async fn create(&self, name: &str, email: &str) -> StoreResult<i32>;

    /// Overwrite name and email; returns the number of rows affected
    async fn update(&self, id: &str, name: &str, email: &str) -> StoreResult<u64>;

    /// Remove a row; returns false when no row had that id
    async fn delete(&self, id: &str) -> StoreResult<bool>;
}
