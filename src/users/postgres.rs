//! # Postgres User Store
//!
//! `UserStore` over an sqlx connection pool. Path ids are bound as text
//! and cast with `::integer` server-side, so malformed ids fail inside
//! Postgres the same way an untyped parameter would.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;

use super::errors::{StoreError, StoreResult};
use super::model::User;
use super::store::UserStore;

const CREATE_TABLE_SQL: &str =
    "CREATE TABLE IF NOT EXISTS users (id SERIAL PRIMARY KEY, name TEXT, email TEXT)";
const SELECT_ALL_SQL: &str = "SELECT id, name, email FROM users";
const SELECT_ONE_SQL: &str = "SELECT id, name, email FROM users WHERE id = $1::integer";
const INSERT_SQL: &str = "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id";
const UPDATE_SQL: &str = "UPDATE users SET name = $1, email = $2 WHERE id = $3::integer";
const DELETE_SQL: &str = "DELETE FROM users WHERE id = $1::integer";

/// Postgres-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Open a pool against `database_url`.
    ///
    /// Fails on an unparseable URL or an unreachable server.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .connect(database_url)
            .await
            .map_err(StoreError::Connect)?;
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `users` table if it does not exist
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE_SQL)
            .execute(&self.pool)
            .await
            .map_err(StoreError::Query)?;
        Ok(())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> StoreResult<Vec<User>> {
        let mut rows = sqlx::query(SELECT_ALL_SQL).fetch(&self.pool);
        let mut users = Vec::new();

        // Failing before the first row is a query error, after it a read error
        loop {
            let row = match rows.try_next().await {
                Ok(Some(row)) => row,
                Ok(None) => break,
                Err(e) if users.is_empty() => return Err(StoreError::Query(e)),
                Err(e) => return Err(StoreError::Read(e)),
            };
            users.push(User::from_row(&row).map_err(StoreError::Scan)?);
        }

        Ok(users)
    }

    async fn get(&self, id: &str) -> StoreResult<Option<User>> {
        sqlx::query_as::<_, User>(SELECT_ONE_SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::Query)
    }

    async fn create(&self, name: &str, email: &str) -> StoreResult<i32> {
        let (id,): (i32,) = sqlx::query_as(INSERT_SQL)
            .bind(name)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::Query)?;
        Ok(id)
    }

    async fn update(&self, id: &str, name: &str, email: &str) -> StoreResult<u64> {
        let result = sqlx::query(UPDATE_SQL)
            .bind(name)
            .bind(email)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::Query)?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query(DELETE_SQL)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::Query)?;
        Ok(result.rows_affected() > 0)
    }
}
