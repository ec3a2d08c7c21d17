//! # Storage Errors
//!
//! Error types for the users storage layer.

use thiserror::Error;

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Users storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not open the connection pool
    #[error("connection failed: {0}")]
    Connect(#[source] sqlx::Error),

    /// Statement failed to prepare or execute
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// Result stream failed after at least one row arrived
    #[error("row read failed: {0}")]
    Read(#[source] sqlx::Error),

    /// A returned row did not match the `User` shape
    #[error("row scan failed: {0}")]
    Scan(#[source] sqlx::Error),

    /// The id sequence has no values left
    #[error("nextval: reached maximum value of sequence \"users_id_seq\" ({0})")]
    SequenceExhausted(i32),

    /// Path id could not be coerced to an integer key
    #[error("invalid input syntax for type integer: \"{0}\"")]
    InvalidId(String),

    /// In-memory table lock poisoned by a panicking writer
    #[error("storage lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Stable code for log lines
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Connect(_) => "USERS_STORE_CONNECT",
            StoreError::Query(_) => "USERS_STORE_QUERY",
            StoreError::Read(_) => "USERS_STORE_READ",
            StoreError::Scan(_) => "USERS_STORE_SCAN",
            StoreError::SequenceExhausted(_) => "USERS_STORE_SEQUENCE_EXHAUSTED",
            StoreError::InvalidId(_) => "USERS_STORE_INVALID_ID",
            StoreError::Poisoned => "USERS_STORE_POISONED",
        }
    }
}
