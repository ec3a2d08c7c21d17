//! # HTTP Errors
//!
//! Failures a handler reports to the client. The body is the bare
//! message as plain text; the content-type layer still labels it JSON.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::observability::Logger;
use crate::users::StoreError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Handler errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Body was not a decodable user object
    #[error("Invalid request payload")]
    InvalidPayload,

    /// No row for the path id
    #[error("User not found")]
    NotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Statement failed
    #[error("Database error")]
    Database,

    /// Row did not decode into a user
    #[error("Error scanning database rows")]
    Scan,

    /// Result stream broke off partway through
    #[error("Error reading database rows")]
    Read,

    /// Response body could not be serialized
    #[error("Failed to encode response")]
    Encode,
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidPayload => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Database | ApiError::Scan | ApiError::Read | ApiError::Encode => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Log a storage failure under `event` and pick the client-facing error
    pub fn from_store(event: &str, err: StoreError) -> Self {
        let message = err.to_string();
        Logger::error(event, &[("code", err.code()), ("error", message.as_str())]);
        match err {
            StoreError::Scan(_) => ApiError::Scan,
            StoreError::Read(_) => ApiError::Read,
            _ => ApiError::Database,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::InvalidPayload.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Database.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::Scan.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::Read.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::Encode.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_store_errors_stay_opaque() {
        let err = ApiError::from_store(
            "DB_QUERY_FAILED",
            StoreError::InvalidId("abc".to_string()),
        );
        assert_eq!(err, ApiError::Database);
        assert_eq!(err.to_string(), "Database error");
    }

    #[test]
    fn test_scan_errors_map_to_scan() {
        let err = ApiError::from_store(
            "DB_SCAN_FAILED",
            StoreError::Scan(sqlx::Error::ColumnNotFound("email".to_string())),
        );
        assert_eq!(err, ApiError::Scan);
    }

    #[test]
    fn test_read_errors_map_to_read() {
        let err = ApiError::from_store("DB_READ_FAILED", StoreError::Read(sqlx::Error::PoolClosed));
        assert_eq!(err, ApiError::Read);
        assert_eq!(err.to_string(), "Error reading database rows");
    }

    #[tokio::test]
    async fn test_response_body_is_plain_message() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"User not found");
    }
}
