//! User HTTP Routes
//!
//! CRUD endpoints over the `users` table. Every failure is turned into a
//! status code and a short plain-text message here; nothing propagates
//! past the handler.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde::Serialize;

use crate::observability::Logger;
use crate::users::{StoreError, User, UserStore};

use super::errors::{ApiError, ApiResult};

/// Store handle shared across handlers
pub type UserState = Arc<dyn UserStore>;

/// Confirmation body for a successful delete
pub const USER_DELETED: &str = "User deleted";

// ==================
// User Routes
// ==================

/// Create user routes
pub fn user_routes(store: UserState) -> Router {
    Router::new()
        .route("/users", get(list_users_handler))
        .route("/users", post(create_user_handler))
        .route("/users/:id", get(get_user_handler))
        .route("/users/:id", put(update_user_handler))
        .route("/users/:id", delete(delete_user_handler))
        .with_state(store)
}

// ==================
// Helper Functions
// ==================

/// Serialize the whole body before any status is chosen
fn json_response<T: Serialize + ?Sized>(value: &T) -> ApiResult<Response> {
    let body = serde_json::to_vec(value).map_err(|e| {
        let message = e.to_string();
        Logger::error("JSON_ENCODE_FAILED", &[("error", message.as_str())]);
        ApiError::Encode
    })?;
    Ok((StatusCode::OK, body).into_response())
}

fn decode_payload(body: &[u8]) -> ApiResult<User> {
    User::decode(body).map_err(|e| {
        let message = e.to_string();
        Logger::warn("INVALID_PAYLOAD", &[("error", message.as_str())]);
        ApiError::InvalidPayload
    })
}

fn not_found(id: &str) -> ApiError {
    Logger::warn("USER_NOT_FOUND", &[("user_id", id)]);
    ApiError::NotFound
}

// ==================
// Handlers
// ==================

async fn list_users_handler(State(store): State<UserState>) -> ApiResult<Response> {
    let users = store.list().await.map_err(|e| {
        let event = match &e {
            StoreError::Scan(_) => "DB_SCAN_FAILED",
            StoreError::Read(_) => "DB_READ_FAILED",
            _ => "DB_QUERY_FAILED",
        };
        ApiError::from_store(event, e)
    })?;

    json_response(&users)
}

async fn get_user_handler(
    State(store): State<UserState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let user = store
        .get(&id)
        .await
        .map_err(|e| ApiError::from_store("DB_QUERY_FAILED", e))?
        .ok_or_else(|| not_found(&id))?;

    json_response(&user)
}

async fn create_user_handler(State(store): State<UserState>, body: Bytes) -> ApiResult<Response> {
    let mut user = decode_payload(&body)?;

    user.id = store
        .create(&user.name, &user.email)
        .await
        .map_err(|e| ApiError::from_store("DB_INSERT_FAILED", e))?;

    json_response(&user)
}

/// Echoes the decoded body, including its `id`, without re-reading the row
async fn update_user_handler(
    State(store): State<UserState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Response> {
    let user = decode_payload(&body)?;

    store
        .update(&id, &user.name, &user.email)
        .await
        .map_err(|e| ApiError::from_store("DB_UPDATE_FAILED", e))?;

    json_response(&user)
}

async fn delete_user_handler(
    State(store): State<UserState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let deleted = store
        .delete(&id)
        .await
        .map_err(|e| ApiError::from_store("DB_DELETE_FAILED", e))?;

    if !deleted {
        return Err(not_found(&id));
    }

    json_response(USER_DELETED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_response_encodes_bare_string() {
        let response = json_response(USER_DELETED).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_decode_payload_maps_to_bad_request() {
        assert_eq!(decode_payload(b"{oops"), Err(ApiError::InvalidPayload));
        assert_eq!(
            decode_payload(br#"{"name":"Ann","email":"ann@x.com"}"#),
            Ok(User::new(0, "Ann", "ann@x.com"))
        );
    }
}
