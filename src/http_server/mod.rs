//! # Users HTTP Server Module
//!
//! Axum server exposing CRUD over the `users` table.
//!
//! # Endpoints
//!
//! - `GET /users` - list all users
//! - `GET /users/:id` - fetch one user
//! - `POST /users` - create a user
//! - `PUT /users/:id` - overwrite name and email
//! - `DELETE /users/:id` - remove a user
//!
//! Every response carries `Content-Type: application/json`.

pub mod config;
pub mod errors;
pub mod server;
pub mod user_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::{build_router, HttpServer};
pub use user_routes::{user_routes, USER_DELETED};
