//! users-api - JSON CRUD over a Postgres `users` table

pub mod config;
pub mod http_server;
pub mod observability;
pub mod startup;
pub mod users;
