//! # Users
//!
//! The `User` record, its JSON codec, and the storage backends behind
//! the `UserStore` trait.

pub mod errors;
pub mod memory;
pub mod model;
pub mod postgres;
pub mod store;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryUserStore;
pub use model::User;
pub use postgres::PgUserStore;
pub use store::UserStore;
