//! users-api entry point
//!
//! Boots the service via `startup::run`, logs a FATAL line and exits
//! non-zero on failure.

use users_api::observability::{log_event_with_fields, Event};
use users_api::startup;

#[tokio::main]
async fn main() {
    if let Err(e) = startup::run().await {
        let message = e.to_string();
        log_event_with_fields(Event::Fatal, &[("code", e.code()), ("error", message.as_str())]);
        std::process::exit(1);
    }
}
