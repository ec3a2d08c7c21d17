//! Observability for the users service
//!
//! Structured JSON logging plus typed lifecycle events.
//!
//! # Usage
//!
//! ```ignore
//! use users_api::observability::{log_event, Event, Logger};
//!
//! log_event(Event::BootStart);
//! Logger::error("DB_QUERY_FAILED", &[("error", "connection reset")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // Verifies no panic
        log_event(Event::BootStart);
        log_event(Event::ShutdownComplete);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::Serving, &[("addr", "127.0.0.1:8000")]);
    }
}
