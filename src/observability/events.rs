//! Lifecycle events
//!
//! Events are explicit and typed. Per-request failures are logged with
//! free-form event names by the handlers; this enum covers process
//! lifecycle only.

use std::fmt;

/// Observable process lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot
    /// Startup begins
    BootStart,
    /// Configuration loaded from the environment
    ConfigLoaded,
    /// Database pool connected
    DatabaseConnected,
    /// `users` table exists
    SchemaEnsured,
    /// Listener bound, ready for requests
    Serving,
    /// Startup or serving failed, process exits (FATAL)
    Fatal,

    // Shutdown
    /// Shutdown signal received
    ShutdownStart,
    /// Listener drained and pool closed
    ShutdownComplete,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "USERS_API_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DatabaseConnected => "DATABASE_CONNECTED",
            Event::SchemaEnsured => "SCHEMA_ENSURED",
            Event::Serving => "USERS_API_SERVING",
            Event::Fatal => "USERS_API_FATAL",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::Fatal)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
