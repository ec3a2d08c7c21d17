//! Process startup and shutdown
//!
//! Sequence:
//! 1. Configuration load (`DATABASE_URL`)
//! 2. Database pool connect
//! 3. `users` table creation (idempotent)
//! 4. Listener bind and serve
//!
//! Any failure before step 4 aborts before a listener is opened.

use std::sync::Arc;

use thiserror::Error;

use crate::config::{ConfigError, ServiceConfig};
use crate::http_server::HttpServer;
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::users::{PgUserStore, StoreError};

/// Fatal process errors
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database unavailable: {0}")]
    Database(#[source] StoreError),

    #[error("schema creation failed: {0}")]
    Schema(#[source] StoreError),

    #[error("http server failed: {0}")]
    Serve(#[from] std::io::Error),
}

impl StartupError {
    pub fn code(&self) -> &'static str {
        match self {
            StartupError::Config(e) => e.code(),
            StartupError::Database(_) => "USERS_STARTUP_DATABASE",
            StartupError::Schema(_) => "USERS_STARTUP_SCHEMA",
            StartupError::Serve(_) => "USERS_STARTUP_SERVE",
        }
    }
}

/// Boot the service and serve until Ctrl-C or SIGTERM
pub async fn run() -> Result<(), StartupError> {
    log_event(Event::BootStart);

    let config = ServiceConfig::from_env()?;
    let addr = config.http.socket_addr();
    log_event_with_fields(Event::ConfigLoaded, &[("addr", addr.as_str())]);

    let store = PgUserStore::connect(&config.database_url)
        .await
        .map_err(StartupError::Database)?;
    log_event(Event::DatabaseConnected);

    store.ensure_schema().await.map_err(StartupError::Schema)?;
    log_event(Event::SchemaEnsured);

    let store = Arc::new(store);
    let server = HttpServer::with_config(store.clone(), config.http);
    server.start(shutdown_signal()).await?;

    store.close().await;
    log_event(Event::ShutdownComplete);

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            // No handler could be installed; rely on SIGTERM or never stop
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log_event(Event::ShutdownStart);
}
