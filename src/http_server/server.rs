//! # HTTP Server
//!
//! Wraps the user routes in the JSON content-type layer and serves them.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::observability::{log_event_with_fields, Event};
use crate::users::UserStore;

use super::config::HttpServerConfig;
use super::user_routes::user_routes;

/// Build the full router: user routes plus the content-type layer.
///
/// The layer overrides whatever the inner service set, so handler errors
/// and the router's own 404/405 responses are labelled JSON too.
pub fn build_router(store: Arc<dyn UserStore>) -> Router {
    user_routes(store).layer(SetResponseHeaderLayer::overriding(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    ))
}

/// HTTP server for the users API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn with_config(store: Arc<dyn UserStore>, config: HttpServerConfig) -> Self {
        Self {
            config,
            router: build_router(store),
        }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Bind and serve until `shutdown` resolves
    pub async fn start<F>(self, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let bound = addr.to_string();
        log_event_with_fields(Event::Serving, &[("addr", bound.as_str())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::MemoryUserStore;

    fn store() -> Arc<dyn UserStore> {
        Arc::new(MemoryUserStore::new())
    }

    #[test]
    fn test_server_creation() {
        let server = HttpServer::with_config(store(), HttpServerConfig::default());
        assert_eq!(server.socket_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig {
            port: 8080,
            ..Default::default()
        };
        let server = HttpServer::with_config(store(), config);
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_start_rejects_bad_host() {
        let config = HttpServerConfig {
            host: "not a host".to_string(),
            port: 8000,
        };
        let server = HttpServer::with_config(store(), config);

        let err = server.start(async {}).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_serves_until_shutdown() {
        let config = HttpServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        };
        let server = HttpServer::with_config(store(), config);

        // Shutdown future is ready immediately, so serve returns once bound
        server.start(async {}).await.unwrap();
    }
}
