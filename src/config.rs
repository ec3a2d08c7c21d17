//! Service configuration
//!
//! The only input is `DATABASE_URL`, read once at startup. The listener
//! address is fixed to the `HttpServerConfig` defaults.

use std::env::{self, VarError};

use thiserror::Error;

use crate::http_server::HttpServerConfig;

/// Environment variable holding the Postgres connection string
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Configuration errors (always fatal at startup)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    #[error("DATABASE_URL is empty")]
    EmptyDatabaseUrl,

    #[error("DATABASE_URL is not valid unicode")]
    DatabaseUrlNotUnicode,
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::MissingDatabaseUrl => "USERS_CONFIG_MISSING_DATABASE_URL",
            ConfigError::EmptyDatabaseUrl => "USERS_CONFIG_EMPTY_DATABASE_URL",
            ConfigError::DatabaseUrlNotUnicode => "USERS_CONFIG_DATABASE_URL_NOT_UNICODE",
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub database_url: String,
    pub http: HttpServerConfig,
}

impl ServiceConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key))
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let database_url = match lookup(DATABASE_URL_VAR) {
            Ok(url) => url,
            Err(VarError::NotPresent) => return Err(ConfigError::MissingDatabaseUrl),
            Err(VarError::NotUnicode(_)) => return Err(ConfigError::DatabaseUrlNotUnicode),
        };

        if database_url.trim().is_empty() {
            return Err(ConfigError::EmptyDatabaseUrl);
        }

        Ok(Self {
            database_url,
            http: HttpServerConfig::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn test_reads_database_url() {
        let config = ServiceConfig::from_lookup(|key| {
            assert_eq!(key, DATABASE_URL_VAR);
            Ok("postgres://app@localhost/app".to_string())
        })
        .unwrap();

        assert_eq!(config.database_url, "postgres://app@localhost/app");
        assert_eq!(config.http.socket_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_missing_database_url() {
        let err = ServiceConfig::from_lookup(|_| Err(VarError::NotPresent)).unwrap_err();
        assert_eq!(err, ConfigError::MissingDatabaseUrl);
        assert_eq!(err.to_string(), "DATABASE_URL is not set");
    }

    #[test]
    fn test_blank_database_url() {
        let err = ServiceConfig::from_lookup(|_| Ok("   ".to_string())).unwrap_err();
        assert_eq!(err, ConfigError::EmptyDatabaseUrl);
    }

    #[test]
    fn test_non_unicode_database_url() {
        let err = ServiceConfig::from_lookup(|_| Err(VarError::NotUnicode(OsString::new())))
            .unwrap_err();
        assert_eq!(err.code(), "USERS_CONFIG_DATABASE_URL_NOT_UNICODE");
    }
}
