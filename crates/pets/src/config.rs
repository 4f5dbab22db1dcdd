//! Pet registry configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PETS_DATABASE_URL` - `SQLite` connection string (falls back to `DATABASE_URL`),
//!   e.g. `sqlite://pet_registry.db`
//!
//! ## Optional
//! - `PETS_HOST` - Bind address (default: 127.0.0.1)
//! - `PETS_PORT` - Listen port (default: 5001)
//! - `PETS_DB_MAX_CONNECTIONS` - Pool size, at least 1 (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `LOG_FORMAT` - `json` for JSON log lines, anything else for text

use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU32;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Pet registry configuration.
#[derive(Debug, Clone)]
pub struct PetsConfig {
    pub database_url: SecretString,
    pub host: IpAddr,
    pub port: u16,
    pub max_connections: u32,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub log_format: LogFormat,
}

impl PetsConfig {
    /// Load configuration from environment variables, reading `.env` first.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required keys are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("PETS_DATABASE_URL")
            .or_else(|| lookup("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("PETS_DATABASE_URL".to_string()))?;

        let max_connections: NonZeroU32 =
            parse_or_default(&lookup, "PETS_DB_MAX_CONNECTIONS", "10")?;

        let log_format = if lookup("LOG_FORMAT").as_deref() == Some("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        };

        Ok(Self {
            database_url,
            host: parse_or_default(&lookup, "PETS_HOST", "127.0.0.1")?,
            port: parse_or_default(&lookup, "PETS_PORT", "5001")?,
            max_connections: max_connections.get(),
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            log_format,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PetsConfig::from_lookup(|key| {
            (key == "PETS_DATABASE_URL").then(|| "sqlite::memory:".to_string())
        })
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5001");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_missing_database_url() {
        let err = PetsConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "PETS_DATABASE_URL"));
    }

    #[test]
    fn test_invalid_max_connections() {
        let err = PetsConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Some("sqlite::memory:".to_string()),
            "PETS_DB_MAX_CONNECTIONS" => Some("many".to_string()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "PETS_DB_MAX_CONNECTIONS"));
    }

    #[test]
    fn test_zero_max_connections_is_invalid() {
        let err = PetsConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Some("sqlite::memory:".to_string()),
            "PETS_DB_MAX_CONNECTIONS" => Some("0".to_string()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "PETS_DB_MAX_CONNECTIONS"));
    }
}
