//! CLI subcommand implementations.

pub mod schema;
pub mod seed;
pub mod users;

use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Service configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database connection or query error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] storeroom_shop::db::RepositoryError),

    /// Fixture file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Fixture file is not valid YAML for the expected shape.
    #[error("Invalid fixture: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<storeroom_shop::config::ConfigError> for CommandError {
    fn from(err: storeroom_shop::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<storeroom_pets::config::ConfigError> for CommandError {
    fn from(err: storeroom_pets::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
