//! Database operations for the pet registry `SQLite` store.
//!
//! ## Tables
//!
//! - `user_account` - People who can own pets (email optional, not unique)
//! - `pets` - Animals with a name and a species
//! - `user_pet` - Ownership, keyed by `(user_id, pet_id)`

pub mod accounts;
pub mod ownership;
pub mod pets;
pub mod schema;

use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use accounts::AccountRepository;
pub use ownership::OwnershipRepository;
pub use pets::PetRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (duplicate ownership).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A foreign key points at a row that does not exist.
    #[error("invalid reference: {0}")]
    InvalidReference(String),
}

/// Constraint classes the repositories translate into domain errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Constraint {
    Unique,
    ForeignKey,
}

/// Which constraint, if any, a failed statement violated.
pub(crate) fn violated_constraint(err: &sqlx::Error) -> Option<Constraint> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };

    if db_err.is_unique_violation() {
        Some(Constraint::Unique)
    } else if db_err.is_foreign_key_violation() {
        Some(Constraint::ForeignKey)
    } else {
        None
    }
}

/// Create a `SQLite` connection pool with foreign keys enforced.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be established.
pub async fn create_pool(
    database_url: &SecretString,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create a private in-memory database with the pet registry schema applied.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection or schema creation fails.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    // One connection that never expires: each in-memory connection is its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    schema::create_schema(&pool).await?;
    Ok(pool)
}
