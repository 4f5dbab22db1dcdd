//! Database operations for the shop `SQLite` store.
//!
//! ## Tables
//!
//! - `users` - Customers (email is unique)
//! - `products` - Catalogue entries with a price
//! - `orders` - One row per order, owned by a user
//! - `order_products` - Order contents, keyed by `(order_id, product_id)`
//!
//! # Schema
//!
//! There is no migration tooling. [`schema::create_schema`] runs idempotent
//! DDL on startup; it can also be run explicitly via:
//! ```bash
//! storeroom schema shop
//! ```

pub mod orders;
pub mod products;
pub mod schema;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (unique email, duplicate pair, row still referenced).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A foreign key points at a row that does not exist.
    #[error("invalid reference: {0}")]
    InvalidReference(String),
}

/// Constraint classes the repositories translate into domain errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Constraint {
    /// `UNIQUE` or `PRIMARY KEY` violation.
    Unique,
    /// `FOREIGN KEY` violation.
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

/// Create a `SQLite` connection pool.
///
/// The database file is created if missing and foreign keys are enforced on
/// every connection.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
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

/// Create a private in-memory database with the shop schema applied.
///
/// The pool holds exactly one connection that never expires, because each
/// `SQLite` in-memory connection is its own database. Used by tests.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection or schema creation fails.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

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
