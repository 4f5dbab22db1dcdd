//! Schema creation commands.
//!
//! # Usage
//!
//! ```bash
//! storeroom schema shop
//! storeroom schema pets
//! storeroom schema all
//! ```
//!
//! # Environment Variables
//!
//! - `SHOP_DATABASE_URL` - `SQLite` connection string for the shop
//! - `PETS_DATABASE_URL` - `SQLite` connection string for the pet registry
//!
//! Both fall back to `DATABASE_URL`.

use storeroom_pets::config::PetsConfig;
use storeroom_shop::config::ShopConfig;

use super::CommandError;

/// Create the shop tables.
///
/// # Errors
///
/// Returns an error if configuration is missing or the DDL fails.
pub async fn shop() -> Result<(), CommandError> {
    let config = ShopConfig::from_env()?;

    tracing::info!("Connecting to shop database...");
    let pool = storeroom_shop::db::create_pool(&config.database_url, 1).await?;

    storeroom_shop::db::schema::create_schema(&pool).await?;
    pool.close().await;
    Ok(())
}

/// Create the pet registry tables.
///
/// # Errors
///
/// Returns an error if configuration is missing or the DDL fails.
pub async fn pets() -> Result<(), CommandError> {
    let config = PetsConfig::from_env()?;

    tracing::info!("Connecting to pet registry database...");
    let pool = storeroom_pets::db::create_pool(&config.database_url, 1).await?;

    storeroom_pets::db::schema::create_schema(&pool).await?;
    pool.close().await;
    Ok(())
}
