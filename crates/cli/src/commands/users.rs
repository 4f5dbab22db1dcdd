//! Shop user listing.

use tracing::info;

use storeroom_shop::config::ShopConfig;
use storeroom_shop::db::{self, UserRepository};

use super::CommandError;

/// Log every shop user.
///
/// # Errors
///
/// Returns an error if configuration is missing or the query fails.
pub async fn list() -> Result<(), CommandError> {
    let config = ShopConfig::from_env()?;
    let pool = db::create_pool(&config.database_url, 1).await?;

    let users = UserRepository::new(&pool).list().await?;
    pool.close().await;

    info!("Shop users ({})", users.len());
    for user in &users {
        info!(
            "  #{} {} <{}> {}",
            user.id,
            user.name,
            user.email,
            user.address.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
