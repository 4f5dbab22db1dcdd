//! Seed the shop database from a YAML fixture.
//!
//! # Fixture format
//!
//! ```yaml
//! users:
//!   - name: Ada
//!     email: ada@x.com
//!     address: 1 Analytical Way   # optional
//! products:
//!   - product_name: Widget
//!     price: 9.99
//! ```
//!
//! Users whose email already exists are skipped, so the same fixture can be
//! loaded repeatedly. Products have no natural key and are always inserted.

use std::path::Path;

use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::info;

use storeroom_core::{Email, Price};
use storeroom_shop::config::ShopConfig;
use storeroom_shop::db::{self, ProductRepository, RepositoryError, UserRepository};
use storeroom_shop::models::{NewProduct, NewUser};

use super::CommandError;

/// Top-level fixture document.
#[derive(Debug, Default, Deserialize)]
pub struct ShopFixture {
    #[serde(default)]
    pub users: Vec<FixtureUser>,
    #[serde(default)]
    pub products: Vec<FixtureProduct>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureUser {
    pub name: String,
    pub email: Email,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureProduct {
    pub product_name: String,
    pub price: Price,
}

/// Counts reported after seeding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users_inserted: usize,
    pub users_skipped: usize,
    pub products_inserted: usize,
}

/// Insert every fixture row, skipping users whose email is taken.
///
/// # Errors
///
/// Returns an error on any database failure other than a duplicate email.
pub async fn seed_shop(
    pool: &SqlitePool,
    fixture: &ShopFixture,
) -> Result<SeedSummary, RepositoryError> {
    let mut summary = SeedSummary::default();

    let users = UserRepository::new(pool);
    for user in &fixture.users {
        let new_user = NewUser {
            name: user.name.clone(),
            email: user.email.clone(),
            address: user.address.clone(),
        };
        match users.create(&new_user).await {
            Ok(_) => summary.users_inserted += 1,
            Err(RepositoryError::Conflict(_)) => {
                info!(email = %user.email, "User already exists, skipping");
                summary.users_skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    let products = ProductRepository::new(pool);
    for product in &fixture.products {
        products
            .create(&NewProduct {
                product_name: product.product_name.clone(),
                price: product.price,
            })
            .await?;
        summary.products_inserted += 1;
    }

    Ok(summary)
}

/// Seed the shop database from `file_path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, configuration is
/// missing, or a database operation fails.
pub async fn shop(file_path: &Path) -> Result<(), CommandError> {
    info!(path = %file_path.display(), "Loading shop fixture");

    // Parse before connecting so a bad fixture never touches the database
    let content = tokio::fs::read_to_string(file_path)
        .await
        .map_err(|source| CommandError::Io {
            path: file_path.display().to_string(),
            source,
        })?;
    let fixture: ShopFixture = serde_yaml::from_str(&content)?;

    info!(
        users = fixture.users.len(),
        products = fixture.products.len(),
        "Parsed fixture"
    );

    let config = ShopConfig::from_env()?;
    let pool = db::create_pool(&config.database_url, 1).await?;
    db::schema::create_schema(&pool).await?;

    let summary = seed_shop(&pool, &fixture).await?;
    pool.close().await;

    info!("Seeding complete!");
    info!("  Users inserted: {}", summary.users_inserted);
    info!("  Users skipped (email exists): {}", summary.users_skipped);
    info!("  Products inserted: {}", summary.products_inserted);

    Ok(())
}
