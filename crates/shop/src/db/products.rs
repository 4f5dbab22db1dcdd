//! Product repository for database operations.

use sqlx::SqlitePool;

use storeroom_core::{Price, ProductId};

use super::{Constraint, RepositoryError, violated_constraint};
use crate::models::product::{NewProduct, Product};

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    product_name: String,
    price: f64,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Price::new(row.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price for product {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            product_name: row.product_name,
            price,
        })
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, product_name, price FROM products ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, product_name, price FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Insert a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new_product: &NewProduct) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO products (product_name, price)
            VALUES (?, ?)
            RETURNING id, product_name, price
            ",
        )
        .bind(&new_product.product_name)
        .bind(new_product.price)
        .fetch_one(self.pool)
        .await?;

        let product = Product::try_from(row)?;
        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Overwrite a product's name and price.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        changes: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            UPDATE products
            SET product_name = ?, price = ?
            WHERE id = ?
            RETURNING id, product_name, price
            ",
        )
        .bind(&changes.product_name)
        .bind(changes.price)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        tracing::info!(product_id = %id, "Product updated");
        Product::try_from(row)
    }

    /// Delete a product by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if an order still contains the product.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| match violated_constraint(&e) {
                Some(Constraint::ForeignKey) => {
                    RepositoryError::Conflict("product is part of an order".to_owned())
                }
                _ => RepositoryError::Database(e),
            })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(product_id = %id, "Product deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    fn widget(price: f64) -> NewProduct {
        NewProduct {
            product_name: "Widget".to_string(),
            price: Price::new(price).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_list_get() {
        let pool = create_memory_pool().await.unwrap();
        let repo = ProductRepository::new(&pool);

        let a = repo.create(&widget(2.5)).await.unwrap();
        let b = repo.create(&widget(10.0)).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all, vec![a.clone(), b]);
        assert_eq!(repo.get_by_id(a.id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn test_update_overwrites_both_fields() {
        let pool = create_memory_pool().await.unwrap();
        let repo = ProductRepository::new(&pool);

        let product = repo.create(&widget(2.5)).await.unwrap();
        let updated = repo
            .update(
                product.id,
                &NewProduct {
                    product_name: "Gadget".to_string(),
                    price: Price::new(3.75).unwrap(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, product.id);
        assert_eq!(updated.product_name, "Gadget");
        assert!((updated.price.amount() - 3.75).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let pool = create_memory_pool().await.unwrap();
        let repo = ProductRepository::new(&pool);

        let err = repo.update(ProductId::new(1), &widget(1.0)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_negative_price_in_store_is_corruption() {
        let pool = create_memory_pool().await.unwrap();
        sqlx::query("INSERT INTO products (product_name, price) VALUES ('Broken', -1.0)")
            .execute(&pool)
            .await
            .unwrap();

        let err = ProductRepository::new(&pool).list().await.unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }
}
