//! Order repository: orders and their product associations.
//!
//! The `order_products` primary key is the only duplicate guard. Adding a
//! pair is a single `INSERT`, so two concurrent requests for the same pair
//! cannot both succeed.

use sqlx::SqlitePool;

use storeroom_core::{OrderDate, OrderId, Price, ProductId, UserId};

use super::{Constraint, RepositoryError, violated_constraint};
use crate::models::order::Order;
use crate::models::product::Product;

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: UserId,
    order_date: OrderDate,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            order_date: row.order_date,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderProductRow {
    id: ProductId,
    product_name: String,
    price: f64,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Place an order for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        user_id: UserId,
        order_date: OrderDate,
    ) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders (user_id, order_date)
            VALUES (?, ?)
            RETURNING id, user_id, order_date
            ",
        )
        .bind(user_id)
        .bind(order_date)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some(Constraint::ForeignKey) => {
                RepositoryError::InvalidReference(format!("user {user_id} does not exist"))
            }
            _ => RepositoryError::Database(e),
        })?;

        let order = Order::from(row);
        tracing::info!(order_id = %order.id, user_id = %user_id, "Order created");
        Ok(order)
    }

    /// List a user's orders by ID. Unknown users simply have no orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, order_date
            FROM orders
            WHERE user_id = ?
            ORDER BY id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    /// List the products in an order by product ID.
    ///
    /// Unknown orders simply have no products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is invalid.
    pub async fn products(&self, order_id: OrderId) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderProductRow>(
            r"
            SELECT p.id, p.product_name, p.price
            FROM order_products op
            JOIN products p ON p.id = op.product_id
            WHERE op.order_id = ?
            ORDER BY p.id
            ",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let price = Price::new(row.price).map_err(|e| {
                    RepositoryError::DataCorruption(format!(
                        "invalid price for product {}: {e}",
                        row.id
                    ))
                })?;
                Ok(Product {
                    id: row.id,
                    product_name: row.product_name,
                    price,
                })
            })
            .collect()
    }

    /// Add a product to an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product is already in the order.
    /// Returns `RepositoryError::InvalidReference` if the order or product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_product(
        &self,
        order_id: OrderId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO order_products (order_id, product_id) VALUES (?, ?)")
            .bind(order_id)
            .bind(product_id)
            .execute(self.pool)
            .await
            .map_err(|e| match violated_constraint(&e) {
                Some(Constraint::Unique) => {
                    RepositoryError::Conflict("product already in order".to_owned())
                }
                Some(Constraint::ForeignKey) => RepositoryError::InvalidReference(format!(
                    "order {order_id} or product {product_id} does not exist"
                )),
                None => RepositoryError::Database(e),
            })?;

        tracing::info!(order_id = %order_id, product_id = %product_id, "Product added to order");
        Ok(())
    }

    /// Remove a product from an order.
    ///
    /// # Returns
    ///
    /// Returns `true` if the association was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove_product(
        &self,
        order_id: OrderId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("DELETE FROM order_products WHERE order_id = ? AND product_id = ?")
                .bind(order_id)
                .bind(product_id)
                .execute(self.pool)
                .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            tracing::info!(order_id = %order_id, product_id = %product_id, "Product removed from order");
        }
        Ok(removed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use storeroom_core::Email;

    use super::*;
    use crate::db::{ProductRepository, UserRepository, create_memory_pool};
    use crate::models::{NewProduct, NewUser};

    async fn seed_user(pool: &SqlitePool) -> UserId {
        UserRepository::new(pool)
            .create(&NewUser {
                name: "Ada".to_string(),
                email: Email::parse("ada@x.com").unwrap(),
                address: None,
            })
            .await
            .unwrap()
            .id
    }

    async fn seed_product(pool: &SqlitePool, name: &str) -> ProductId {
        ProductRepository::new(pool)
            .create(&NewProduct {
                product_name: name.to_string(),
                price: Price::new(1.0).unwrap(),
            })
            .await
            .unwrap()
            .id
    }

    async fn association_count(pool: &SqlitePool) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM order_products")
            .fetch_one(pool)
            .await
            .unwrap();
        count
    }

    #[tokio::test]
    async fn test_create_order_keeps_date() {
        let pool = create_memory_pool().await.unwrap();
        let user_id = seed_user(&pool).await;
        let repo = OrderRepository::new(&pool);

        let order = repo
            .create(user_id, OrderDate::parse("2024-01-01").unwrap())
            .await
            .unwrap();

        assert_eq!(order.user_id, user_id);
        assert_eq!(order.order_date.to_string(), "2024-01-01T00:00:00");
        assert_eq!(repo.list_for_user(user_id).await.unwrap(), vec![order]);
    }

    #[tokio::test]
    async fn test_create_order_for_unknown_user() {
        let pool = create_memory_pool().await.unwrap();
        let repo = OrderRepository::new(&pool);

        let err = repo
            .create(UserId::new(42), OrderDate::now())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_user_without_orders_lists_empty() {
        let pool = create_memory_pool().await.unwrap();
        let user_id = seed_user(&pool).await;

        let orders = OrderRepository::new(&pool)
            .list_for_user(user_id)
            .await
            .unwrap();
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn test_add_product_twice_conflicts_without_duplicate_row() {
        let pool = create_memory_pool().await.unwrap();
        let user_id = seed_user(&pool).await;
        let product_id = seed_product(&pool, "Widget").await;
        let repo = OrderRepository::new(&pool);
        let order = repo.create(user_id, OrderDate::now()).await.unwrap();

        repo.add_product(order.id, product_id).await.unwrap();
        let err = repo.add_product(order.id, product_id).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(association_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let pool = create_memory_pool().await.unwrap();
        let user_id = seed_user(&pool).await;
        let repo = OrderRepository::new(&pool);
        let order = repo.create(user_id, OrderDate::now()).await.unwrap();

        let err = repo
            .add_product(order.id, ProductId::new(77))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_remove_missing_pair_leaves_table_unchanged() {
        let pool = create_memory_pool().await.unwrap();
        let user_id = seed_user(&pool).await;
        let widget = seed_product(&pool, "Widget").await;
        let gadget = seed_product(&pool, "Gadget").await;
        let repo = OrderRepository::new(&pool);
        let order = repo.create(user_id, OrderDate::now()).await.unwrap();
        repo.add_product(order.id, widget).await.unwrap();

        assert!(!repo.remove_product(order.id, gadget).await.unwrap());
        assert_eq!(association_count(&pool).await, 1);

        assert!(repo.remove_product(order.id, widget).await.unwrap());
        assert_eq!(association_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_products_ignore_insertion_order() {
        let pool = create_memory_pool().await.unwrap();
        let user_id = seed_user(&pool).await;
        let widget = seed_product(&pool, "Widget").await;
        let gadget = seed_product(&pool, "Gadget").await;
        let repo = OrderRepository::new(&pool);
        let order = repo.create(user_id, OrderDate::now()).await.unwrap();

        repo.add_product(order.id, gadget).await.unwrap();
        repo.add_product(order.id, widget).await.unwrap();

        let ids: Vec<ProductId> = repo
            .products(order.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![widget, gadget]);
    }

    #[tokio::test]
    async fn test_products_of_unknown_order_is_empty() {
        let pool = create_memory_pool().await.unwrap();
        let products = OrderRepository::new(&pool)
            .products(OrderId::new(3))
            .await
            .unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_referenced_rows_cannot_be_deleted() {
        let pool = create_memory_pool().await.unwrap();
        let user_id = seed_user(&pool).await;
        let product_id = seed_product(&pool, "Widget").await;
        let repo = OrderRepository::new(&pool);
        let order = repo.create(user_id, OrderDate::now()).await.unwrap();
        repo.add_product(order.id, product_id).await.unwrap();

        let err = UserRepository::new(&pool).delete(user_id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        let err = ProductRepository::new(&pool)
            .delete(product_id)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }
}
