//! Order and order-product route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;

use storeroom_core::{OrderDate, OrderId, ProductId, UserId};

use super::MessageResponse;
use crate::db::{OrderRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiPath};
use crate::models::{Order, Product};
use crate::state::AppState;

/// Body of `POST /orders`.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub user_id: UserId,
    /// `YYYY-MM-DD`; the current time when omitted.
    #[serde(default)]
    pub order_date: Option<OrderDate>,
}

/// Place an order.
///
/// POST /orders
pub async fn create(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateOrderRequest>,
) -> Result<Json<Order>> {
    let order_date = req.order_date.unwrap_or_else(OrderDate::now);
    let order = OrderRepository::new(state.pool())
        .create(req.user_id, order_date)
        .await
        .map_err(|e| match e {
            RepositoryError::InvalidReference(_) => {
                AppError::NotFound("User not found".to_string())
            }
            other => AppError::Database(other),
        })?;
    Ok(Json(order))
}

/// List a user's orders.
///
/// GET /orders/user/{user_id}
pub async fn by_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<UserId>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user_id)
        .await?;
    Ok(Json(orders))
}

/// List the products in an order.
///
/// GET /orders/{order_id}/products
pub async fn products(
    State(state): State<AppState>,
    ApiPath(order_id): ApiPath<OrderId>,
) -> Result<Json<Vec<Product>>> {
    let products = OrderRepository::new(state.pool()).products(order_id).await?;
    Ok(Json(products))
}

/// Add a product to an order.
///
/// POST /orders/{order_id}/add_product/{product_id}
///
/// A pair that is already present is a client error (400).
pub async fn add_product(
    State(state): State<AppState>,
    ApiPath((order_id, product_id)): ApiPath<(OrderId, ProductId)>,
) -> Result<Json<MessageResponse>> {
    OrderRepository::new(state.pool())
        .add_product(order_id, product_id)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => {
                AppError::BadRequest("Product already in order".to_string())
            }
            RepositoryError::InvalidReference(_) => {
                AppError::NotFound("Order or product not found".to_string())
            }
            other => AppError::Database(other),
        })?;
    Ok(Json(MessageResponse::new("Product added to order")))
}

/// Remove a product from an order.
///
/// DELETE /orders/{order_id}/remove_product/{product_id}
pub async fn remove_product(
    State(state): State<AppState>,
    ApiPath((order_id, product_id)): ApiPath<(OrderId, ProductId)>,
) -> Result<Json<MessageResponse>> {
    let removed = OrderRepository::new(state.pool())
        .remove_product(order_id, product_id)
        .await?;
    if !removed {
        return Err(AppError::NotFound("Product not in order".to_string()));
    }
    Ok(Json(MessageResponse::new("Product removed from order")))
}
