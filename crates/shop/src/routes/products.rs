//! Product route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;

use storeroom_core::{Price, ProductId};

use super::MessageResponse;
use crate::db::{ProductRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiPath};
use crate::models::{NewProduct, Product};
use crate::state::AppState;

const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Body of `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub product_name: String,
    pub price: Price,
}

impl From<ProductRequest> for NewProduct {
    fn from(req: ProductRequest) -> Self {
        Self {
            product_name: req.product_name,
            price: req.price,
        }
    }
}

/// List all products.
///
/// GET /products
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// Show one product.
///
/// GET /products/{id}
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
) -> Result<Json<Product>> {
    ProductRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.to_string()))
}

/// Create a product.
///
/// POST /products
pub async fn create(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ProductRequest>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .create(&req.into())
        .await?;
    Ok(Json(product))
}

/// Overwrite a product.
///
/// PUT /products/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
    ApiJson(req): ApiJson<ProductRequest>,
) -> Result<Json<Product>> {
    let changes = NewProduct::from(req);
    let product = ProductRepository::new(state.pool())
        .update(id, &changes)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(PRODUCT_NOT_FOUND.to_string()),
            other => AppError::Database(other),
        })?;
    Ok(Json(product))
}

/// Delete a product.
///
/// DELETE /products/{id}
pub async fn destroy(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
) -> Result<Json<MessageResponse>> {
    if !ProductRepository::new(state.pool()).delete(id).await? {
        return Err(AppError::NotFound(PRODUCT_NOT_FOUND.to_string()));
    }
    Ok(Json(MessageResponse::new("Product deleted")))
}
