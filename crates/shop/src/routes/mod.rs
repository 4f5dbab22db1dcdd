//! HTTP route handlers for the shop.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                                        - Liveness
//! GET    /health/ready                                  - Readiness (database ping)
//!
//! # Users
//! GET    /users                                         - List users
//! POST   /users                                         - Create user
//! GET    /users/{id}                                    - User detail
//! PUT    /users/{id}                                    - Overwrite user
//! DELETE /users/{id}                                    - Delete user
//!
//! # Products
//! GET    /products                                      - List products
//! POST   /products                                      - Create product
//! GET    /products/{id}                                 - Product detail
//! PUT    /products/{id}                                 - Overwrite product
//! DELETE /products/{id}                                 - Delete product
//!
//! # Orders
//! POST   /orders                                        - Place order
//! GET    /orders/user/{user_id}                         - Orders of a user
//! GET    /orders/{order_id}/products                    - Products in an order
//! POST   /orders/{order_id}/add_product/{product_id}    - Add product to order
//! DELETE /orders/{order_id}/remove_product/{product_id} - Remove product from order
//! ```

pub mod health;
pub mod orders;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, post},
};
use serde::{Deserialize, Deserializer, Serialize};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// `{"message": ...}` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Distinguish an omitted key (`None`) from an explicit `null` (`Some(None)`).
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::index).post(users::create))
        .route(
            "/{id}",
            get(users::show).put(users::update).delete(users::destroy),
        )
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create))
        .route("/user/{user_id}", get(orders::by_user))
        .route("/{order_id}/products", get(orders::products))
        .route(
            "/{order_id}/add_product/{product_id}",
            post(orders::add_product),
        )
        .route(
            "/{order_id}/remove_product/{product_id}",
            delete(orders::remove_product),
        )
}

/// Create all API routes for the shop.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/users", user_routes())
        .nest("/products", product_routes())
        .nest("/orders", order_routes())
}

/// Build the complete application: routes, request IDs, tracing, Sentry.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        address: Option<Option<String>>,
    }

    #[test]
    fn test_double_option_distinguishes_null_from_missing() {
        let missing: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.address, None);

        let null: Patch = serde_json::from_str(r#"{"address": null}"#).unwrap();
        assert_eq!(null.address, Some(None));

        let set: Patch = serde_json::from_str(r#"{"address": "1 Main St"}"#).unwrap();
        assert_eq!(set.address, Some(Some("1 Main St".to_string())));
    }
}
