//! HTTP route handlers for the pet registry.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                    - Liveness
//! GET    /health/ready              - Readiness (database ping)
//!
//! GET    /users                     - List users
//! POST   /users                     - Register user
//! GET    /users/{id}                - User detail
//! GET    /users/{id}/pets           - Pets owned by a user
//! POST   /users/{id}/pets/{pet_id}  - Adopt
//! DELETE /users/{id}/pets/{pet_id}  - Release
//!
//! GET    /pets                      - List pets
//! POST   /pets                      - Register pet
//! GET    /pets/{id}                 - Pet detail
//! GET    /pets/{id}/owners          - Owners of a pet
//! ```

pub mod pets;
pub mod users;

use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
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

/// Create all API routes for the pet registry.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/users", get(users::index).post(users::create))
        .route("/users/{id}", get(users::show))
        .route("/users/{id}/pets", get(users::pets))
        .route(
            "/users/{id}/pets/{pet_id}",
            axum::routing::post(users::adopt).delete(users::release),
        )
        .route("/pets", get(pets::index).post(pets::create))
        .route("/pets/{id}", get(pets::show))
        .route("/pets/{id}/owners", get(pets::owners))
}

/// Build the complete application: routes, request IDs, tracing, Sentry.
pub fn app(state: AppState) -> Router {
    routes()
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
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint: 503 when the database is unreachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
