//! Integration tests for Storeroom.
//!
//! Each test spawns the real service router on an ephemeral port, backed by
//! its own in-memory `SQLite` database, and talks to it over HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storeroom-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shop_api` - E-commerce API tests
//! - `pet_registry` - Pet registry API tests

use std::net::SocketAddr;

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use sqlx::SqlitePool;
use tokio::net::TcpListener;

/// A running service plus an HTTP client pointed at it.
pub struct TestServer {
    pub client: Client,
    pub base_url: String,
    pub pool: SqlitePool,
}

impl TestServer {
    /// Start the shop service on a fresh in-memory database.
    ///
    /// # Panics
    ///
    /// Panics if the database or listener cannot be set up.
    pub async fn shop() -> Self {
        let pool = storeroom_shop::db::create_memory_pool()
            .await
            .expect("Failed to create shop database");
        let config = storeroom_shop::config::ShopConfig::from_lookup(|key| {
            (key == "SHOP_DATABASE_URL").then(|| "sqlite::memory:".to_string())
        })
        .expect("Failed to build shop config");

        let app = storeroom_shop::app(storeroom_shop::AppState::new(config, pool.clone()));
        Self::serve(app, pool).await
    }

    /// Start the pet registry on a fresh in-memory database.
    ///
    /// # Panics
    ///
    /// Panics if the database or listener cannot be set up.
    pub async fn pets() -> Self {
        let pool = storeroom_pets::db::create_memory_pool()
            .await
            .expect("Failed to create pet registry database");
        let config = storeroom_pets::config::PetsConfig::from_lookup(|key| {
            (key == "PETS_DATABASE_URL").then(|| "sqlite::memory:".to_string())
        })
        .expect("Failed to build pets config");

        let app = storeroom_pets::app(storeroom_pets::AppState::new(config, pool.clone()));
        Self::serve(app, pool).await
    }

    async fn serve(app: axum::Router, pool: SqlitePool) -> Self {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{addr}"),
            pool,
        }
    }

    /// Absolute URL for a path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET` a path, returning status and JSON body.
    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed");
        read(resp).await
    }

    /// `POST` a JSON body.
    pub async fn post(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("POST request failed");
        read(resp).await
    }

    /// `POST` with no body.
    pub async fn post_empty(&self, path: &str) -> (StatusCode, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .send()
            .await
            .expect("POST request failed");
        read(resp).await
    }

    /// `PUT` a JSON body.
    pub async fn put(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("PUT request failed");
        read(resp).await
    }

    /// `DELETE` a path.
    pub async fn delete(&self, path: &str) -> (StatusCode, Value) {
        let resp = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("DELETE request failed");
        read(resp).await
    }

    /// Count the rows of a table.
    pub async fn count(&self, table: &str) -> i64 {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .expect("Count query failed");
        count
    }
}

/// Status plus body parsed as JSON (`Value::Null` for non-JSON bodies).
async fn read(resp: Response) -> (StatusCode, Value) {
    let status = resp.status();
    let text = resp.text().await.expect("Failed to read response body");
    let body = serde_json::from_str(&text).unwrap_or(Value::Null);
    (status, body)
}
