//! Storeroom Pets library.
//!
//! A registry of people and their pets, linked many-to-many, backed by
//! `SQLite`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

pub use routes::app;
pub use state::AppState;
