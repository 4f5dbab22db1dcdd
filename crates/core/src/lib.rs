//! Storeroom Core - Shared types library.
//!
//! This crate provides the domain types used by the Storeroom components:
//! - `shop` - E-commerce API (users, products, orders)
//! - `pets` - Pet registry API (users, pets, ownership)
//! - `cli` - Schema creation, seeding and listing tools
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP handling. Database encode/decode support for `SQLite` is
//! available behind the `sqlite` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, prices and order dates

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
