//! Core types for Storeroom.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod order_date;
pub mod price;

pub use email::{Email, EmailError};
pub use id::*;
pub use order_date::{OrderDate, OrderDateError};
pub use price::{Price, PriceError};
