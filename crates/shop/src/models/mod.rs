//! Domain models for the shop.
//!
//! These types are what handlers return and repositories produce. Row types
//! used for decoding live next to the queries in [`crate::db`].

pub mod order;
pub mod product;
pub mod user;

pub use order::Order;
pub use product::{NewProduct, Product};
pub use user::{AddressChange, NewUser, User, UserChanges};
