//! Domain models for the pet registry.

pub mod account;
pub mod pet;

pub use account::{Account, NewAccount};
pub use pet::{NewPet, Pet};
