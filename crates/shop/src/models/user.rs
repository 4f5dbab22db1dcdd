//! User domain types.

use serde::Serialize;

use storeroom_core::{Email, UserId};

/// A shop customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: Email,
    /// Optional postal address.
    pub address: Option<String>,
}

/// Fields required to insert a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub address: Option<String>,
}

/// What an update does to the stored address.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AddressChange {
    /// Leave the stored address as it is.
    #[default]
    Keep,
    /// Overwrite it, possibly with `NULL`.
    Replace(Option<String>),
}

/// A full overwrite of a user's mutable fields.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub name: String,
    pub email: Email,
    pub address: AddressChange,
}
