//! Registry user types.

use serde::Serialize;

use storeroom_core::{AccountId, Email};

/// A person who can own pets. Served under `/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: Option<Email>,
}

/// Fields required to register a user.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: Option<Email>,
}
