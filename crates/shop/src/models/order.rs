//! Order domain types.

use serde::Serialize;

use storeroom_core::{OrderDate, OrderId, UserId};

/// An order placed by a user.
///
/// Order contents live in the `order_products` association and are read
/// separately; an order carries no quantities or price snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub order_date: OrderDate,
}
