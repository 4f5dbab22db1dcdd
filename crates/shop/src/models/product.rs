//! Product domain types.

use serde::Serialize;

use storeroom_core::{Price, ProductId};

/// A catalogue product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub product_name: String,
    pub price: Price,
}

/// Fields for inserting or fully overwriting a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub product_name: String,
    pub price: Price,
}
