//! Order items

use serde::Deserialize;

/// A single line item in an order.
///
/// Prices are integers in the currency's minor unit; the engine never
/// performs currency arithmetic beyond summing them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderItem {
    /// Identifier unique within the order
    pub item_id: u64,

    /// Display name
    pub name: String,

    /// Price in minor units
    pub price: i64,
}

impl OrderItem {
    /// Create a new order item.
    pub fn new(item_id: u64, name: impl Into<String>, price: i64) -> Self {
        Self {
            item_id,
            name: name.into(),
            price,
        }
    }
}
