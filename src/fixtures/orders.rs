//! Order fixtures

use serde::Deserialize;

use crate::items::OrderItem;

/// On-disk shape of an order fixture file.
#[derive(Debug, Deserialize)]
pub struct OrderFixture {
    /// Line items, first line first
    pub items: Vec<OrderItem>,
}
