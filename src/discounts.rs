//! Discounts

use std::collections::BTreeSet;

/// A concrete saving produced by applying a deal to an order.
///
/// The set of covered `item_id`s is the discount's *slot*: two
/// discounts with equal item sets compete for the same slot and only
/// the better one survives candidate collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discount {
    /// Display name, usually the name of the deal that produced it
    pub name: String,

    /// The `item_id`s this discount consumes
    pub items: BTreeSet<u64>,

    /// Savings in minor units
    pub savings: i64,
}

impl Discount {
    /// Create a new discount over the given item ids.
    pub fn new(name: impl Into<String>, items: impl IntoIterator<Item = u64>, savings: i64) -> Self {
        Self {
            name: name.into(),
            items: items.into_iter().collect(),
            savings,
        }
    }

    /// Whether this discount consumes the given item.
    pub fn covers(&self, item_id: u64) -> bool {
        self.items.contains(&item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_reports_membership() {
        let discount = Discount::new("combo", [1, 3], 260);

        assert!(discount.covers(1));
        assert!(discount.covers(3));
        assert!(!discount.covers(2));
    }

    #[test]
    fn duplicate_item_ids_collapse() {
        let discount = Discount::new("pair", [4, 4], 400);

        assert_eq!(discount.items.len(), 1);
    }
}
