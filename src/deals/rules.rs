//! Built-in deal rules
//!
//! Concrete [`DealRule`] implementations for the common retail shapes.
//! Bespoke rules can stay closures; these exist so deal sets can be
//! described in fixture files and shared between tests and demos.

use std::collections::BTreeSet;

use serde::Deserialize;

use super::DealRule;
use crate::{discounts::Discount, items::OrderItem};

/// Selects the order items a rule may consume.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemFilter {
    /// Every item qualifies
    Any,

    /// Items whose name starts with the given prefix
    NamePrefix(String),

    /// An explicit allow-list of item ids
    ItemIds(BTreeSet<u64>),
}

impl ItemFilter {
    /// Whether the given item qualifies.
    pub fn matches(&self, item: &OrderItem) -> bool {
        match self {
            ItemFilter::Any => true,
            ItemFilter::NamePrefix(prefix) => item.name.starts_with(prefix.as_str()),
            ItemFilter::ItemIds(ids) => ids.contains(&item.item_id),
        }
    }
}

/// Percentage off every cross pair drawn from two item pools.
///
/// For each pair of distinct items, one matching `left` and one
/// matching `right`, proposes a discount of `percent`% of the pair's
/// combined price, truncated to integer minor units.
#[derive(Debug, Clone)]
pub struct ComboPercentOff {
    /// Name stamped on produced discounts
    pub label: String,

    /// Pool for the first half of each pair
    pub left: ItemFilter,

    /// Pool for the second half of each pair
    pub right: ItemFilter,

    /// Whole-number percentage, e.g. `20` for 20% off
    pub percent: u32,
}

impl DealRule for ComboPercentOff {
    fn apply(&self, order: &[OrderItem]) -> Vec<Discount> {
        let mut discounts = Vec::new();

        for a in order.iter().filter(|item| self.left.matches(item)) {
            for b in order.iter().filter(|item| self.right.matches(item)) {
                if a.item_id == b.item_id {
                    continue;
                }

                let savings = (a.price + b.price) * i64::from(self.percent) / 100;

                discounts.push(Discount::new(
                    self.label.clone(),
                    [a.item_id, b.item_id],
                    savings,
                ));
            }
        }

        discounts
    }
}

/// Which of a qualifying pair goes free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnTheHouse {
    /// The cheaper item is free
    Cheapest,

    /// The dearer item is free
    Dearest,
}

/// Buy two, pay for one, across every pair from a single pool.
#[derive(Debug, Clone)]
pub struct TwoForOne {
    /// Name stamped on produced discounts
    pub label: String,

    /// Pool of qualifying items
    pub filter: ItemFilter,

    /// Which of the pair goes free
    pub on_the_house: OnTheHouse,
}

impl DealRule for TwoForOne {
    fn apply(&self, order: &[OrderItem]) -> Vec<Discount> {
        let pool: Vec<&OrderItem> = order
            .iter()
            .filter(|item| self.filter.matches(item))
            .collect();

        let mut discounts = Vec::new();

        for (i, a) in pool.iter().enumerate() {
            for b in &pool[i + 1..] {
                let savings = match self.on_the_house {
                    OnTheHouse::Cheapest => a.price.min(b.price),
                    OnTheHouse::Dearest => a.price.max(b.price),
                };

                discounts.push(Discount::new(
                    self.label.clone(),
                    [a.item_id, b.item_id],
                    savings,
                ));
            }
        }

        discounts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cafe_order() -> Vec<OrderItem> {
        vec![
            OrderItem::new(1, "Food 1", 1000),
            OrderItem::new(2, "Food 2", 2000),
            OrderItem::new(3, "Drink 1", 300),
            OrderItem::new(4, "Drink 2", 400),
        ]
    }

    #[test]
    fn filter_any_matches_everything() {
        let order = cafe_order();

        assert!(order.iter().all(|item| ItemFilter::Any.matches(item)));
    }

    #[test]
    fn filter_name_prefix_matches_by_name() {
        let order = cafe_order();
        let filter = ItemFilter::NamePrefix("Drink".into());

        let matched: Vec<u64> = order
            .iter()
            .filter(|item| filter.matches(item))
            .map(|item| item.item_id)
            .collect();

        assert_eq!(matched, vec![3, 4]);
    }

    #[test]
    fn filter_item_ids_matches_by_id() {
        let order = cafe_order();
        let filter = ItemFilter::ItemIds([2, 4].into());

        let matched: Vec<u64> = order
            .iter()
            .filter(|item| filter.matches(item))
            .map(|item| item.item_id)
            .collect();

        assert_eq!(matched, vec![2, 4]);
    }

    #[test]
    fn combo_pairs_every_left_with_every_right() {
        let rule = ComboPercentOff {
            label: "Combo".into(),
            left: ItemFilter::NamePrefix("Food".into()),
            right: ItemFilter::NamePrefix("Drink".into()),
            percent: 20,
        };

        let discounts = rule.apply(&cafe_order());

        assert_eq!(discounts.len(), 4);

        // 20% of 1000 + 300, truncated.
        assert_eq!(discounts[0].items, [1, 3].into());
        assert_eq!(discounts[0].savings, 260);

        assert_eq!(discounts[3].items, [2, 4].into());
        assert_eq!(discounts[3].savings, 480);
    }

    #[test]
    fn combo_truncates_toward_zero() {
        let order = [
            OrderItem::new(1, "Food", 101),
            OrderItem::new(2, "Drink", 2),
        ];

        let rule = ComboPercentOff {
            label: "Combo".into(),
            left: ItemFilter::NamePrefix("Food".into()),
            right: ItemFilter::NamePrefix("Drink".into()),
            percent: 20,
        };

        // 20% of 103 is 20.6; the discount keeps 20.
        assert_eq!(rule.apply(&order)[0].savings, 20);
    }

    #[test]
    fn combo_never_pairs_an_item_with_itself() {
        let rule = ComboPercentOff {
            label: "Combo".into(),
            left: ItemFilter::Any,
            right: ItemFilter::Any,
            percent: 10,
        };

        let discounts = rule.apply(&cafe_order());

        assert!(discounts.iter().all(|discount| discount.items.len() == 2));
    }

    #[test]
    fn two_for_one_cheapest_frees_the_cheaper_item() {
        let rule = TwoForOne {
            label: "BOGOF".into(),
            filter: ItemFilter::NamePrefix("Drink".into()),
            on_the_house: OnTheHouse::Cheapest,
        };

        let discounts = rule.apply(&cafe_order());

        assert_eq!(discounts.len(), 1);
        assert_eq!(discounts[0].items, [3, 4].into());
        assert_eq!(discounts[0].savings, 300);
    }

    #[test]
    fn two_for_one_dearest_frees_the_dearer_item() {
        let rule = TwoForOne {
            label: "BOGOF".into(),
            filter: ItemFilter::Any,
            on_the_house: OnTheHouse::Dearest,
        };

        let discounts = rule.apply(&cafe_order());

        // One pair per unordered couple of the four items.
        assert_eq!(discounts.len(), 6);

        assert_eq!(discounts[0].items, [1, 2].into());
        assert_eq!(discounts[0].savings, 2000);

        assert_eq!(discounts[5].items, [3, 4].into());
        assert_eq!(discounts[5].savings, 400);
    }

    #[test]
    fn rules_on_an_empty_order_propose_nothing() {
        let combo = ComboPercentOff {
            label: "Combo".into(),
            left: ItemFilter::Any,
            right: ItemFilter::Any,
            percent: 20,
        };

        let bogof = TwoForOne {
            label: "BOGOF".into(),
            filter: ItemFilter::Any,
            on_the_house: OnTheHouse::Cheapest,
        };

        assert!(combo.apply(&[]).is_empty());
        assert!(bogof.apply(&[]).is_empty());
    }
}
