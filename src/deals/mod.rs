//! Deals
//!
//! A deal is a named rule that inspects an order and proposes
//! discounts. Deals are registered on a [`DealBook`], which owns the
//! monotonic id sequence. The rules themselves are free-form: any
//! closure over the order works, and [`rules`] provides the common
//! retail shapes as concrete types.

use std::fmt;

use crate::{discounts::Discount, items::OrderItem};

pub mod rules;

/// Identifier assigned to a deal on registration, monotonic from 1
/// within one book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DealId(u64);

impl DealId {
    /// The raw id value.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deal #{}", self.0)
    }
}

/// A rule producing discounts from an order.
///
/// Rules must be pure: the same order yields the same discounts, with
/// no side effects. Any `Fn(&[OrderItem]) -> Vec<Discount>` closure is
/// a rule.
#[cfg_attr(test, mockall::automock)]
pub trait DealRule {
    /// Propose zero or more discounts for the given order.
    fn apply(&self, order: &[OrderItem]) -> Vec<Discount>;
}

impl<F> DealRule for F
where
    F: Fn(&[OrderItem]) -> Vec<Discount>,
{
    fn apply(&self, order: &[OrderItem]) -> Vec<Discount> {
        self(order)
    }
}

/// A registered deal: a stable id, a display name and the rule.
pub struct Deal {
    id: DealId,
    name: String,
    rule: Box<dyn DealRule>,
}

impl Deal {
    /// The id assigned at registration.
    pub fn id(&self) -> DealId {
        self.id
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the deal's rule against an order.
    pub fn apply(&self, order: &[OrderItem]) -> Vec<Discount> {
        self.rule.apply(order)
    }
}

impl fmt::Debug for Deal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deal")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The deal library.
///
/// Owns the registered deals and the id counter. Ids restart at 1 in a
/// fresh book, which is how tests reset the sequence.
#[derive(Debug)]
pub struct DealBook {
    deals: Vec<Deal>,
    next_id: u64,
}

impl DealBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self {
            deals: Vec::new(),
            next_id: 1,
        }
    }

    /// Register a deal, assigning the next id.
    pub fn register(&mut self, name: impl Into<String>, rule: impl DealRule + 'static) -> DealId {
        let id = DealId(self.next_id);
        self.next_id += 1;

        self.deals.push(Deal {
            id,
            name: name.into(),
            rule: Box::new(rule),
        });

        id
    }

    /// All registered deals, in registration order.
    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    /// Look up a deal by id.
    pub fn get(&self, id: DealId) -> Option<&Deal> {
        self.deals.iter().find(|deal| deal.id == id)
    }

    /// Number of registered deals.
    pub fn len(&self) -> usize {
        self.deals.len()
    }

    /// Whether the book has no deals.
    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }
}

impl Default for DealBook {
    fn default() -> Self {
        Self::new()
    }
}
