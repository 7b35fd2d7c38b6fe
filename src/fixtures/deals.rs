//! Deal fixtures

use serde::Deserialize;

use crate::deals::{
    DealBook, DealId,
    rules::{ComboPercentOff, ItemFilter, OnTheHouse, TwoForOne},
};

/// On-disk shape of a deal set fixture file.
#[derive(Debug, Deserialize)]
pub struct DealsFixture {
    /// Deals in registration order
    pub deals: Vec<DealFixture>,
}

/// One deal entry in a fixture file.
#[derive(Debug, Deserialize)]
pub struct DealFixture {
    /// Deal name, stamped on the discounts its rule produces
    pub name: String,

    /// Rule configuration
    pub rule: RuleFixture,
}

/// Configuration for one built-in rule.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RuleFixture {
    /// [`ComboPercentOff`]
    #[serde(rename_all = "kebab-case")]
    ComboPercentOff {
        /// Pool for the first half of each pair
        left: ItemFilter,

        /// Pool for the second half of each pair
        right: ItemFilter,

        /// Whole-number percentage off the pair's combined price
        percent: u32,
    },

    /// [`TwoForOne`]
    #[serde(rename_all = "kebab-case")]
    TwoForOne {
        /// Pool of qualifying items
        filter: ItemFilter,

        /// Which of the pair goes free
        on_the_house: OnTheHouse,
    },
}

impl DealFixture {
    /// Register this deal on the given book.
    pub fn register(self, book: &mut DealBook) -> DealId {
        match self.rule {
            RuleFixture::ComboPercentOff {
                left,
                right,
                percent,
            } => book.register(
                self.name.clone(),
                ComboPercentOff {
                    label: self.name,
                    left,
                    right,
                    percent,
                },
            ),
            RuleFixture::TwoForOne {
                filter,
                on_the_house,
            } => book.register(
                self.name.clone(),
                TwoForOne {
                    label: self.name,
                    filter,
                    on_the_house,
                },
            ),
        }
    }
}
