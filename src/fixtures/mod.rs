//! Fixtures
//!
//! YAML-backed orders and deal sets shared between integration tests
//! and demos. An order lives under `fixtures/orders/<name>.yml`, its
//! deal set under `fixtures/deals/<name>.yml`.

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::{
    deals::{Deal, DealBook},
    fixtures::{deals::DealsFixture, orders::OrderFixture},
    items::OrderItem,
};

pub mod deals;
pub mod orders;

/// Fixture parsing errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Two items in the loaded order share an id
    #[error("Duplicate item id in order fixture: {0}")]
    DuplicateItem(u64),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Accumulated order lines
    items: Vec<OrderItem>,

    /// Deal book accumulating loaded deal sets
    book: DealBook,
}

impl Fixture {
    /// Create a new empty fixture with the default base path.
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with a custom base path.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            items: Vec::new(),
            book: DealBook::new(),
        }
    }

    /// Load an order from a YAML fixture file, appending to any items
    /// already loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an
    /// item id collides with one already loaded.
    pub fn load_order(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("orders").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: OrderFixture = serde_norway::from_str(&contents)?;

        for item in fixture.items {
            if self.items.iter().any(|loaded| loaded.item_id == item.item_id) {
                return Err(FixtureError::DuplicateItem(item.item_id));
            }

            self.items.push(item);
        }

        Ok(self)
    }

    /// Load a deal set from a YAML fixture file, registering onto the
    /// fixture's book.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_deals(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("deals").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: DealsFixture = serde_norway::from_str(&contents)?;

        for deal in fixture.deals {
            deal.register(&mut self.book);
        }

        Ok(self)
    }

    /// Load a complete fixture set (order and deals with the same
    /// name).
    ///
    /// # Errors
    ///
    /// Returns an error if either fixture file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_order(name)?.load_deals(name)?;

        Ok(fixture)
    }

    /// The loaded order.
    pub fn order(&self) -> &[OrderItem] {
        &self.items
    }

    /// The loaded deals, in registration order.
    pub fn deals(&self) -> &[Deal] {
        self.book.deals()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
