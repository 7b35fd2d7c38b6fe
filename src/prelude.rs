//! Gavotte prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    deals::{
        Deal, DealBook, DealId, DealRule,
        rules::{ComboPercentOff, ItemFilter, OnTheHouse, TwoForOne},
    },
    discounts::Discount,
    fixtures::{Fixture, FixtureError},
    items::OrderItem,
    matrix::{Covering, MatrixError, NodeKey, SparseMatrix},
    solvers::{SolverError, SolverResult, apply_deal, collect_discounts, solve},
};
