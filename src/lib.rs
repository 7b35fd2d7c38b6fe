//! Gavotte
//!
//! Gavotte is a discount optimisation engine: given an order and a
//! library of deal rules, it selects the set of mutually compatible
//! discounts with the greatest combined savings. Two discounts are
//! compatible when they consume disjoint sets of order items, so the
//! search is a partial-cover enumeration over a dancing-links sparse
//! matrix with one row per candidate discount and one column per item.

pub mod deals;
pub mod discounts;
pub mod fixtures;
pub mod items;
pub mod matrix;
pub mod prelude;
pub mod solvers;
