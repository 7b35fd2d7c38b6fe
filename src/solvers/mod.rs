//! Discount solving
//!
//! Turns a deal library plus an order into the best set of mutually
//! compatible discounts: apply every deal, keep the best candidate per
//! item set, then search the candidate-by-item matrix for the partial
//! covering with the greatest combined savings.

use std::collections::BTreeSet;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    deals::Deal,
    discounts::Discount,
    items::OrderItem,
    matrix::{MatrixError, SparseMatrix},
};

/// Errors raised while collecting or solving discounts.
#[derive(Debug, Error)]
pub enum SolverError {
    /// A deal produced a discount referencing an item missing from the
    /// order.
    #[error("deal {deal:?} produced a discount for item {item_id}, which is not in the order")]
    UnknownItem {
        /// Name of the offending deal
        deal: String,

        /// The item id that is not part of the order
        item_id: u64,
    },

    /// A deal produced a discount with negative savings.
    #[error("deal {deal:?} produced a discount with negative savings {savings}")]
    NegativeSavings {
        /// Name of the offending deal
        deal: String,

        /// The offending savings amount
        savings: i64,
    },

    /// Wrapped matrix error.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

/// The solver's selection for one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverResult {
    /// Selected discounts, topmost candidate first
    pub discounts: Vec<Discount>,

    /// Combined savings of the selection, in minor units
    pub total_savings: i64,

    /// Ids of items consumed by a selected discount, in order position
    pub affected_items: SmallVec<[u64; 8]>,

    /// Ids of items left at full price, in order position
    pub unaffected_items: SmallVec<[u64; 8]>,
}

/// Run a single deal's rule against an order.
pub fn apply_deal(deal: &Deal, order: &[OrderItem]) -> Vec<Discount> {
    deal.apply(order)
}

/// Gather candidate discounts from every deal, validated and
/// deduplicated by item set.
///
/// Of two discounts over the same item set the strictly greater
/// savings wins; on equal savings the incumbent is kept, so earlier
/// deals and earlier rule output take precedence. Candidates keep
/// their first-seen order.
///
/// # Errors
///
/// Returns a [`SolverError`] if any rule produces a discount that
/// references an item outside the order or carries negative savings.
pub fn collect_discounts(
    deals: &[Deal],
    order: &[OrderItem],
) -> Result<Vec<Discount>, SolverError> {
    let known: FxHashSet<u64> = order.iter().map(|item| item.item_id).collect();

    let mut slots: FxHashMap<BTreeSet<u64>, usize> = FxHashMap::default();
    let mut candidates: Vec<Discount> = Vec::new();

    for deal in deals {
        for discount in apply_deal(deal, order) {
            if discount.savings < 0 {
                return Err(SolverError::NegativeSavings {
                    deal: deal.name().to_string(),
                    savings: discount.savings,
                });
            }

            if let Some(&item_id) = discount.items.iter().find(|&id| !known.contains(id)) {
                return Err(SolverError::UnknownItem {
                    deal: deal.name().to_string(),
                    item_id,
                });
            }

            match slots.get(&discount.items) {
                Some(&index) => {
                    if discount.savings > candidates[index].savings {
                        candidates[index] = discount;
                    }
                }
                None => {
                    slots.insert(discount.items.clone(), candidates.len());
                    candidates.push(discount);
                }
            }
        }
    }

    Ok(candidates)
}

/// Choose the maximal-savings set of compatible discounts for an
/// order.
///
/// Builds a sparse boolean matrix with one row per candidate discount
/// and one column per order item, enumerates every partial covering,
/// and keeps the first covering with the greatest combined savings. An
/// order with no applicable discounts yields an empty selection; that
/// is success, not an error.
///
/// # Errors
///
/// Returns a [`SolverError`] if any rule produces a malformed
/// discount.
pub fn solve(deals: &[Deal], order: &[OrderItem]) -> Result<SolverResult, SolverError> {
    let candidates = collect_discounts(deals, order)?;

    debug!(
        candidates = candidates.len(),
        items = order.len(),
        "solving discount selection"
    );

    let mut matrix = SparseMatrix::new(candidates, order.to_vec(), |discount: &Discount, item| {
        discount.covers(item.item_id)
    });

    let mut best: Vec<Discount> = Vec::new();
    let mut best_savings: i64 = 0;

    // The empty covering comes first with zero savings; keeping only
    // strictly better coverings makes the first maximum the winner.
    for covering in matrix.covering_rows() {
        let savings: i64 = covering.iter().map(|discount| discount.savings).sum();

        if savings > best_savings {
            best_savings = savings;
            best = covering.into_iter().cloned().collect();
        }
    }

    let selected: FxHashSet<u64> = best
        .iter()
        .flat_map(|discount| discount.items.iter().copied())
        .collect();

    let mut affected_items = SmallVec::new();
    let mut unaffected_items = SmallVec::new();

    for item in order {
        if selected.contains(&item.item_id) {
            affected_items.push(item.item_id);
        } else {
            unaffected_items.push(item.item_id);
        }
    }

    debug!(
        selected = best.len(),
        total_savings = best_savings,
        "selected covering"
    );

    Ok(SolverResult {
        discounts: best,
        total_savings: best_savings,
        affected_items,
        unaffected_items,
    })
}
