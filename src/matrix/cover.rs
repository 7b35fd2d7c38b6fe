//! Partial-cover enumeration
//!
//! Enumerates every set of rows whose column supports are pairwise
//! disjoint. Unlike the classical Algorithm X search this never
//! removes columns, so a covering need not span every column: in
//! discount terms, not every item in an order ends up discounted.

use smallvec::SmallVec;
use tracing::trace;

use super::{MatrixError, NodeKey, SparseMatrix};

/// One partial covering: the payloads of a set of pairwise
/// column-disjoint rows, topmost first.
pub type Covering<'a, R> = SmallVec<[&'a R; 4]>;

impl<R, C> SparseMatrix<R, C> {
    /// Enumerate every partial covering of the matrix.
    ///
    /// The result always contains the empty covering, and coverings
    /// appear in depth-first order of the topmost row chosen. The
    /// matrix is mutated during the search and fully restored before
    /// returning, so consecutive calls observe the same structure.
    pub fn covering_rows(&mut self) -> Vec<Covering<'_, R>> {
        let raw = self.coverings_below(self.header());

        trace!(coverings = raw.len(), "enumerated partial coverings");

        self.resolve(raw)
    }

    /// Enumerate the partial coverings drawn from the rows strictly
    /// below `start`, which must be this matrix's header or one of its
    /// row sentinels.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ForeignNode`] if `start` does not belong
    /// to this matrix.
    pub fn covering_rows_from(
        &mut self,
        start: NodeKey,
    ) -> Result<Vec<Covering<'_, R>>, MatrixError> {
        self.ensure_member(start)?;

        debug_assert!(
            self.col_of(start) == self.header(),
            "enumeration anchor must be the header or a row sentinel"
        );

        let raw = self.coverings_below(start);

        trace!(coverings = raw.len(), "enumerated partial coverings");

        Ok(self.resolve(raw))
    }

    /// The recursive search. Coverings are collected as indices into
    /// the row payload table; every row detached on the way down is
    /// reattached, LIFO, before the loop advances.
    fn coverings_below(&mut self, start: NodeKey) -> Vec<SmallVec<[usize; 4]>> {
        let mut result = vec![SmallVec::new()];
        let mut row = self.down_of(start);

        while !self.is_col_sentinel(row) {
            debug_assert!(self.is_inserted(row), "walked onto a detached row");

            let mut removals: Vec<NodeKey> = Vec::new();

            // Close the column rings around every row that shares a
            // column with `row`. Once detached, a row cannot be met
            // again through a later column, but the insertion check
            // stays as the guard against a double detach.
            let mut entry = self.right_of(row);

            while !self.is_row_sentinel(entry) {
                let col = self.col_of(entry);
                let mut other = self.down_of(col);

                while !self.is_col_sentinel(other) {
                    let conflict = self.row_of(other);

                    if conflict != row && self.is_inserted(conflict) {
                        self.detach_row(conflict);
                        removals.push(conflict);
                    }

                    other = self.down_of(other);
                }

                entry = self.right_of(entry);
            }

            // The chosen row leaves last: the conflict removals have
            // already rewired its own `down` to the next surviving
            // row, which is exactly where the recursion resumes.
            self.detach_row(row);
            removals.push(row);

            let index = self.row_index(row);

            for sub in self.coverings_below(row) {
                let mut covering = SmallVec::with_capacity(sub.len() + 1);
                covering.push(index);
                covering.extend(sub);
                result.push(covering);
            }

            while let Some(detached) = removals.pop() {
                self.reattach_row(detached);
            }

            row = self.down_of(row);
        }

        result
    }

    fn resolve(&self, raw: Vec<SmallVec<[usize; 4]>>) -> Vec<Covering<'_, R>> {
        raw.into_iter()
            .map(|covering| {
                covering
                    .into_iter()
                    .map(|index| &self.row_data[index])
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn parity() -> SparseMatrix<i32, i32> {
        SparseMatrix::new(1..=3, 1..=3, |row, col| (row + col) % 2 == 0)
    }

    fn as_values(coverings: Vec<Covering<'_, i32>>) -> Vec<Vec<i32>> {
        coverings
            .into_iter()
            .map(|covering| covering.into_iter().copied().collect())
            .collect()
    }

    #[test]
    fn parity_matrix_coverings_are_exactly_the_disjoint_sets() {
        let mut matrix = parity();

        let coverings = as_values(matrix.covering_rows());

        // Rows 1 and 3 share columns 1 and 3, so {1, 3} never appears.
        assert_eq!(
            coverings,
            vec![
                vec![],
                vec![1],
                vec![1, 2],
                vec![2],
                vec![2, 3],
                vec![3],
            ]
        );
    }

    #[test]
    fn enumeration_restores_every_link_bitwise() {
        let mut matrix = parity();
        let before = matrix.link_snapshot();

        let _ = matrix.covering_rows();

        assert_eq!(matrix.link_snapshot(), before);
        matrix.assert_link_reciprocity();
    }

    #[test]
    fn enumeration_from_a_row_restores_links_too() -> TestResult {
        let mut matrix = parity();
        let before = matrix.link_snapshot();

        let first = matrix.rows().next().expect("matrix has rows");
        let _ = matrix.covering_rows_from(first)?;

        assert_eq!(matrix.link_snapshot(), before);

        Ok(())
    }

    #[test]
    fn enumeration_from_a_row_only_sees_rows_below() -> TestResult {
        let mut matrix = parity();

        let first = matrix.rows().next().expect("matrix has rows");
        let coverings = as_values(matrix.covering_rows_from(first)?);

        assert_eq!(coverings, vec![vec![], vec![2], vec![2, 3], vec![3]]);

        Ok(())
    }

    #[test]
    fn empty_matrix_has_only_the_empty_covering() {
        let mut matrix: SparseMatrix<i32, i32> =
            SparseMatrix::new(std::iter::empty(), std::iter::empty(), |_, _| true);

        assert_eq!(as_values(matrix.covering_rows()), vec![Vec::<i32>::new()]);
    }

    #[test]
    fn matrix_without_entries_yields_every_subset() {
        let mut matrix: SparseMatrix<i32, i32> = SparseMatrix::new(1..=3, 1..=3, |_, _| false);

        let coverings = as_values(matrix.covering_rows());

        // All rows are vacuously disjoint: the full power set appears.
        assert_eq!(coverings.len(), 8);
        assert!(coverings.contains(&vec![1, 2, 3]));
        assert!(coverings.contains(&vec![]));
    }

    #[test]
    fn repeated_enumeration_is_observationally_identical() {
        let mut matrix = parity();

        let first = as_values(matrix.covering_rows());
        let second = as_values(matrix.covering_rows());

        assert_eq!(first, second);
    }

    #[test]
    fn foreign_anchor_is_rejected() -> TestResult {
        let mut matrix = parity();
        let other: SparseMatrix<i32, i32> = SparseMatrix::new(1..=5, 1..=5, |_, _| true);

        let last_row = other.rows().last().expect("larger matrix has rows");
        let foreign = other
            .cols_from(last_row)?
            .last()
            .expect("larger matrix has entries");

        assert!(matches!(
            matrix.covering_rows_from(foreign),
            Err(MatrixError::ForeignNode)
        ));

        Ok(())
    }

    #[test]
    fn coverings_have_no_duplicates() {
        let mut matrix: SparseMatrix<i32, i32> =
            SparseMatrix::new(1..=6, 1..=6, |row, col| col % row == 0);

        let coverings = as_values(matrix.covering_rows());

        let mut sorted = coverings.clone();
        sorted.sort();
        sorted.dedup();

        assert_eq!(sorted.len(), coverings.len());
    }

    #[test]
    fn every_covering_is_pairwise_column_disjoint() {
        let mut matrix: SparseMatrix<i32, i32> =
            SparseMatrix::new(1..=6, 1..=6, |row, col| col % row == 0);

        let coverings = as_values(matrix.covering_rows());

        let support = |row: i32| -> Vec<i32> { (1..=6).filter(|col| col % row == 0).collect() };

        for covering in &coverings {
            for (i, a) in covering.iter().enumerate() {
                for b in &covering[i + 1..] {
                    let sa = support(*a);

                    assert!(
                        !support(*b).iter().any(|col| sa.contains(col)),
                        "rows {a} and {b} share a column in covering {covering:?}"
                    );
                }
            }
        }
    }
}
