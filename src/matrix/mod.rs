//! Sparse boolean matrix
//!
//! A four-way circular doubly-linked lattice in the dancing-links
//! style: one header, one sentinel per row and per column, and one
//! interior entry per `true` cell. Rows detach from the vertical axis
//! and reattach in LIFO order without touching their horizontal links,
//! which is the backtracking substrate of the partial-cover
//! enumeration in [`covering_rows`](SparseMatrix::covering_rows).
//!
//! Nodes live in an arena owned by the matrix and every link is an
//! arena key, so the matrix is freely movable and no node is freed
//! before the matrix itself is dropped.

use slotmap::SlotMap;

use self::node::{Datum, Node};

pub mod error;

mod cover;
mod node;

pub use cover::Covering;
pub use error::MatrixError;
pub use node::NodeKey;

/// A sparse boolean matrix over row payloads `R` and column payloads
/// `C`.
///
/// Built once from payload sequences and a predicate; thereafter only
/// [`covering_rows`](Self::covering_rows) mutates it, and that
/// restores the structure before returning. Not safe for concurrent
/// use; independent matrices are independent.
#[derive(Debug)]
pub struct SparseMatrix<R, C> {
    nodes: SlotMap<NodeKey, Node>,
    header: NodeKey,
    row_data: Vec<R>,
    col_data: Vec<C>,
}

impl<R, C> SparseMatrix<R, C> {
    /// Build a matrix with one row per element of `rows`, one column
    /// per element of `cols`, and an entry at every `(r, c)` where
    /// `entry(r, c)` is true.
    ///
    /// Cells are visited row-major, so each new entry is the
    /// bottom-right-most in its row and column at insertion time and
    /// every splice is O(1).
    pub fn new<P>(
        rows: impl IntoIterator<Item = R>,
        cols: impl IntoIterator<Item = C>,
        mut entry: P,
    ) -> Self
    where
        P: FnMut(&R, &C) -> bool,
    {
        let mut nodes = SlotMap::with_key();
        let header = nodes.insert_with_key(|key| Node::isolated(key, Datum::None));

        let mut matrix = Self {
            nodes,
            header,
            row_data: Vec::new(),
            col_data: Vec::new(),
        };

        for datum in rows {
            matrix.push_row(datum);
        }

        for datum in cols {
            matrix.push_col(datum);
        }

        let mut row = matrix.nodes[header].down;

        while row != header {
            let mut col = matrix.nodes[header].right;

            while col != header {
                let present = entry(
                    &matrix.row_data[matrix.row_index(row)],
                    &matrix.col_data[matrix.col_index(col)],
                );

                if present {
                    matrix.push_entry(row, col);
                }

                col = matrix.nodes[col].right;
            }

            row = matrix.nodes[row].down;
        }

        matrix
    }

    /// The header node anchoring both sentinel rings.
    pub fn header(&self) -> NodeKey {
        self.header
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.row_data.len()
    }

    /// Number of columns.
    pub fn col_count(&self) -> usize {
        self.col_data.len()
    }

    /// The payload of a row sentinel, if `key` is one.
    pub fn row_datum(&self, key: NodeKey) -> Option<&R> {
        match self.nodes.get(key)?.datum {
            Datum::Row(index) => self.row_data.get(index),
            _ => None,
        }
    }

    /// The payload of a column sentinel, if `key` is one.
    pub fn col_datum(&self, key: NodeKey) -> Option<&C> {
        match self.nodes.get(key)?.datum {
            Datum::Col(index) => self.col_data.get(index),
            _ => None,
        }
    }

    /// Walk the attached row sentinels, topmost first.
    pub fn rows(&self) -> Rows<'_, R, C> {
        Rows {
            matrix: self,
            cur: self.header,
        }
    }

    /// Walk downward from `start`: attached row sentinels when `start`
    /// is the header, a column's attached entries when `start` is a
    /// column sentinel. Excludes `start` itself.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ForeignNode`] if `start` does not belong
    /// to this matrix.
    pub fn rows_from(&self, start: NodeKey) -> Result<Rows<'_, R, C>, MatrixError> {
        self.ensure_member(start)?;

        Ok(Rows {
            matrix: self,
            cur: start,
        })
    }

    /// Walk the attached column sentinels, leftmost first.
    pub fn cols(&self) -> Cols<'_, R, C> {
        Cols {
            matrix: self,
            cur: self.header,
        }
    }

    /// Walk rightward from `start`: attached column sentinels when
    /// `start` is the header, a row's entries when `start` is a row
    /// sentinel. Excludes `start` itself.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ForeignNode`] if `start` does not belong
    /// to this matrix.
    pub fn cols_from(&self, start: NodeKey) -> Result<Cols<'_, R, C>, MatrixError> {
        self.ensure_member(start)?;

        Ok(Cols {
            matrix: self,
            cur: start,
        })
    }

    /// A node ends a downward walk iff its `col` link points at
    /// itself: column sentinels and the header.
    pub(crate) fn is_col_sentinel(&self, key: NodeKey) -> bool {
        self.nodes[key].col == key
    }

    /// A node ends a rightward walk iff its `row` link points at
    /// itself: row sentinels and the header.
    pub(crate) fn is_row_sentinel(&self, key: NodeKey) -> bool {
        self.nodes[key].row == key
    }

    /// All four reciprocal link invariants hold for `key`.
    ///
    /// False exactly while the node is vertically detached, which is
    /// what guards against detaching the same row twice during
    /// conflict collection.
    pub(crate) fn is_inserted(&self, key: NodeKey) -> bool {
        let node = &self.nodes[key];

        self.nodes[node.up].down == key
            && self.nodes[node.down].up == key
            && self.nodes[node.left].right == key
            && self.nodes[node.right].left == key
    }

    /// Remove `key` from its vertical ring. Horizontal links are left
    /// intact so the node can find its way back.
    pub(crate) fn unlink(&mut self, key: NodeKey) {
        let Node { up, down, .. } = self.nodes[key];

        self.nodes[up].down = down;
        self.nodes[down].up = up;
    }

    /// Reinsert `key` into all four neighbour links. The horizontal
    /// halves are no-ops after [`unlink`](Self::unlink); restoring all
    /// four keeps the operation its exact inverse for any node.
    pub(crate) fn relink(&mut self, key: NodeKey) {
        let Node {
            up,
            down,
            left,
            right,
            ..
        } = self.nodes[key];

        self.nodes[left].right = key;
        self.nodes[right].left = key;
        self.nodes[up].down = key;
        self.nodes[down].up = key;
    }

    /// Vertically detach a row sentinel and every entry in its
    /// horizontal ring.
    pub(crate) fn detach_row(&mut self, row: NodeKey) {
        let mut cur = row;

        loop {
            self.unlink(cur);
            cur = self.nodes[cur].right;

            if cur == row {
                break;
            }
        }
    }

    /// Reattach a row detached by [`detach_row`](Self::detach_row).
    ///
    /// Entries of one row sit in distinct columns, so the traversal
    /// order within the row is free; across rows, reattachment must
    /// pair LIFO-wise with detachment.
    pub(crate) fn reattach_row(&mut self, row: NodeKey) {
        let mut cur = row;

        loop {
            self.relink(cur);
            cur = self.nodes[cur].right;

            if cur == row {
                break;
            }
        }
    }

    /// Index into `row_data` for a row sentinel.
    pub(crate) fn row_index(&self, key: NodeKey) -> usize {
        let Datum::Row(index) = self.nodes[key].datum else {
            unreachable!("node is not a row sentinel")
        };

        index
    }

    fn col_index(&self, key: NodeKey) -> usize {
        let Datum::Col(index) = self.nodes[key].datum else {
            unreachable!("node is not a column sentinel")
        };

        index
    }

    pub(crate) fn down_of(&self, key: NodeKey) -> NodeKey {
        self.nodes[key].down
    }

    pub(crate) fn right_of(&self, key: NodeKey) -> NodeKey {
        self.nodes[key].right
    }

    pub(crate) fn col_of(&self, key: NodeKey) -> NodeKey {
        self.nodes[key].col
    }

    pub(crate) fn row_of(&self, key: NodeKey) -> NodeKey {
        self.nodes[key].row
    }

    /// Fail with [`MatrixError::ForeignNode`] unless `key` leads back
    /// to this matrix's header via its row anchor.
    pub(crate) fn ensure_member(&self, key: NodeKey) -> Result<(), MatrixError> {
        let node = self.nodes.get(key).ok_or(MatrixError::ForeignNode)?;
        let anchor = self.nodes.get(node.row).ok_or(MatrixError::ForeignNode)?;

        if anchor.col == self.header {
            Ok(())
        } else {
            Err(MatrixError::ForeignNode)
        }
    }

    /// Splice a row sentinel as the new vertical predecessor of the
    /// header; its horizontal ring starts as a singleton.
    fn push_row(&mut self, datum: R) -> NodeKey {
        let index = self.row_data.len();
        self.row_data.push(datum);

        let header = self.header;
        let up = self.nodes[header].up;

        let key = self.nodes.insert_with_key(|key| Node {
            up,
            down: header,
            left: key,
            right: key,
            row: key,
            col: header,
            datum: Datum::Row(index),
        });

        self.nodes[up].down = key;
        self.nodes[header].up = key;

        key
    }

    /// Splice a column sentinel as the new horizontal predecessor of
    /// the header; its vertical ring starts as a singleton.
    fn push_col(&mut self, datum: C) -> NodeKey {
        let index = self.col_data.len();
        self.col_data.push(datum);

        let header = self.header;
        let left = self.nodes[header].left;

        let key = self.nodes.insert_with_key(|key| Node {
            up: key,
            down: key,
            left,
            right: header,
            row: header,
            col: key,
            datum: Datum::Col(index),
        });

        self.nodes[left].right = key;
        self.nodes[header].left = key;

        key
    }

    /// Splice an entry at the bottom of its column ring and the right
    /// end of its row ring.
    fn push_entry(&mut self, row: NodeKey, col: NodeKey) -> NodeKey {
        let up = self.nodes[col].up;
        let left = self.nodes[row].left;

        let key = self.nodes.insert(Node {
            up,
            down: col,
            left,
            right: row,
            row,
            col,
            datum: Datum::None,
        });

        self.nodes[up].down = key;
        self.nodes[col].up = key;
        self.nodes[left].right = key;
        self.nodes[row].left = key;

        key
    }

    #[cfg(test)]
    pub(crate) fn link_snapshot(&self) -> Vec<(NodeKey, [NodeKey; 6])> {
        self.nodes
            .iter()
            .map(|(key, node)| {
                (
                    key,
                    [node.up, node.down, node.left, node.right, node.row, node.col],
                )
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn assert_link_reciprocity(&self) {
        for (key, node) in &self.nodes {
            assert_eq!(self.nodes[node.up].down, key, "up/down broken at {key:?}");
            assert_eq!(self.nodes[node.down].up, key, "down/up broken at {key:?}");
            assert_eq!(
                self.nodes[node.left].right, key,
                "left/right broken at {key:?}"
            );
            assert_eq!(
                self.nodes[node.right].left, key,
                "right/left broken at {key:?}"
            );
        }
    }
}

/// Lazy downward walk; see [`SparseMatrix::rows_from`].
#[derive(Debug)]
pub struct Rows<'m, R, C> {
    matrix: &'m SparseMatrix<R, C>,
    cur: NodeKey,
}

impl<R, C> Iterator for Rows<'_, R, C> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.matrix.nodes[self.cur].down;

        if self.matrix.is_col_sentinel(next) {
            return None;
        }

        self.cur = next;

        Some(next)
    }
}

/// Lazy rightward walk; see [`SparseMatrix::cols_from`].
#[derive(Debug)]
pub struct Cols<'m, R, C> {
    matrix: &'m SparseMatrix<R, C>,
    cur: NodeKey,
}

impl<R, C> Iterator for Cols<'_, R, C> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.matrix.nodes[self.cur].right;

        if self.matrix.is_row_sentinel(next) {
            return None;
        }

        self.cur = next;

        Some(next)
    }
}
