//! Matrix nodes

use slotmap::new_key_type;

new_key_type! {
    /// Key identifying a node in a matrix arena.
    pub struct NodeKey;
}

/// The payload slot of a node.
///
/// Sentinels carry an index into the matrix's row or column payload
/// table; the header and interior entries carry nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Datum {
    None,
    Row(usize),
    Col(usize),
}

/// One node of the four-way linked lattice.
///
/// Every node carries the same six links regardless of role. Roles are
/// told apart structurally, by which links point back at the node
/// itself, never by a tag field.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Node {
    pub up: NodeKey,
    pub down: NodeKey,
    pub left: NodeKey,
    pub right: NodeKey,
    pub row: NodeKey,
    pub col: NodeKey,
    pub datum: Datum,
}

impl Node {
    /// A node linked only to itself in every direction.
    pub fn isolated(key: NodeKey, datum: Datum) -> Self {
        Self {
            up: key,
            down: key,
            left: key,
            right: key,
            row: key,
            col: key,
            datum,
        }
    }
}
