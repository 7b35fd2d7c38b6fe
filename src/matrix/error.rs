//! Matrix errors

use thiserror::Error;

/// Errors raised by matrix iteration and enumeration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
    /// The anchor node does not belong to this matrix.
    #[error("node does not belong to this matrix")]
    ForeignNode,
}
