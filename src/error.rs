//! Error taxonomy for tree operations

use thiserror::Error;

/// Errors surfaced by [`GeneralTree`](crate::GeneralTree) and its handles.
///
/// Every failing call leaves the tree exactly as it was before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The operation needs a live node and got a null (or stale) handle.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// The request is structurally impossible (root siblings, second root, cycles).
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),
}

impl TreeError {
    /// True for [`TreeError::InvalidState`]
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, TreeError::InvalidState(_))
    }

    /// True for [`TreeError::InvalidOperation`]
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, TreeError::InvalidOperation(_))
    }
}

/// Result alias used throughout the crate.
pub type TreeResult<T> = Result<T, TreeError>;
