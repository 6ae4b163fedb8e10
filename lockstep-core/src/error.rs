//! Errors reported by the sorted collections.
//!
//! Only conditions a caller can act on are errors. Removing a value that is
//! not present, or traversing an empty list, are normal outcomes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListError {
    /// Node storage could not be obtained. The list is left unchanged.
    #[error("node storage exhausted: limit of {limit} nodes reached")]
    AllocationFailure { limit: usize },

    /// Configuration rejected at construction time.
    #[error("invalid list configuration: {0}")]
    InvalidConfig(String),

    /// The output sink failed while printing.
    #[error("failed to write list contents")]
    Io(#[from] std::io::Error),
}

impl ListError {
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, ListError::AllocationFailure { .. })
    }
}
