//! Construction-time options for the sorted collections.

use crate::error::ListError;

/// Options shared by every collection in this crate.
///
/// The default configuration is unbounded.
///
/// ```rust
/// use lockstep_core::{ConcurrentSortedCollection, HandOverHandList, ListConfig};
///
/// let list = HandOverHandList::with_config(ListConfig::default().with_max_nodes(2)).unwrap();
/// list.insert(1).unwrap();
/// list.insert(2).unwrap();
/// assert!(list.insert(3).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListConfig {
    /// Upper bound on live nodes. Inserts beyond it fail with
    /// `ListError::AllocationFailure`.
    pub max_nodes: Option<usize>,
}

impl ListConfig {
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn validate(&self) -> Result<(), ListError> {
        if self.max_nodes == Some(0) {
            return Err(ListError::InvalidConfig(
                "max_nodes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
