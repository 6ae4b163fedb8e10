use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::ListConfig;
use crate::error::ListError;

/// Live node counter with an optional upper bound.
///
/// A slot is reserved before a node is allocated and released after the
/// node is unlinked, so a failed reservation never leaves a partial insert.
#[derive(Debug)]
pub(crate) struct NodeBudget {
    live: AtomicUsize,
    limit: Option<usize>,
}

impl NodeBudget {
    pub(crate) fn new(config: &ListConfig) -> Self {
        NodeBudget {
            live: AtomicUsize::new(0),
            limit: config.max_nodes,
        }
    }

    pub(crate) fn reserve(&self) -> Result<(), ListError> {
        let Some(limit) = self.limit else {
            self.live.fetch_add(1, Ordering::AcqRel);
            return Ok(());
        };

        self.live
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |live| {
                (live < limit).then_some(live + 1)
            })
            .map(|_| ())
            .map_err(|_| ListError::AllocationFailure { limit })
    }

    pub(crate) fn release(&self) {
        self.live.fetch_sub(1, Ordering::AcqRel);
    }

    pub(crate) fn reset(&self) {
        self.live.store(0, Ordering::Release);
    }

    pub(crate) fn live(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }
}
