use std::io::Write;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::config::ListConfig;
use crate::data_structures::ConcurrentSortedCollection;
use crate::error::ListError;

/// Sorted collection behind a single lock.
///
/// Every operation, including printing and counting, holds the one lock for
/// its whole duration. Readers therefore always see a consistent snapshot,
/// at the cost of serializing all threads. Used as the baseline that
/// `HandOverHandList` is measured against.
///
#[derive(Debug, Default)]
pub struct CoarseLockedList {
    values: Mutex<Vec<i32>>,
    max_nodes: Option<usize>,
}

impl CoarseLockedList {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConcurrentSortedCollection for CoarseLockedList {
    fn with_config(config: ListConfig) -> Result<Self, ListError> {
        config.validate()?;
        debug!(max_nodes = ?config.max_nodes, "created coarse-locked list");
        Ok(CoarseLockedList {
            values: Mutex::new(Vec::new()),
            max_nodes: config.max_nodes,
        })
    }

    fn insert(&self, value: i32) -> Result<(), ListError> {
        let mut values = self.values.lock();
        if let Some(limit) = self.max_nodes.filter(|&limit| values.len() >= limit) {
            let err = ListError::AllocationFailure { limit };
            warn!(value, %err, "insert rejected");
            return Err(err);
        }

        // Before the first element >= value, same tie-break as the linked list.
        let position = values.partition_point(|&existing| existing < value);
        values.insert(position, value);
        trace!(value, position, "inserted");
        Ok(())
    }

    fn remove(&self, value: i32) -> bool {
        let mut values = self.values.lock();
        let position = values.partition_point(|&existing| existing < value);
        if values.get(position) == Some(&value) {
            values.remove(position);
            trace!(value, position, "removed");
            true
        } else {
            trace!(value, "not found");
            false
        }
    }

    fn count_matching<P>(&self, predicate: P) -> usize
    where
        P: Fn(i32) -> bool,
    {
        self.values
            .lock()
            .iter()
            .filter(|&&value| predicate(value))
            .count()
    }

    fn write_all<W>(&self, sink: &mut W) -> Result<(), ListError>
    where
        W: Write,
    {
        let values = self.values.lock();
        for value in values.iter() {
            write!(sink, "{value} ")?;
        }
        writeln!(sink)?;
        Ok(())
    }

    fn to_vec(&self) -> Vec<i32> {
        self.values.lock().clone()
    }

    fn len(&self) -> usize {
        self.values.lock().len()
    }
}
