use std::convert::Infallible;
use std::fmt;
use std::io::Write;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::config::ListConfig;
use crate::data_structures::ConcurrentSortedCollection;
use crate::data_structures::internal::{CouplingCursor, Link, NodeBudget, Step};
use crate::error::ListError;

///
/// Sorted singly linked list with fine-grained locking: the head link and
/// every node are guarded by their own lock, so operations working on
/// disjoint parts of the list do not contend.
///
// =============================================================================
// LOCKING PROTOCOL
// =============================================================================
//
// List Structure (sorted ascending, duplicates allowed):
// ┌──────┐    ┌──────┐    ┌──────┐    ┌──────┐
// │ HEAD │───►│  10  │───►│  20  │───►│  20  │───► None
// │(lock)│    │(lock)│    │(lock)│    │(lock)│
// └──────┘    └──────┘    └──────┘    └──────┘
//
// Mutators (insert, remove) walk with lock coupling: the lock of the next
// node is taken while the predecessor's lock is still held, then the
// predecessor is released. The window {pred, curr} is always locked when a
// link is rewritten.
//
// INSERT 15 (first node with value >= 15 is 20):
//
//          pred(10) ──────► curr(20)
//          pred(10) ──► 15 ──► curr(20)
//
// REMOVE 20 (first node with value == 20):
//
//          pred(10) ──────► curr(20) ──────► 20
//          pred(10) ─────────────────────► 20
//                           curr(20) ──┘   (still points forward)
//
// Readers (print, count) lock one node at a time: lock, read value and next,
// unlock, advance. They may see a mix of states under concurrent mutation but
// always terminate, since a removed node keeps its forward link and nodes
// are reference counted.
//
// Lock order is always HEAD, then nodes in list order.
//
// =============================================================================
//
pub struct HandOverHandList {
    head: Mutex<Link>,
    budget: NodeBudget,
}

impl HandOverHandList {
    pub fn new() -> Self {
        Self::from_config(&ListConfig::default())
    }

    fn from_config(config: &ListConfig) -> Self {
        debug!(max_nodes = ?config.max_nodes, "created hand-over-hand list");
        HandOverHandList {
            head: Mutex::new(None),
            budget: NodeBudget::new(config),
        }
    }

    /// Tear the list down and reclaim every node.
    ///
    /// Returns the number of nodes reclaimed. Consuming `self` guarantees no
    /// other operation can run on this list concurrently or afterwards.
    ///
    pub fn destroy(mut self) -> usize {
        let reclaimed = self.teardown();
        debug!(reclaimed, "destroyed hand-over-hand list");
        reclaimed
    }

    fn teardown(&mut self) -> usize {
        let mut next = self.head.lock().take();
        let mut reclaimed = 0;

        // Iterative so long chains never recurse through Arc drops.
        while let Some(node) = next {
            next = node.lock().next.take();
            reclaimed += 1;
        }

        self.budget.reset();
        reclaimed
    }

    /// Walk the list one node lock at a time.
    ///
    fn try_for_each_value<F, E>(&self, mut f: F) -> Result<(), E>
    where
        F: FnMut(i32) -> Result<(), E>,
    {
        let mut next = self.head.lock().clone();
        while let Some(node) = next {
            let guard = node.lock();
            f(guard.value)?;
            next = guard.next.clone();
        }
        Ok(())
    }

    fn for_each_value<F>(&self, mut f: F)
    where
        F: FnMut(i32),
    {
        let Ok(()) = self.try_for_each_value::<_, Infallible>(|value| {
            f(value);
            Ok(())
        });
    }
}

impl ConcurrentSortedCollection for HandOverHandList {
    fn with_config(config: ListConfig) -> Result<Self, ListError> {
        config.validate()?;
        Ok(Self::from_config(&config))
    }

    fn insert(&self, value: i32) -> Result<(), ListError> {
        if let Err(err) = self.budget.reserve() {
            warn!(value, %err, "insert rejected");
            return Err(err);
        }

        let mut cursor = CouplingCursor::new(&self.head);
        loop {
            match cursor.step() {
                Step::Visit(current) if current.value >= value => {
                    cursor.link_here(value);
                    drop(current);
                    trace!(value, position = cursor.position(), "inserted before");
                    return Ok(());
                }
                Step::Visit(current) => cursor.advance(current),
                Step::End => {
                    cursor.link_here(value);
                    trace!(value, position = cursor.position(), "appended");
                    return Ok(());
                }
            }
        }
    }

    fn remove(&self, value: i32) -> bool {
        let mut cursor = CouplingCursor::new(&self.head);
        loop {
            match cursor.step() {
                Step::Visit(current) if current.value == value => {
                    let removed = cursor.unlink(current);
                    let position = cursor.position();
                    drop(cursor);
                    drop(removed);
                    self.budget.release();
                    trace!(value, position, "removed");
                    return true;
                }
                // Sorted order: nothing past a greater value can match.
                Step::Visit(current) if current.value > value => {
                    trace!(value, "not found");
                    return false;
                }
                Step::Visit(current) => cursor.advance(current),
                Step::End => {
                    trace!(value, "not found");
                    return false;
                }
            }
        }
    }

    fn count_matching<P>(&self, predicate: P) -> usize
    where
        P: Fn(i32) -> bool,
    {
        let mut count = 0;
        self.for_each_value(|value| {
            if predicate(value) {
                count += 1;
            }
        });
        count
    }

    fn write_all<W>(&self, sink: &mut W) -> Result<(), ListError>
    where
        W: Write,
    {
        self.try_for_each_value(|value| write!(sink, "{value} "))?;
        writeln!(sink)?;
        Ok(())
    }

    fn to_vec(&self) -> Vec<i32> {
        let mut values = Vec::with_capacity(self.len());
        self.for_each_value(|value| values.push(value));
        values
    }

    /// Live node count from the budget counter.
    ///
    /// An insert reserves its slot before it starts walking, so while
    /// inserts are in flight this can run ahead of what a traversal sees.
    /// It is exact whenever no insert or remove is in progress.
    fn len(&self) -> usize {
        self.budget.live()
    }
}

impl Default for HandOverHandList {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for HandOverHandList {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for HandOverHandList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandOverHandList")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
