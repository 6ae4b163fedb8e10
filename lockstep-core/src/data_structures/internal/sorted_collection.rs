use std::io::{self, Write};

use crate::config::ListConfig;
use crate::error::ListError;

/// A thread-safe collection of integers kept in ascending order.
///
/// # Design
///
/// Implementations differ only in how they lock:
///
/// ```text
/// HandOverHandList   - head lock + one lock per node, lock coupling
/// CoarseLockedList   - one lock around the whole collection
/// ```
///
/// Duplicates are allowed. A new value is placed immediately before the
/// first element that is greater than or equal to it, and `remove` takes
/// out only the first matching element.
///
pub trait ConcurrentSortedCollection: Send + Sync {
    /// Create an empty collection with the given configuration.
    ///
    fn with_config(config: ListConfig) -> Result<Self, ListError>
    where
        Self: Sized;

    /// Insert a value at its sorted position.
    ///
    /// Fails only when node storage cannot be obtained, in which case the
    /// collection is left unchanged.
    ///
    fn insert(&self, value: i32) -> Result<(), ListError>;

    /// Remove the first element equal to `value`.
    ///
    /// Returns `true` if an element was removed, `false` if none matched.
    ///
    fn remove(&self, value: i32) -> bool;

    /// Count elements for which `predicate` holds.
    ///
    /// `predicate` must not call back into the collection.
    ///
    fn count_matching<P>(&self, predicate: P) -> usize
    where
        P: Fn(i32) -> bool;

    /// Write every value followed by a space, then a line break.
    ///
    fn write_all<W>(&self, sink: &mut W) -> Result<(), ListError>
    where
        W: Write;

    /// Collects all values into a Vec.
    ///
    fn to_vec(&self) -> Vec<i32>;

    /// Number of elements currently stored.
    ///
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Print the collection to standard output.
    ///
    fn print_all(&self) -> Result<(), ListError> {
        let stdout = io::stdout();
        let mut sink = stdout.lock();
        self.write_all(&mut sink)?;
        sink.flush()?;
        Ok(())
    }

    /// Count matching elements and report the result on `sink`.
    ///
    fn report_count<P, W>(&self, predicate: P, sink: &mut W) -> Result<usize, ListError>
    where
        P: Fn(i32) -> bool,
        W: Write,
    {
        let count = self.count_matching(predicate);
        writeln!(sink, "{count} items were counted")?;
        Ok(count)
    }
}
