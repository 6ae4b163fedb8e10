//! Sorted integer collections.
//!
//! Both collections keep values in ascending order, accept duplicates and
//! expose the same [`ConcurrentSortedCollection`](super::ConcurrentSortedCollection)
//! API. They differ only in locking granularity:
//!
//! - `HandOverHandList`: one lock for the head plus one lock per node
//! - `CoarseLockedList`: a single lock around the whole collection

pub mod coarse_locked_list;
pub mod hand_over_hand_list;

pub use coarse_locked_list::CoarseLockedList;
pub use hand_over_hand_list::HandOverHandList;
