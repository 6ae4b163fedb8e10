//! Concurrent sorted collections.
//!
//! # Organization
//!
//! - [`sorted`] - Sorted integer lists (HandOverHandList, CoarseLockedList)
//! - `internal` - Lock coupling, node budget, shared collection trait

pub(crate) mod internal;
pub mod sorted;

pub use internal::ConcurrentSortedCollection;
pub use sorted::CoarseLockedList;
pub use sorted::HandOverHandList;
