//! Internal implementation details.
//!
//! The coupling cursor and node budget are pub(crate); the collection trait
//! is public so tests and benchmarks can be generic over implementations.

pub(crate) mod coupling;
pub(crate) mod node_budget;
pub mod sorted_collection;

pub(crate) use coupling::{CouplingCursor, Link, Step};
pub(crate) use node_budget::NodeBudget;
pub use sorted_collection::ConcurrentSortedCollection;
