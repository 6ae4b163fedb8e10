pub mod common_tests;
pub mod config;
pub mod data_structures;
pub mod error;

pub use config::ListConfig;
pub use data_structures::{CoarseLockedList, ConcurrentSortedCollection, HandOverHandList};
pub use error::ListError;

/*
Task list:

- [x] Hand-over-hand insert/remove
- [x] Coarse-locked baseline for benchmarks
- [ ] Reader-writer node locks for print/count (measure first)

cargo bench --package lockstep-core --bench sorted_collection_benchmark
*/
