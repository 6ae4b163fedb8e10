//! Reusable test bodies, generic over `ConcurrentSortedCollection`.
//!
//! Integration tests instantiate these once per collection type.
