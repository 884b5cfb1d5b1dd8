//! Hooks for watching the index and the sweep.
//!
//! Every hook has an empty default body and `()` implements both traits, so an
//! unobserved index or verifier pays nothing. Hooks fire after an operation
//! succeeds and cannot change its result.

use crate::segment::Segment;
use crate::sweep::IndexKey;

/// Receives the mutations and queries of an [`OrderedIndex`](crate::OrderedIndex).
pub trait IndexObserver<K> {
    /// `key` was inserted.
    fn inserted(&mut self, _key: &K) {}

    /// `key` was removed.
    fn removed(&mut self, _key: &K) {}

    /// A range listing over `[lo, hi]` returned `keys`.
    fn listed(&mut self, _lo: &K, _hi: &K, _keys: &[K]) {}

    /// A range count over `[lo, hi]` returned `count`.
    fn counted(&mut self, _lo: &K, _hi: &K, _count: usize) {}
}

impl<K> IndexObserver<K> for () {}

/// Receives the progress of a [`CrossingVerifier`](crate::CrossingVerifier),
/// on top of the operations on its active set.
pub trait SweepObserver: IndexObserver<IndexKey> {
    /// The sweep line moved to `x` (reported before every event).
    fn sweep_moved(&mut self, _x: f64) {}

    /// `vertical` and `horizontal` were recorded as a crossing pair.
    fn crossing_found(&mut self, _vertical: &Segment, _horizontal: &Segment) {}
}

impl SweepObserver for () {}
