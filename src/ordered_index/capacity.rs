use super::OrderedIndex;
use crate::raw::RawAvlTree;

impl<K> OrderedIndex<K> {
    /// Creates an empty index with room for at least `capacity` keys before
    /// its node arena reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use wirecross::OrderedIndex;
    ///
    /// let index: OrderedIndex<i32> = OrderedIndex::with_capacity(16);
    /// assert!(index.is_empty());
    /// assert!(index.capacity() >= 16);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_observer(capacity, ())
    }
}

impl<K, O> OrderedIndex<K, O> {
    /// Creates an empty index reporting to `observer`, with room for at least
    /// `capacity` keys.
    pub fn with_capacity_and_observer(capacity: usize, observer: O) -> Self {
        OrderedIndex {
            tree: RawAvlTree::with_capacity(capacity),
            observer,
        }
    }

    /// Number of keys the index can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }
}
