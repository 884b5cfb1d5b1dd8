use alloc::vec::Vec;
use core::borrow::Borrow;
use core::ops::Index;

use super::OrderedIndex;
use crate::observer::IndexObserver;
use crate::{Rank, RankQuery};

impl<K: Ord, O: IndexObserver<K>> OrderedIndex<K, O> {
    /// Counts the keys `k` with `lo <= k <= hi`.
    ///
    /// The count is derived from two rank walks, so it never visits the keys
    /// it counts. Bounds need not be present in the index; a bound that is
    /// present is counted once. Returns 0 when `lo > hi`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wirecross::OrderedIndex;
    ///
    /// let mut index: OrderedIndex<i32> = [10, 20, 30, 40].into_iter().collect();
    /// assert_eq!(index.count_in_range(&20, &30), 2);
    /// assert_eq!(index.count_in_range(&21, &29), 0);
    /// assert_eq!(index.count_in_range(&30, &20), 0);
    /// ```
    pub fn count_in_range(&mut self, lo: &K, hi: &K) -> usize {
        let count = self.tree.count_in_range(lo, hi);
        self.observer.counted(lo, hi, count);
        count
    }

    /// Returns the keys `k` with `lo <= k <= hi` in ascending order.
    ///
    /// Subtrees lying wholly outside the range are never entered.
    ///
    /// # Complexity
    ///
    /// O(log n + k) for k returned keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use wirecross::OrderedIndex;
    ///
    /// let mut index: OrderedIndex<i32> = [50, 10, 40, 20, 30].into_iter().collect();
    /// assert_eq!(index.list_in_range(&15, &45), [20, 30, 40]);
    /// ```
    pub fn list_in_range(&mut self, lo: &K, hi: &K) -> Vec<K>
    where
        K: Clone,
    {
        let keys: Vec<K> = self.tree.list_in_range(lo, hi).into_iter().cloned().collect();
        self.observer.listed(lo, hi, &keys);
        keys
    }

    /// Reports how many keys are strictly below `key` and whether `key` is
    /// present.
    ///
    /// # Examples
    ///
    /// ```
    /// use wirecross::{OrderedIndex, RankQuery};
    ///
    /// let index: OrderedIndex<i32> = [10, 20, 30].into_iter().collect();
    /// assert_eq!(index.rank(&20), RankQuery { below: 1, exact: true });
    /// assert_eq!(index.rank(&25), RankQuery { below: 2, exact: false });
    /// ```
    #[must_use]
    pub fn rank<Q>(&self, key: &Q) -> RankQuery
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.rank(key)
    }

    /// Returns the zero-based sorted position of `key`, or `None` if the key
    /// is not present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let RankQuery { below, exact } = self.tree.rank(key);
        exact.then_some(below)
    }
}

impl<K, O> OrderedIndex<K, O> {
    /// Returns the key at zero-based sorted position `rank`, or `None` if
    /// `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wirecross::OrderedIndex;
    ///
    /// let index: OrderedIndex<i32> = [30, 10, 20].into_iter().collect();
    /// assert_eq!(index.get_by_rank(1), Some(&20));
    /// assert!(index.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&K> {
        self.tree.get_by_rank(rank)
    }
}

/// Indexes into the index by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
impl<K, O> Index<Rank> for OrderedIndex<K, O> {
    type Output = K;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("index out of bounds")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::{OrderedIndex, Rank};

    #[test]
    fn empty_index_counts_nothing() {
        let mut index: OrderedIndex<i32> = OrderedIndex::new();
        assert_eq!(index.count_in_range(&i32::MIN, &i32::MAX), 0);
        assert!(index.list_in_range(&i32::MIN, &i32::MAX).is_empty());
        assert_eq!(index.rank_of(&0), None);
    }

    #[test]
    fn rank_of_follows_removals() {
        let mut index: OrderedIndex<i32> = (0..20).collect();
        for key in (0..20).step_by(2) {
            index.remove(&key).unwrap();
        }
        for (position, key) in (1..20).step_by(2).enumerate() {
            assert_eq!(index.rank_of(&key), Some(position));
            assert_eq!(index[Rank(position)], key);
        }
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn rank_past_end_panics() {
        let index: OrderedIndex<i32> = (0..3).collect();
        let _ = index[Rank(3)];
    }
}
