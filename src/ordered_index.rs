use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

use crate::error::IndexError;
use crate::observer::IndexObserver;
use crate::raw::{InOrder, RawAvlTree};

mod capacity;
mod order_statistic;

/// An ordered set of unique keys backed by an AVL tree whose nodes also cache
/// their subtree size.
///
/// The size augmentation turns rank, select and range-count queries into a
/// single root-to-leaf walk, so [`count_in_range`](OrderedIndex::count_in_range)
/// costs O(log n) however many keys fall inside the range.
///
/// Nodes live in an arena and are linked by index. Rebalancing walks
/// iteratively from the mutated node to the root; nothing recurses.
///
/// An optional observer `O` is told about every successful mutation and
/// query (see [`IndexObserver`]). The default `()` observes nothing.
///
/// It is a logic error for a key to be modified in such a way that its
/// ordering relative to any other key changes while it is in the index.
///
/// # Examples
///
/// ```
/// use wirecross::{IndexError, OrderedIndex};
///
/// let mut index = OrderedIndex::new();
/// for key in [40, 10, 30, 20] {
///     index.insert(key).unwrap();
/// }
///
/// assert_eq!(index.insert(30), Err(IndexError::DuplicateKey));
/// assert_eq!(index.count_in_range(&15, &35), 2);
/// assert_eq!(index.list_in_range(&15, &35), [20, 30]);
///
/// assert_eq!(index.remove(&10), Ok(10));
/// assert_eq!(index.remove(&10), Err(IndexError::NotFound));
/// ```
pub struct OrderedIndex<K, O = ()> {
    tree: RawAvlTree<K>,
    observer: O,
}

/// An iterator over the keys of an `OrderedIndex`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`OrderedIndex`].
///
/// [`iter`]: OrderedIndex::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K: 'a> {
    inner: InOrder<'a, K>,
}

impl<K> OrderedIndex<K> {
    /// Makes a new, empty, unobserved index.
    ///
    /// # Examples
    ///
    /// ```
    /// use wirecross::OrderedIndex;
    ///
    /// let index: OrderedIndex<i32> = OrderedIndex::new();
    /// assert!(index.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_observer(())
    }
}

impl<K, O> OrderedIndex<K, O> {
    /// Makes a new, empty index reporting to `observer`.
    pub const fn with_observer(observer: O) -> Self {
        OrderedIndex {
            tree: RawAvlTree::new(),
            observer,
        }
    }

    /// Returns the number of keys in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the index holds no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Height of the underlying tree; 0 when empty, 1 for a single key.
    #[must_use]
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Removes every key. The observer is not notified.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the smallest key.
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.tree.first()
    }

    /// Returns the largest key.
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.tree.last()
    }

    /// Iterates over the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use wirecross::OrderedIndex;
    ///
    /// let mut index = OrderedIndex::new();
    /// for key in [3, 1, 2] {
    ///     index.insert(key).unwrap();
    /// }
    /// assert_eq!(index.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter { inner: self.tree.iter() }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Drops the index and hands back its observer.
    pub fn into_observer(self) -> O {
        self.observer
    }
}

impl<K: Ord, O: IndexObserver<K>> OrderedIndex<K, O> {
    /// Adds `key` to the index.
    ///
    /// # Errors
    ///
    /// [`IndexError::DuplicateKey`] if an equal key is already present; the
    /// index is left unchanged.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K) -> Result<(), IndexError> {
        let handle = self.tree.insert(key)?;
        self.observer.inserted(self.tree.key(handle));
        Ok(())
    }

    /// Removes `key` from the index and returns the stored key.
    ///
    /// # Errors
    ///
    /// [`IndexError::NotFound`] if no equal key is present, including when
    /// the index is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, key: &Q) -> Result<K, IndexError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let removed = self.tree.remove(key)?;
        self.observer.removed(&removed);
        Ok(removed)
    }

    /// Returns the stored key equal to `key`.
    ///
    /// # Errors
    ///
    /// [`IndexError::EmptyIndex`] on an empty index, [`IndexError::NotFound`]
    /// if the key is absent.
    pub fn find<Q>(&self, key: &Q) -> Result<&K, IndexError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.find(key)
    }

    /// Returns `true` if an equal key is present.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.search(key).is_some()
    }
}

impl<K: fmt::Debug, O> fmt::Debug for OrderedIndex<K, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Clone, O: Clone> Clone for OrderedIndex<K, O> {
    fn clone(&self) -> Self {
        OrderedIndex {
            tree: self.tree.clone(),
            observer: self.observer.clone(),
        }
    }
}

impl<K> Default for OrderedIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, O> IntoIterator for &'a OrderedIndex<K, O> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<K: Ord> FromIterator<K> for OrderedIndex<K> {
    /// Builds an index from `iter`, keeping the first of any equal keys.
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut index = OrderedIndex::new();
        for key in iter {
            let _ = index.insert(key);
        }
        index
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for Iter<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.clone()).finish()
    }
}
