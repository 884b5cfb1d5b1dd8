use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::{Handle, Link};
use super::node::{AvlNode, Side};
use super::size::Size;
use crate::RankQuery;
use crate::error::IndexError;

/// Traversal stack. A tree whose height exceeds the inline capacity holds
/// well over a million keys, so the spill is rare.
type Stack = SmallVec<[Handle; 32]>;

/// The core AVL tree backing `OrderedIndex`.
#[derive(Clone, Debug)]
pub(crate) struct RawAvlTree<K> {
    /// Arena storing all tree nodes.
    nodes: Arena<AvlNode<K>>,
    /// Root holder. `None` is the empty tree and the end of every upward walk.
    root: Link,
}

impl<K> RawAvlTree<K> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` keys.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Number of keys in the tree.
    pub(crate) fn len(&self) -> usize {
        self.size(self.root).to_usize()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the whole tree; 0 when empty.
    pub(crate) fn height(&self) -> usize {
        usize::from(self.height_of(self.root))
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) fn first(&self) -> Option<&K> {
        self.root.map(|root| self.nodes.get(self.extreme(root, Side::Left)).key())
    }

    pub(crate) fn last(&self) -> Option<&K> {
        self.root.map(|root| self.nodes.get(self.extreme(root, Side::Right)).key())
    }

    /// Returns the key at zero-based sorted position `rank`.
    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<&K> {
        let mut remaining = rank;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let left_size = self.size(node.left()).to_usize();
            match remaining.cmp(&left_size) {
                Less => current = node.left(),
                Equal => return Some(node.key()),
                Greater => {
                    remaining -= left_size + 1;
                    current = node.right();
                }
            }
        }

        None
    }

    /// Ascending in-order iterator over all keys.
    pub(crate) fn iter(&self) -> InOrder<'_, K> {
        let mut iter = InOrder {
            tree: self,
            stack: Stack::new(),
            remaining: self.len(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    #[inline]
    pub(crate) fn key(&self, handle: Handle) -> &K {
        self.nodes.get(handle).key()
    }

    #[inline]
    fn height_of(&self, link: Link) -> u8 {
        link.map_or(0, |h| self.nodes.get(h).height())
    }

    #[inline]
    fn size(&self, link: Link) -> Size {
        link.map_or(Size::ZERO, |h| self.nodes.get(h).size())
    }

    /// Follows `side` links from `handle` until the last node on that side.
    fn extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(next) = self.nodes.get(handle).child(side) {
            handle = next;
        }
        handle
    }

    /// Recomputes the cached height and size of `handle` from its children.
    fn refresh(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let (left, right) = (node.left(), node.right());
        let left = (self.height_of(left), self.size(left));
        let right = (self.height_of(right), self.size(right));
        self.nodes.get_mut(handle).refresh(left, right);
    }

    /// Puts `new` where `old` hangs from its parent (or the root holder).
    fn replace_child(&mut self, parent: Link, old: Handle, new: Link) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let parent_node = self.nodes.get_mut(p);
                let side = parent_node
                    .side_of(old)
                    .expect("`RawAvlTree::replace_child()` - `old` is not a child of `parent`!");
                parent_node.set_child(side, new);
            }
        }
    }

    /// Replaces the subtree rooted at `old` with `new`, fixing `new`'s parent link.
    fn transplant(&mut self, old: Handle, new: Link) {
        let parent = self.nodes.get(old).parent();
        if let Some(n) = new {
            self.nodes.get_mut(n).set_parent(parent);
        }
        self.replace_child(parent, old, new);
    }

    /// Lifts the child of `x` on side `up` into `x`'s position.
    ///
    /// `up == Side::Right` is a left rotation, `up == Side::Left` a right
    /// rotation. Returns the new subtree root with both touched nodes
    /// refreshed.
    fn rotate(&mut self, x: Handle, up: Side) -> Handle {
        let y = self.nodes.get(x).child(up).expect("`RawAvlTree::rotate()` - no child to lift!");
        let inner = self.nodes.get(y).child(up.opposite());
        let parent = self.nodes.get(x).parent();

        self.nodes.get_mut(x).set_child(up, inner);
        if let Some(b) = inner {
            self.nodes.get_mut(b).set_parent(Some(x));
        }

        self.nodes.get_mut(y).set_child(up.opposite(), Some(x));
        self.nodes.get_mut(x).set_parent(Some(y));

        self.nodes.get_mut(y).set_parent(parent);
        self.replace_child(parent, x, Some(y));

        self.refresh(x);
        self.refresh(y);
        y
    }

    /// Restores the AVL balance at `handle`, whose caches must be current.
    /// Returns the root of the (possibly rotated) subtree.
    fn rebalance(&mut self, handle: Handle) -> Handle {
        let node = self.nodes.get(handle);
        let left = self.height_of(node.left());
        let right = self.height_of(node.right());

        let heavy = if left > right + 1 {
            Side::Left
        } else if right > left + 1 {
            Side::Right
        } else {
            return handle;
        };

        let child = node.child(heavy).expect("`RawAvlTree::rebalance()` - heavy side is empty!");
        let child_node = self.nodes.get(child);
        if self.height_of(child_node.child(heavy.opposite())) > self.height_of(child_node.child(heavy)) {
            // Zig-zag: straighten the child first.
            self.rotate(child, heavy.opposite());
        }
        self.rotate(handle, heavy)
    }

    /// Walks from `start` to the root, refreshing caches and rebalancing.
    fn retrace(&mut self, start: Link) {
        let mut current = start;
        while let Some(handle) = current {
            self.refresh(handle);
            let top = self.rebalance(handle);
            current = self.nodes.get(top).parent();
        }
    }
}

impl<K: Ord> RawAvlTree<K> {
    /// Finds the node holding `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(node.key().borrow()) {
                Less => node.left(),
                Greater => node.right(),
                Equal => return Some(handle),
            };
        }
        None
    }

    pub(crate) fn find<Q>(&self, key: &Q) -> Result<&K, IndexError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.is_empty() {
            return Err(IndexError::EmptyIndex);
        }
        self.search(key).map(|h| self.nodes.get(h).key()).ok_or(IndexError::NotFound)
    }

    /// Inserts `key` at a leaf and rebalances the path back to the root.
    /// Returns the new node, whose handle stays valid until it is removed.
    pub(crate) fn insert(&mut self, key: K) -> Result<Handle, IndexError> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            side = match key.cmp(node.key()) {
                Less => Side::Left,
                Greater => Side::Right,
                Equal => return Err(IndexError::DuplicateKey),
            };
            parent = Some(handle);
            current = node.child(side);
        }

        let leaf = self.nodes.alloc(AvlNode::leaf(key, parent));
        match parent {
            None => self.root = Some(leaf),
            Some(p) => self.nodes.get_mut(p).set_child(side, Some(leaf)),
        }
        self.retrace(parent);
        Ok(leaf)
    }

    /// Removes `key`, returning it.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Result<K, IndexError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let target = self.search(key).ok_or(IndexError::NotFound)?;
        let node = self.nodes.get(target);
        let (left, right, parent) = (node.left(), node.right(), node.parent());

        let start = match (left, right) {
            (_, None) => {
                self.transplant(target, left);
                parent
            }
            (None, Some(_)) => {
                self.transplant(target, right);
                parent
            }
            (Some(l), Some(r)) => {
                let successor = self.extreme(r, Side::Left);
                let start = if successor == r {
                    // The successor keeps its own right subtree.
                    Some(successor)
                } else {
                    let successor_parent = self
                        .nodes
                        .get(successor)
                        .parent()
                        .expect("`RawAvlTree::remove()` - successor has no parent!");
                    let successor_right = self.nodes.get(successor).right();
                    self.nodes.get_mut(successor_parent).set_left(successor_right);
                    if let Some(sr) = successor_right {
                        self.nodes.get_mut(sr).set_parent(Some(successor_parent));
                    }
                    self.nodes.get_mut(successor).set_right(Some(r));
                    self.nodes.get_mut(r).set_parent(Some(successor));
                    Some(successor_parent)
                };
                self.nodes.get_mut(successor).set_left(Some(l));
                self.nodes.get_mut(l).set_parent(Some(successor));
                self.transplant(target, Some(successor));
                start
            }
        };

        let removed = self.nodes.take(target).into_key();
        if self.root.is_none() {
            self.nodes.clear();
        } else {
            self.retrace(start);
        }
        Ok(removed)
    }

    /// Counts keys strictly below `key` and reports whether `key` is present.
    pub(crate) fn rank<Q>(&self, key: &Q) -> RankQuery
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut below = 0;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match key.cmp(node.key().borrow()) {
                Greater => {
                    below += 1 + self.size(node.left()).to_usize();
                    current = node.right();
                }
                Less => current = node.left(),
                Equal => {
                    below += self.size(node.left()).to_usize();
                    return RankQuery { below, exact: true };
                }
            }
        }

        RankQuery { below, exact: false }
    }

    /// Number of keys `k` with `lo <= k <= hi`.
    pub(crate) fn count_in_range<Q>(&self, lo: &Q, hi: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if lo > hi {
            return 0;
        }
        let high = self.rank(hi);
        let low = self.rank(lo);
        high.below + usize::from(high.exact) - low.below
    }

    /// Keys `k` with `lo <= k <= hi`, ascending.
    pub(crate) fn list_in_range<Q>(&self, lo: &Q, hi: &Q) -> Vec<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut out = Vec::new();
        let mut stack = Stack::new();
        let mut current = self.root;

        loop {
            // Descend, skipping every subtree that lies wholly below `lo`.
            while let Some(handle) = current {
                let node = self.nodes.get(handle);
                let key: &Q = node.key().borrow();
                if key < lo {
                    current = node.right();
                } else {
                    stack.push(handle);
                    current = node.left();
                }
            }

            let Some(handle) = stack.pop() else { break };
            let node = self.nodes.get(handle);
            let key: &Q = node.key().borrow();
            if key > hi {
                break;
            }
            out.push(node.key());
            current = node.right();
        }

        out
    }
}

/// In-order walk over a `RawAvlTree`.
pub(crate) struct InOrder<'a, K> {
    tree: &'a RawAvlTree<K>,
    stack: Stack,
    remaining: usize,
}

impl<K> Clone for InOrder<'_, K> {
    fn clone(&self) -> Self {
        InOrder {
            tree: self.tree,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K> InOrder<'_, K> {
    fn push_left_spine(&mut self, mut link: Link) {
        while let Some(handle) = link {
            self.stack.push(handle);
            link = self.tree.nodes.get(handle).left();
        }
    }
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.stack.pop()?;
        let node = self.tree.nodes.get(handle);
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some(node.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for InOrder<'_, K> {}

impl<K> core::iter::FusedIterator for InOrder<'_, K> {}

#[cfg(test)]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use alloc::string::String;
    use proptest::prelude::*;

    impl<K: Ord + core::fmt::Debug> RawAvlTree<K> {
        /// Checks BST order, AVL balance, the height/size caches and the
        /// parent links. Panics listing every violation found.
        pub(crate) fn validate_invariants(&self) {
            let mut errors: Vec<String> = Vec::new();

            if let Some(root) = self.root
                && self.nodes.get(root).parent().is_some()
            {
                errors.push(alloc::format!("root {root:?} has a parent"));
            }

            let (_, size) = self.validate_node(self.root, None, None, &mut errors);
            if size != self.nodes.len() {
                errors.push(alloc::format!(
                    "reachable nodes ({size}) differ from live arena slots ({})",
                    self.nodes.len()
                ));
            }

            assert!(errors.is_empty(), "Tree invariant violations:\n{}", errors.join("\n"));
        }

        /// Returns (height, size) of the subtree, recomputed from scratch.
        fn validate_node(&self, link: Link, lower: Option<&K>, upper: Option<&K>, errors: &mut Vec<String>) -> (u8, usize) {
            let Some(handle) = link else { return (0, 0) };
            let node = self.nodes.get(handle);

            if lower.is_some_and(|lower| node.key() <= lower) || upper.is_some_and(|upper| node.key() >= upper) {
                errors.push(alloc::format!("key {:?} at {handle:?} breaks BST order", node.key()));
            }

            for child in [node.left(), node.right()].into_iter().flatten() {
                if self.nodes.get(child).parent() != Some(handle) {
                    errors.push(alloc::format!("child {child:?} does not point back to {handle:?}"));
                }
            }

            let (left_height, left_size) = self.validate_node(node.left(), lower, Some(node.key()), errors);
            let (right_height, right_size) = self.validate_node(node.right(), Some(node.key()), upper, errors);

            if left_height.abs_diff(right_height) > 1 {
                errors.push(alloc::format!(
                    "node {handle:?} unbalanced: left height {left_height}, right height {right_height}"
                ));
            }

            let height = 1 + left_height.max(right_height);
            let size = 1 + left_size + right_size;
            if node.height() != height {
                errors.push(alloc::format!("node {handle:?} caches height {}, actual {height}", node.height()));
            }
            if node.size().to_usize() != size {
                errors.push(alloc::format!("node {handle:?} caches size {}, actual {size}", node.size().to_usize()));
            }

            (height, size)
        }
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32),
        Remove(i32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0i32..1000).prop_map(Op::Insert),
            2 => (0i32..1000).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn tree_invariants_maintained_after_operations(ops in prop::collection::vec(op_strategy(), 0..500)) {
            let mut tree: RawAvlTree<i32> = RawAvlTree::new();
            let mut model: BTreeSet<i32> = BTreeSet::new();

            for op in ops {
                match op {
                    Op::Insert(key) => {
                        let expected = if model.insert(key) { Ok(key) } else { Err(IndexError::DuplicateKey) };
                        prop_assert_eq!(tree.insert(key).map(|h| *tree.key(h)), expected);
                    }
                    Op::Remove(key) => {
                        let expected = if model.remove(&key) { Ok(key) } else { Err(IndexError::NotFound) };
                        prop_assert_eq!(tree.remove(&key), expected);
                    }
                }
                tree.validate_invariants();
                prop_assert_eq!(tree.len(), model.len());
            }

            let keys: Vec<i32> = tree.iter().copied().collect();
            let expected: Vec<i32> = model.into_iter().collect();
            prop_assert_eq!(keys, expected);
        }

        #[test]
        fn count_agrees_with_list(
            keys in prop::collection::vec(0i32..400, 0..200),
            lo in 0i32..400,
            width in 0i32..200,
        ) {
            let mut tree: RawAvlTree<i32> = RawAvlTree::new();
            for key in keys {
                let _ = tree.insert(key);
            }
            let hi = lo + width;

            let listed: Vec<i32> = tree.list_in_range(&lo, &hi).into_iter().copied().collect();
            let expected: Vec<i32> = tree.iter().copied().filter(|k| (lo..=hi).contains(k)).collect();
            prop_assert_eq!(&listed, &expected);
            prop_assert_eq!(tree.count_in_range(&lo, &hi), listed.len());
        }

        #[test]
        fn rank_and_select_agree(keys in prop::collection::vec(0i32..500, 1..200)) {
            let mut tree: RawAvlTree<i32> = RawAvlTree::new();
            for key in keys {
                let _ = tree.insert(key);
            }

            for (position, key) in tree.iter().enumerate() {
                prop_assert_eq!(tree.rank(key), RankQuery { below: position, exact: true });
                prop_assert_eq!(tree.get_by_rank(position), Some(key));
            }
            prop_assert!(tree.get_by_rank(tree.len()).is_none());
        }
    }

    #[test]
    fn ascending_inserts_stay_logarithmic() {
        let mut tree: RawAvlTree<i32> = RawAvlTree::new();
        for key in 0..1023 {
            tree.insert(key).unwrap();
        }
        tree.validate_invariants();
        // A perfect tree of 1023 nodes has height 10; AVL allows at most 1.44x.
        assert!(tree.height() <= 14, "height {}", tree.height());
    }

    #[test]
    fn each_rotation_case_rebalances() {
        for keys in [[3, 2, 1], [1, 2, 3], [3, 1, 2], [1, 3, 2]] {
            let mut tree: RawAvlTree<i32> = RawAvlTree::new();
            for key in keys {
                tree.insert(key).unwrap();
            }
            tree.validate_invariants();
            assert_eq!(tree.height(), 2, "insertion order {keys:?}");
            assert_eq!(tree.root.map(|r| *tree.nodes.get(r).key()), Some(2));
        }
    }

    #[test]
    fn remove_each_shape() {
        let mut tree: RawAvlTree<i32> = RawAvlTree::new();
        for key in [50, 30, 70, 20, 40, 60, 80, 35, 45, 65] {
            tree.insert(key).unwrap();
        }
        tree.validate_invariants();

        // Leaf, single child, successor is the right child, successor deeper.
        for key in [20, 60, 70, 30, 50] {
            assert_eq!(tree.remove(&key), Ok(key));
            tree.validate_invariants();
            assert!(tree.search(&key).is_none());
        }
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [35, 40, 45, 65, 80]);
    }

    #[test]
    fn removing_last_key_empties_tree() {
        let mut tree: RawAvlTree<i32> = RawAvlTree::new();
        tree.insert(1).unwrap();
        assert_eq!(tree.remove(&1), Ok(1));
        assert!(tree.is_empty());
        assert_eq!(tree.nodes.len(), 0);
        tree.validate_invariants();
        assert_eq!(tree.remove(&1), Err(IndexError::NotFound));
    }

    #[test]
    fn exact_bounds_are_counted_once() {
        let mut tree: RawAvlTree<i32> = RawAvlTree::new();
        for key in [10, 20, 30, 40] {
            tree.insert(key).unwrap();
        }
        assert_eq!(tree.count_in_range(&20, &30), 2);
        assert_eq!(tree.count_in_range(&20, &20), 1);
        assert_eq!(tree.count_in_range(&15, &30), 2);
        assert_eq!(tree.count_in_range(&20, &35), 2);
        assert_eq!(tree.count_in_range(&0, &100), 4);
        assert_eq!(tree.count_in_range(&30, &20), 0);
    }

    #[test]
    fn find_distinguishes_empty_from_missing() {
        let mut tree: RawAvlTree<i32> = RawAvlTree::new();
        assert_eq!(tree.find(&1), Err(IndexError::EmptyIndex));
        tree.insert(2).unwrap();
        assert_eq!(tree.find(&1), Err(IndexError::NotFound));
        assert_eq!(tree.find(&2), Ok(&2));
    }
}
