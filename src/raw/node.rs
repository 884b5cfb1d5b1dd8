use super::handle::{Handle, Link};
use super::size::Size;

/// A node of the AVL tree.
///
/// `height` and `size` are caches over the subtree rooted here and are
/// refreshed by [`RawAvlTree`](super::RawAvlTree) whenever a child link
/// changes. `parent` is a back-reference for upward walks only; the arena owns
/// every node.
#[derive(Clone, Debug)]
pub(crate) struct AvlNode<K> {
    key: K,
    left: Link,
    right: Link,
    parent: Link,
    // AVL height is below 1.45 * log2(n + 2), so it fits a byte for any arena.
    height: u8,
    size: Size,
}

impl<K> AvlNode<K> {
    /// Creates a detached leaf.
    pub(crate) fn leaf(key: K, parent: Link) -> Self {
        Self {
            key,
            left: None,
            right: None,
            parent,
            height: 1,
            size: Size::ONE,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn into_key(self) -> K {
        self.key
    }

    #[inline]
    pub(crate) fn left(&self) -> Link {
        self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> Link {
        self.right
    }

    #[inline]
    pub(crate) fn parent(&self) -> Link {
        self.parent
    }

    pub(crate) fn set_left(&mut self, left: Link) {
        self.left = left;
    }

    pub(crate) fn set_right(&mut self, right: Link) {
        self.right = right;
    }

    pub(crate) fn set_parent(&mut self, parent: Link) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub(crate) fn size(&self) -> Size {
        self.size
    }

    /// Refreshes both caches from the children's values.
    pub(crate) fn refresh(&mut self, left: (u8, Size), right: (u8, Size)) {
        self.height = 1 + left.0.max(right.0);
        self.size = Size::joining(left.1, right.1);
    }

    /// Returns the child on the requested side.
    #[inline]
    pub(crate) fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Link) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Which side of this node `child` hangs on, if any.
    pub(crate) fn side_of(&self, child: Handle) -> Option<Side> {
        if self.left == Some(child) {
            Some(Side::Left)
        } else if self.right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// One of a node's two children.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
