/// A zero-based rank into the sorted order of an [`OrderedIndex`](crate::OrderedIndex).
///
/// # Examples
///
/// ```
/// use wirecross::{OrderedIndex, Rank};
///
/// let mut index = OrderedIndex::new();
/// index.insert("b").unwrap();
/// index.insert("a").unwrap();
///
/// assert_eq!(index[Rank(0)], "a");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);

/// Outcome of [`OrderedIndex::rank`](crate::OrderedIndex::rank).
///
/// `below` counts keys strictly less than the probe. `exact` tells whether the
/// probe is itself stored, in which case it sits at position `below`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RankQuery {
    pub below: usize,
    pub exact: bool,
}
