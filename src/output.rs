//! Verifier results and their plain-text form.

use std::collections::BTreeSet;
use std::collections::btree_set;
use std::io::{self, Write};

use crate::segment::Segment;

/// An unordered pair of crossing wires, stored with the names in
/// lexicographic order so that `{a, b}` and `{b, a}` compare equal.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CrossingPair {
    first: String,
    second: String,
}

impl CrossingPair {
    #[must_use]
    pub fn new(a: &str, b: &str) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        CrossingPair {
            first: first.to_owned(),
            second: second.to_owned(),
        }
    }

    #[must_use]
    pub fn first(&self) -> &str {
        &self.first
    }

    #[must_use]
    pub fn second(&self) -> &str {
        &self.second
    }
}

/// The crossing pairs found by [`CrossingVerifier::list_crossings`](crate::CrossingVerifier::list_crossings).
///
/// # Examples
///
/// ```
/// use wirecross::{CrossingVerifier, Layout};
///
/// let layout = Layout::parse("wire b 0 0 10 0\nwire a 5 -5 5 5\ndone").unwrap();
/// let crossings = CrossingVerifier::new(&layout).list_crossings().unwrap();
///
/// let mut out = Vec::new();
/// crossings.write_to(&mut out).unwrap();
/// assert_eq!(out, b"a b\n");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CrossingSet {
    pairs: BTreeSet<CrossingPair>,
}

impl CrossingSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `a` and `b` cross. Returns `false` if the pair was
    /// already recorded, in either order.
    pub fn insert(&mut self, a: &Segment, b: &Segment) -> bool {
        self.pairs.insert(CrossingPair::new(a.name(), b.name()))
    }

    #[must_use]
    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.pairs.contains(&CrossingPair::new(a, b))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in ascending order.
    pub fn iter(&self) -> btree_set::Iter<'_, CrossingPair> {
        self.pairs.iter()
    }

    /// Writes one `"<first> <second>"` line per pair, pairs in ascending order.
    ///
    /// # Errors
    ///
    /// Any error from `w`.
    pub fn write_to(&self, mut w: impl Write) -> io::Result<()> {
        for pair in &self.pairs {
            writeln!(w, "{} {}", pair.first, pair.second)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a CrossingSet {
    type Item = &'a CrossingPair;
    type IntoIter = btree_set::Iter<'a, CrossingPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Writes a crossing count as a decimal line.
///
/// # Errors
///
/// Any error from `w`.
pub fn write_count(mut w: impl Write, count: usize) -> io::Result<()> {
    writeln!(w, "{count}")
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn pairs_are_unordered() {
        assert_eq!(CrossingPair::new("y", "x"), CrossingPair::new("x", "y"));
        assert_eq!(CrossingPair::new("y", "x").first(), "x");
    }

    #[test]
    fn set_deduplicates_and_sorts() {
        let h1 = Segment::new("h1", 0.0, 0.0, 4.0, 0.0).unwrap();
        let h2 = Segment::new("h2", 0.0, 1.0, 4.0, 1.0).unwrap();
        let v = Segment::new("v", 2.0, -1.0, 2.0, 2.0).unwrap();

        let mut set = CrossingSet::new();
        assert!(set.insert(&v, &h2));
        assert!(set.insert(&v, &h1));
        assert!(!set.insert(&h1, &v));
        assert_eq!(set.len(), 2);
        assert!(set.contains("v", "h1"));

        let mut out = Vec::new();
        set.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "h1 v\nh2 v\n");
    }

    #[test]
    fn count_is_a_line() {
        let mut out = Vec::new();
        write_count(&mut out, 42).unwrap();
        assert_eq!(out, b"42\n");
    }
}
