use core::cmp::Ordering;

use crate::segment::{Segment, SegmentId};

/// Position of a key among keys with the same y coordinate.
///
/// Variant order is the sort order: `Low` sorts before every segment and
/// `High` after every segment.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Tiebreak {
    /// Lower bound of a range query.
    Low,
    /// A stored horizontal segment.
    Segment(SegmentId),
    /// Upper bound of a range query.
    High,
}

/// Key of the active set: a y coordinate, then a [`Tiebreak`].
///
/// Coordinates are compared with [`f64::total_cmp`], so the ordering is total.
/// [`Segment::new`] rules out NaN and negative zero, under which `total_cmp`
/// agrees with `==`.
#[derive(Clone, Copy, Debug)]
pub struct IndexKey {
    order: f64,
    tiebreak: Tiebreak,
}

impl IndexKey {
    /// The key under which a horizontal segment is stored while active.
    #[must_use]
    pub fn for_segment(segment: &Segment) -> Self {
        IndexKey {
            order: segment.y1(),
            tiebreak: Tiebreak::Segment(segment.id()),
        }
    }

    /// A query bound below every stored key at `order`.
    #[must_use]
    pub fn low(order: f64) -> Self {
        IndexKey {
            order,
            tiebreak: Tiebreak::Low,
        }
    }

    /// A query bound above every stored key at `order`.
    #[must_use]
    pub fn high(order: f64) -> Self {
        IndexKey {
            order,
            tiebreak: Tiebreak::High,
        }
    }

    #[must_use]
    pub fn order(&self) -> f64 {
        self.order
    }

    #[must_use]
    pub fn tiebreak(&self) -> Tiebreak {
        self.tiebreak
    }

    /// The stored segment, or `None` for a query bound.
    #[must_use]
    pub fn segment(&self) -> Option<SegmentId> {
        match self.tiebreak {
            Tiebreak::Segment(id) => Some(id),
            Tiebreak::Low | Tiebreak::High => None,
        }
    }
}

impl Ord for IndexKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order.total_cmp(&other.order).then(self.tiebreak.cmp(&other.tiebreak))
    }
}

impl PartialOrd for IndexKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for IndexKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for IndexKey {}
