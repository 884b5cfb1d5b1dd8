//! Axis-aligned wire segments.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::error::LayoutError;

/// Creation-order identity of a [`Segment`]. Only used to break ties.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SegmentId(pub u64);

impl SegmentId {
    /// Hands out the next identity. Strictly increasing for the whole process.
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        SegmentId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// An immutable horizontal or vertical wire.
///
/// Endpoints are normalized so that `x1 <= x2` and `y1 <= y2`.
#[derive(Debug, PartialEq)]
pub struct Segment {
    id: SegmentId,
    name: String,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl Segment {
    /// Builds a segment between `(x1, y1)` and `(x2, y2)`.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::NonFiniteCoordinate`] for NaN or infinite input.
    /// - [`LayoutError::Degenerate`] if both endpoints coincide.
    /// - [`LayoutError::NotAxisAligned`] if the segment is diagonal.
    ///
    /// # Examples
    ///
    /// ```
    /// use wirecross::{Orientation, Segment};
    ///
    /// let wire = Segment::new("a", 10.0, 3.0, 2.0, 3.0).unwrap();
    /// assert_eq!(wire.orientation(), Orientation::Horizontal);
    /// assert_eq!((wire.x1(), wire.x2()), (2.0, 10.0));
    ///
    /// assert!(Segment::new("b", 0.0, 0.0, 1.0, 1.0).is_err());
    /// ```
    pub fn new(name: impl Into<String>, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, LayoutError> {
        let name = name.into();
        if ![x1, y1, x2, y2].iter().all(|c| c.is_finite()) {
            return Err(LayoutError::NonFiniteCoordinate { name });
        }

        // Adding zero turns -0.0 into 0.0 so that the total order used by the
        // index agrees with `==`.
        let (x1, x2) = (x1.min(x2) + 0.0, x1.max(x2) + 0.0);
        let (y1, y2) = (y1.min(y2) + 0.0, y1.max(y2) + 0.0);

        match (y1 == y2, x1 == x2) {
            (true, true) => return Err(LayoutError::Degenerate { name }),
            (false, false) => return Err(LayoutError::NotAxisAligned { name }),
            _ => {}
        }

        Ok(Segment {
            id: SegmentId::next(),
            name,
            x1,
            y1,
            x2,
            y2,
        })
    }

    #[must_use]
    pub fn id(&self) -> SegmentId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn x1(&self) -> f64 {
        self.x1
    }

    #[must_use]
    pub fn y1(&self) -> f64 {
        self.y1
    }

    #[must_use]
    pub fn x2(&self) -> f64 {
        self.x2
    }

    #[must_use]
    pub fn y2(&self) -> f64 {
        self.y2
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        if self.y1 == self.y2 {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        self.orientation() == Orientation::Horizontal
    }

    #[must_use]
    pub fn is_vertical(&self) -> bool {
        self.orientation() == Orientation::Vertical
    }

    /// Direct geometric test: `true` if one segment is horizontal, the other
    /// vertical, and they share a point (endpoints included).
    ///
    /// The sweep never calls this; it is the brute-force reference the sweep
    /// must agree with.
    #[must_use]
    pub fn crosses(&self, other: &Segment) -> bool {
        let (h, v) = match (self.orientation(), other.orientation()) {
            (Orientation::Horizontal, Orientation::Vertical) => (self, other),
            (Orientation::Vertical, Orientation::Horizontal) => (other, self),
            _ => return false,
        };
        v.y1 <= h.y1 && h.y1 <= v.y2 && h.x1 <= v.x1 && v.x1 <= h.x2
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<wire {} ({},{})-({},{})>", self.name, self.x1, self.y1, self.x2, self.y2)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use static_assertions::assert_not_impl_any;

    // A copy would share the original's identity.
    assert_not_impl_any!(Segment: Clone);

    #[test]
    fn endpoints_are_normalized() {
        let wire = Segment::new("v", 4.0, 9.0, 4.0, -1.0).unwrap();
        assert!(wire.is_vertical());
        assert_eq!((wire.y1(), wire.y2()), (-1.0, 9.0));
    }

    #[test]
    fn ids_increase_with_creation() {
        let a = Segment::new("a", 0.0, 0.0, 1.0, 0.0).unwrap();
        let b = Segment::new("b", 0.0, 0.0, 1.0, 0.0).unwrap();
        assert!(a.id() < b.id());
    }

    #[test]
    fn rejects_bad_geometry() {
        assert!(matches!(Segment::new("d", 0.0, 0.0, 2.0, 1.0), Err(LayoutError::NotAxisAligned { .. })));
        assert!(matches!(Segment::new("p", 3.0, 3.0, 3.0, 3.0), Err(LayoutError::Degenerate { .. })));
        assert!(matches!(
            Segment::new("n", f64::NAN, 0.0, 1.0, 0.0),
            Err(LayoutError::NonFiniteCoordinate { .. })
        ));
    }

    #[test]
    fn negative_zero_is_normalized() {
        let wire = Segment::new("z", -0.0, -0.0, 5.0, -0.0).unwrap();
        assert!(wire.y1().is_sign_positive());
        assert!(wire.x1().is_sign_positive());
    }

    #[test]
    fn crossing_includes_endpoints() {
        let h = Segment::new("h", 0.0, 0.0, 10.0, 0.0).unwrap();
        let touching = Segment::new("t", 10.0, 0.0, 10.0, 5.0).unwrap();
        let apart = Segment::new("a", 11.0, -1.0, 11.0, 1.0).unwrap();
        let parallel = Segment::new("p", 0.0, 1.0, 10.0, 1.0).unwrap();

        assert!(h.crosses(&touching));
        assert!(touching.crosses(&h));
        assert!(!h.crosses(&apart));
        assert!(!h.crosses(&parallel));
    }

    #[test]
    fn display_names_the_wire() {
        let wire = Segment::new("w1", 0.0, 2.0, 3.0, 2.0).unwrap();
        assert_eq!(wire.to_string(), "<wire w1 (0,2)-(3,2)>");
    }
}
