use core::cmp::Ordering;

use crate::segment::{Orientation, Segment};

/// What happens when the sweep line reaches an event.
///
/// Declaration order is the processing order at equal x: a vertical wire
/// through a horizontal wire's endpoint sees that horizontal wire as active.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum EventKind {
    /// A horizontal wire starts.
    Activate,
    /// A vertical wire is checked against the active set.
    Query,
    /// A horizontal wire ends.
    Deactivate,
}

#[derive(Clone, Copy, Debug)]
pub struct SweepEvent<'a> {
    pub x: f64,
    pub kind: EventKind,
    pub segment: &'a Segment,
}

impl Ord for SweepEvent<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then(self.kind.cmp(&other.kind))
            .then(self.segment.id().cmp(&other.segment.id()))
    }
}

impl PartialOrd for SweepEvent<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SweepEvent<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SweepEvent<'_> {}

/// The sorted events of one sweep: two per horizontal wire, one per vertical.
#[derive(Clone, Debug, Default)]
pub struct SweepEventQueue<'a> {
    events: Vec<SweepEvent<'a>>,
}

impl<'a> SweepEventQueue<'a> {
    /// Extracts and sorts the events of `segments`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wirecross::{EventKind, Layout, SweepEventQueue};
    ///
    /// let layout = Layout::parse("wire h 0 0 10 0\nwire v 10 -1 10 1\ndone").unwrap();
    /// let queue = SweepEventQueue::new(layout.segments());
    /// let kinds: Vec<EventKind> = queue.iter().map(|e| e.kind).collect();
    /// assert_eq!(kinds, [EventKind::Activate, EventKind::Query, EventKind::Deactivate]);
    /// ```
    pub fn new(segments: impl IntoIterator<Item = &'a Segment>) -> Self {
        let mut events = Vec::new();
        for segment in segments {
            match segment.orientation() {
                Orientation::Horizontal => {
                    events.push(SweepEvent {
                        x: segment.x1(),
                        kind: EventKind::Activate,
                        segment,
                    });
                    events.push(SweepEvent {
                        x: segment.x2(),
                        kind: EventKind::Deactivate,
                        segment,
                    });
                }
                Orientation::Vertical => events.push(SweepEvent {
                    x: segment.x1(),
                    kind: EventKind::Query,
                    segment,
                }),
            }
        }
        events.sort_unstable();
        SweepEventQueue { events }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of horizontal wires, i.e. the most keys the active set can hold.
    #[must_use]
    pub fn horizontal_count(&self) -> usize {
        self.events.iter().filter(|e| e.kind == EventKind::Activate).count()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, SweepEvent<'a>> {
        self.events.iter()
    }
}

impl<'q, 'a> IntoIterator for &'q SweepEventQueue<'a> {
    type Item = &'q SweepEvent<'a>;
    type IntoIter = core::slice::Iter<'q, SweepEvent<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
