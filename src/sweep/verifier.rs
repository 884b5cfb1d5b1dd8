use std::collections::HashMap;

use log::{debug, error, trace};

use super::event_queue::{EventKind, SweepEventQueue};
use super::key::IndexKey;
use crate::error::{IndexError, VerifyError};
use crate::layout::Layout;
use crate::observer::SweepObserver;
use crate::ordered_index::OrderedIndex;
use crate::output::CrossingSet;
use crate::segment::{Segment, SegmentId};

/// Finds the crossings between the horizontal and vertical wires of a layer
/// with one left-to-right sweep.
///
/// The horizontal wires under the sweep line are kept in an [`OrderedIndex`]
/// keyed by y. Each vertical wire is answered with one range query over its
/// y extent, so a run costs O(n log n) plus the size of the listed output.
///
/// Input is a [`Layout`], whose wires have unique names and identities.
///
/// A verifier runs exactly once: whichever of
/// [`count_crossings`](CrossingVerifier::count_crossings) and
/// [`list_crossings`](CrossingVerifier::list_crossings) is called first
/// consumes it.
///
/// # Examples
///
/// ```
/// use wirecross::{CrossingVerifier, Layout, VerifyError};
///
/// let layout = Layout::parse("wire h 0 0 10 0\nwire v 5 -5 5 5\ndone").unwrap();
/// let mut verifier = CrossingVerifier::new(&layout);
///
/// assert_eq!(verifier.count_crossings(), Ok(1));
/// assert_eq!(verifier.count_crossings(), Err(VerifyError::AlreadyConsumed));
/// ```
pub struct CrossingVerifier<'a, O = ()> {
    events: SweepEventQueue<'a>,
    segments: HashMap<SegmentId, &'a Segment>,
    index: OrderedIndex<IndexKey, O>,
    consumed: bool,
}

/// The active set and the wires it refers to, as seen by a query step.
struct Active<'v, 'a, O> {
    index: &'v mut OrderedIndex<IndexKey, O>,
    segments: &'v HashMap<SegmentId, &'a Segment>,
}

impl<'a> CrossingVerifier<'a> {
    #[must_use]
    pub fn new(layout: &'a Layout) -> Self {
        Self::with_observer(layout, ())
    }
}

impl<'a, O: SweepObserver> CrossingVerifier<'a, O> {
    /// Makes a verifier whose sweep and active set report to `observer`.
    pub fn with_observer(layout: &'a Layout, observer: O) -> Self {
        let segments = layout.segments();
        let events = SweepEventQueue::new(segments);
        let index = OrderedIndex::with_capacity_and_observer(events.horizontal_count(), observer);
        CrossingVerifier {
            events,
            segments: segments.iter().map(|s| (s.id(), s)).collect(),
            index,
            consumed: false,
        }
    }

    /// Number of events the sweep will process.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Drops the verifier and hands back its observer.
    pub fn into_observer(self) -> O {
        self.index.into_observer()
    }

    /// Counts the crossing (vertical, horizontal) pairs. Touching at an
    /// endpoint counts as crossing.
    ///
    /// # Errors
    ///
    /// [`VerifyError::AlreadyConsumed`] if the verifier has already run;
    /// [`VerifyError::Corrupted`] if the active set rejects an update.
    pub fn count_crossings(&mut self) -> Result<usize, VerifyError> {
        let mut count = 0;
        self.sweep(|active, vertical| {
            let (lo, hi) = query_bounds(vertical);
            count += active.index.count_in_range(&lo, &hi);
            Ok(())
        })?;
        debug!("sweep found {count} crossings");
        Ok(count)
    }

    /// Lists the crossing pairs, each named once.
    ///
    /// # Errors
    ///
    /// As [`count_crossings`](CrossingVerifier::count_crossings).
    pub fn list_crossings(&mut self) -> Result<CrossingSet, VerifyError> {
        let mut crossings = CrossingSet::new();
        self.sweep(|active, vertical| {
            let (lo, hi) = query_bounds(vertical);
            for key in active.index.list_in_range(&lo, &hi) {
                let Some(&horizontal) = key.segment().and_then(|id| active.segments.get(&id)) else {
                    error!("active set holds unknown key {key:?}");
                    return Err(VerifyError::Corrupted(IndexError::NotFound));
                };
                if crossings.insert(vertical, horizontal) {
                    active.index.observer_mut().crossing_found(vertical, horizontal);
                }
            }
            Ok(())
        })?;
        debug!("sweep listed {} crossing pairs", crossings.len());
        Ok(crossings)
    }

    /// Runs the event loop once, handing every vertical wire to `on_query`.
    fn sweep<F>(&mut self, mut on_query: F) -> Result<(), VerifyError>
    where
        F: FnMut(Active<'_, 'a, O>, &'a Segment) -> Result<(), VerifyError>,
    {
        if self.consumed {
            return Err(VerifyError::AlreadyConsumed);
        }
        self.consumed = true;
        debug!("sweeping {} events over {} wires", self.events.len(), self.segments.len());

        for event in &self.events {
            self.index.observer_mut().sweep_moved(event.x);
            trace!("x={} {:?} {}", event.x, event.kind, event.segment);

            match event.kind {
                EventKind::Activate => {
                    self.index
                        .insert(IndexKey::for_segment(event.segment))
                        .map_err(corrupted)?;
                }
                EventKind::Deactivate => {
                    self.index
                        .remove(&IndexKey::for_segment(event.segment))
                        .map_err(corrupted)?;
                }
                EventKind::Query => {
                    let active = Active {
                        index: &mut self.index,
                        segments: &self.segments,
                    };
                    on_query(active, event.segment)?;
                }
            }
        }

        Ok(())
    }
}

/// Range bounds covering every stored key within a vertical wire's y extent.
fn query_bounds(vertical: &Segment) -> (IndexKey, IndexKey) {
    (IndexKey::low(vertical.y1()), IndexKey::high(vertical.y2()))
}

fn corrupted(err: IndexError) -> VerifyError {
    error!("active set rejected a sweep update: {err}");
    VerifyError::Corrupted(err)
}
