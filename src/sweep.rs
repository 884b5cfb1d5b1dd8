//! The left-to-right sweep that finds crossings between horizontal and
//! vertical wires.
//!
//! Horizontal wires enter an [`OrderedIndex`](crate::OrderedIndex) keyed by
//! their y coordinate while the sweep line is inside their x-extent. Each
//! vertical wire is then a single range query over that index.

mod event_queue;
mod key;
mod verifier;

pub use event_queue::{EventKind, SweepEvent, SweepEventQueue};
pub use key::{IndexKey, Tiebreak};
pub use verifier::CrossingVerifier;
