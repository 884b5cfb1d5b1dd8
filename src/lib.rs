//! Crossing checks for axis-aligned wire layouts, built on a rank-augmented
//! AVL index.
//!
//! The crate has two layers:
//!
//! - [`OrderedIndex`], an AVL tree whose nodes cache their subtree size. Besides
//!   insert, remove and lookup it answers "how many keys lie in `[lo, hi]`" in
//!   O(log n) and lists them in O(log n + k).
//! - [`CrossingVerifier`], a left-to-right sweep over a [`Layout`] that keeps the
//!   horizontal wires under the sweep line in an `OrderedIndex` and answers each
//!   vertical wire with a range query.
//!
//! # Example
//!
//! ```
//! use wirecross::{CrossingVerifier, Layout};
//!
//! let layout = Layout::parse(
//!     "wire h0 0 0 10 0
//!      wire h1 0 1 10 1
//!      wire h2 0 2 10 2
//!      wire v 5 0 5 2
//!      done",
//! )
//! .unwrap();
//!
//! assert_eq!(CrossingVerifier::new(&layout).count_crossings(), Ok(3));
//!
//! let pairs = CrossingVerifier::new(&layout).list_crossings().unwrap();
//! assert!(pairs.contains("h1", "v"));
//! ```
//!
//! # Observing a run
//!
//! The index and the verifier take an optional observer ([`IndexObserver`],
//! [`SweepObserver`]). [`TraceRecorder`] is the observer behind the binary's
//! `jsonp` output.

#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
// Axis checks compare normalized coordinates exactly. Panics only guard arena invariants.
#![allow(clippy::float_cmp)]
#![allow(clippy::missing_panics_doc)]

extern crate alloc;

mod error;
mod layout;
mod observer;
mod order_statistic;
mod output;
mod raw;
mod segment;
mod sweep;
mod trace;

pub mod ordered_index;

pub use error::{IndexError, LayoutError, VerifyError};
pub use layout::Layout;
pub use observer::{IndexObserver, SweepObserver};
pub use order_statistic::{Rank, RankQuery};
pub use ordered_index::OrderedIndex;
pub use output::{CrossingPair, CrossingSet, write_count};
pub use segment::{Orientation, Segment, SegmentId};
pub use sweep::{CrossingVerifier, EventKind, IndexKey, SweepEvent, SweepEventQueue, Tiebreak};
pub use trace::{TraceEvent, TracePayload, TraceRecorder, write_jsonp};
