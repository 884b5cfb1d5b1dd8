//! A recording observer that feeds the layout visualizer.
//!
//! The recorded run is written as a JSONP script, `onJsonp(<json>);`, whose
//! payload holds the layer's wires and the trace events in order.

use std::collections::HashMap;
use std::io::{self, Write};

use serde::Serialize;

use crate::layout::Layout;
use crate::observer::{IndexObserver, SweepObserver};
use crate::segment::{Segment, SegmentId};
use crate::sweep::IndexKey;

/// One step of a recorded sweep. Wires are named by their layout name.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TraceEvent {
    Add { id: String },
    Delete { id: String },
    List { from: f64, to: f64, ids: Vec<String> },
    Count { from: f64, to: f64, count: usize },
    Crossing { id1: String, id2: String },
    Sweep { x: f64 },
}

/// Records every observable step of an index or a sweep over one layout.
///
/// # Examples
///
/// ```
/// use wirecross::{CrossingVerifier, Layout, TraceEvent, TraceRecorder};
///
/// let layout = Layout::parse("wire h 0 0 10 0\nwire v 5 -5 5 5\ndone").unwrap();
/// let mut verifier = CrossingVerifier::with_observer(&layout, TraceRecorder::new(&layout));
/// verifier.list_crossings().unwrap();
///
/// let recorder = verifier.into_observer();
/// assert_eq!(recorder.events()[0], TraceEvent::Sweep { x: 0.0 });
/// assert_eq!(recorder.events()[1], TraceEvent::Add { id: "h".into() });
/// ```
#[derive(Clone, Debug, Default)]
pub struct TraceRecorder {
    names: HashMap<SegmentId, String>,
    events: Vec<TraceEvent>,
}

impl TraceRecorder {
    #[must_use]
    pub fn new(layout: &Layout) -> Self {
        TraceRecorder {
            names: layout.segments().iter().map(|s| (s.id(), s.name().to_owned())).collect(),
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
    }

    fn name(&self, key: &IndexKey) -> String {
        key.segment()
            .and_then(|id| self.names.get(&id))
            .cloned()
            .unwrap_or_default()
    }
}

impl IndexObserver<IndexKey> for TraceRecorder {
    fn inserted(&mut self, key: &IndexKey) {
        let id = self.name(key);
        self.events.push(TraceEvent::Add { id });
    }

    fn removed(&mut self, key: &IndexKey) {
        let id = self.name(key);
        self.events.push(TraceEvent::Delete { id });
    }

    fn listed(&mut self, lo: &IndexKey, hi: &IndexKey, keys: &[IndexKey]) {
        let ids = keys.iter().map(|k| self.name(k)).collect();
        self.events.push(TraceEvent::List {
            from: lo.order(),
            to: hi.order(),
            ids,
        });
    }

    fn counted(&mut self, lo: &IndexKey, hi: &IndexKey, count: usize) {
        self.events.push(TraceEvent::Count {
            from: lo.order(),
            to: hi.order(),
            count,
        });
    }
}

impl SweepObserver for TraceRecorder {
    fn sweep_moved(&mut self, x: f64) {
        self.events.push(TraceEvent::Sweep { x });
    }

    fn crossing_found(&mut self, vertical: &Segment, horizontal: &Segment) {
        self.events.push(TraceEvent::Crossing {
            id1: vertical.name().to_owned(),
            id2: horizontal.name().to_owned(),
        });
    }
}

#[derive(Serialize)]
struct Wire<'a> {
    id: &'a str,
    x: [f64; 2],
    y: [f64; 2],
}

#[derive(Serialize)]
struct Layer<'a> {
    wires: Vec<Wire<'a>>,
}

/// The document handed to the visualizer.
#[derive(Serialize)]
pub struct TracePayload<'a> {
    layer: Layer<'a>,
    trace: &'a [TraceEvent],
}

impl<'a> TracePayload<'a> {
    #[must_use]
    pub fn new(layout: &'a Layout, trace: &'a [TraceEvent]) -> Self {
        let wires = layout
            .segments()
            .iter()
            .map(|s| Wire {
                id: s.name(),
                x: [s.x1(), s.x2()],
                y: [s.y1(), s.y2()],
            })
            .collect();
        TracePayload {
            layer: Layer { wires },
            trace,
        }
    }
}

/// Writes `payload` as `onJsonp(<json>);` followed by a newline.
///
/// # Errors
///
/// Any error from `w`.
pub fn write_jsonp(mut w: impl Write, payload: &TracePayload<'_>) -> io::Result<()> {
    w.write_all(b"onJsonp(")?;
    serde_json::to_writer(&mut w, payload)?;
    w.write_all(b");\n")
}
