//! Wire layouts and their line-oriented text format.
//!
//! ```text
//! wire <name> <x1> <y1> <x2> <y2>
//! ...
//! done
//! ```

use std::collections::HashMap;
use std::io::BufRead;

use log::{debug, warn};

use crate::error::LayoutError;
use crate::segment::Segment;

/// One layer of wires, in insertion order, with unique names.
#[derive(Debug, Default)]
pub struct Layout {
    segments: Vec<Segment>,
    by_name: HashMap<String, usize>,
}

impl Layout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a wire.
    ///
    /// # Errors
    ///
    /// [`LayoutError::DuplicateName`] if `name` is taken, or any error of
    /// [`Segment::new`].
    pub fn add_wire(&mut self, name: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<&Segment, LayoutError> {
        if self.by_name.contains_key(name) {
            return Err(LayoutError::DuplicateName { name: name.to_owned() });
        }
        let segment = Segment::new(name, x1, y1, x2, y2)?;
        let position = self.segments.len();
        self.by_name.insert(segment.name().to_owned(), position);
        self.segments.push(segment);
        Ok(&self.segments[position])
    }

    /// Parses a layout from text.
    ///
    /// # Errors
    ///
    /// Any [`LayoutError`]; parse errors carry the 1-based line number.
    ///
    /// # Examples
    ///
    /// ```
    /// use wirecross::Layout;
    ///
    /// let layout = Layout::parse("wire a 0 0 10 0\nwire b 5 -5 5 5\ndone\n").unwrap();
    /// assert_eq!(layout.len(), 2);
    /// assert!(layout.get("b").unwrap().is_vertical());
    /// ```
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        Self::from_lines(text.lines().map(Ok))
    }

    /// Parses a layout from a reader, stopping at the `done` line.
    ///
    /// # Errors
    ///
    /// Any [`LayoutError`], including [`LayoutError::Io`] for read failures.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, LayoutError> {
        Self::from_lines(reader.lines())
    }

    fn from_lines<S: AsRef<str>>(lines: impl Iterator<Item = std::io::Result<S>>) -> Result<Self, LayoutError> {
        let mut layout = Layout::new();

        for (number, line) in lines.enumerate() {
            let line = line?;
            let number = number + 1;
            let mut fields = line.as_ref().split_whitespace();

            match fields.next() {
                None => {}
                Some("done") => {
                    debug!("parsed {} wires", layout.len());
                    return Ok(layout);
                }
                Some("wire") => {
                    let fields: Vec<&str> = fields.collect();
                    let &[name, x1, y1, x2, y2] = fields.as_slice() else {
                        return Err(LayoutError::FieldCount {
                            line: number,
                            expected: 5,
                            found: fields.len(),
                        });
                    };
                    let x1 = parse_coordinate(number, x1)?;
                    let y1 = parse_coordinate(number, y1)?;
                    let x2 = parse_coordinate(number, x2)?;
                    let y2 = parse_coordinate(number, y2)?;
                    layout.add_wire(name, x1, y1, x2, y2)?;
                }
                Some(command) => {
                    return Err(LayoutError::UnknownCommand {
                        line: number,
                        command: command.to_owned(),
                    });
                }
            }
        }

        warn!("layout ended without `done` after {} wires", layout.len());
        Ok(layout)
    }

    /// The wires, in the order they were added.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Segment> {
        self.by_name.get(name).map(|&i| &self.segments[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

fn parse_coordinate(line: usize, token: &str) -> Result<f64, LayoutError> {
    token.parse().map_err(|source| LayoutError::InvalidNumber {
        line,
        token: token.to_owned(),
        source,
    })
}
