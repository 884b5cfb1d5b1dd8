//! Error types for the index, the sweep and layout parsing.

use std::io;
use std::num::ParseFloatError;

/// Contract violations reported by [`OrderedIndex`](crate::OrderedIndex).
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum IndexError {
    /// `insert` was given a key that is already present.
    #[error("key is already present in the index")]
    DuplicateKey,
    /// `remove` or `find` was given a key that is not present.
    #[error("key is not present in the index")]
    NotFound,
    /// `find` was called on an index with no keys.
    #[error("index is empty")]
    EmptyIndex,
}

/// Failures of a [`CrossingVerifier`](crate::CrossingVerifier) run.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum VerifyError {
    /// The verifier's single sweep has already been run.
    #[error("crossing verifier has already been consumed")]
    AlreadyConsumed,
    /// The active set rejected an activate/deactivate pairing. This means the
    /// event queue or the index is broken, not that the input is bad.
    #[error("active set invariant violated during sweep")]
    Corrupted(#[source] IndexError),
}

/// Malformed wire layouts.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("wire {name} is neither horizontal nor vertical")]
    NotAxisAligned { name: String },

    #[error("wire {name} has zero length")]
    Degenerate { name: String },

    #[error("wire {name} has a non-finite coordinate")]
    NonFiniteCoordinate { name: String },

    #[error("wire name {name} is not unique")]
    DuplicateName { name: String },

    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: expected {expected} fields after `wire`, found {found}")]
    FieldCount { line: usize, expected: usize, found: usize },

    #[error("line {line}: `{token}` is not a number")]
    InvalidNumber {
        line: usize,
        token: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("failed to read layout")]
    Io(#[from] io::Error),
}
