//! Merge error types.

use std::fmt;
use thiserror::Error;

/// Result type for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;

/// Which input collection a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Base,
    Priority,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Base => f.write_str("base"),
            Side::Priority => f.write_str("priority"),
        }
    }
}

/// Errors that can occur while merging JSON records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// The record is not an object, lacks the id field, or its id is not a string or integer.
    #[error("{side} record #{index} has no usable `{field}`")]
    MissingId {
        side: Side,
        index: usize,
        field: String,
    },
}
