//! Identifier type for keyed records.
//!
//! Rows coming back from the list store carry either a text id or an
//! integer id. Both forms are kept distinct: `"1"` and `1` are different ids.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Unique identifier of a record within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Integer id, as used by numbered list items.
    Number(i64),
    /// Text id (GUIDs, composite keys).
    Text(String),
}

impl RecordId {
    /// Reads an id out of a JSON value.
    ///
    /// Only strings and integers representable as `i64` qualify.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => n.as_i64().map(Self::Number),
            _ => None,
        }
    }

    /// Reads the id stored under `field` of a JSON object record.
    #[must_use]
    pub fn from_field(record: &Value, field: &str) -> Option<Self> {
        record.as_object()?.get(field).and_then(Self::from_json)
    }

    /// Returns the text form if this is a text id.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    /// Returns the integer form if this is a numeric id.
    #[must_use]
    pub const fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl TryFrom<&Value> for RecordId {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        Self::from_json(value).ok_or_else(|| Error::InvalidId(value.to_string()))
    }
}
