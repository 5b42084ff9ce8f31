//! Shared type definitions for carekit.
//!
//! This crate defines the small set of types the utility crates agree on:
//! - Record identifiers ([`RecordId`]) as they appear in fetched and drafted rows
//! - Telemetry events and the [`EventSink`] trait components report through
//!
//! Nothing here knows about pages, stores or the identity provider.

mod ids;
mod telemetry;

pub use ids::RecordId;
pub use telemetry::{EventSink, NoopSink, TelemetryEvent, TracingSink};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid record id: {0}")]
    InvalidId(String),
}
