//! Telemetry events and the sinks that receive them.
//!
//! Components that report progress take an `Arc<dyn EventSink>` at
//! construction time. There is no global emitter to configure.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// A structured progress event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// An attempt failed and another one is scheduled after `delay_ms`.
    RetryScheduled {
        label: String,
        /// 1-based number of the attempt that failed.
        attempt: u32,
        delay_ms: u64,
        error: String,
    },

    /// An attempt succeeded.
    AttemptSucceeded { label: String, attempt: u32 },

    /// Every allowed attempt failed.
    RetriesExhausted {
        label: String,
        attempts: u32,
        error: String,
    },

    /// The caller cancelled before the run finished.
    Cancelled { label: String, attempts: u32 },
}

impl TelemetryEvent {
    /// Label of the operation this event belongs to.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::RetryScheduled { label, .. }
            | Self::AttemptSucceeded { label, .. }
            | Self::RetriesExhausted { label, .. }
            | Self::Cancelled { label, .. } => label,
        }
    }
}

impl fmt::Display for TelemetryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RetryScheduled {
                label,
                attempt,
                delay_ms,
                error,
            } => write!(
                f,
                "{label}: attempt {attempt} failed ({error}), retrying in {delay_ms}ms"
            ),
            Self::AttemptSucceeded { label, attempt } => {
                write!(f, "{label}: succeeded on attempt {attempt}")
            }
            Self::RetriesExhausted {
                label,
                attempts,
                error,
            } => write!(f, "{label}: gave up after {attempts} attempts ({error})"),
            Self::Cancelled { label, attempts } => {
                write!(f, "{label}: cancelled after {attempts} attempts")
            }
        }
    }
}

/// Receiver of telemetry events.
pub trait EventSink: Send + Sync {
    /// Delivers one event. Must not block.
    fn emit(&self, event: &TelemetryEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &TelemetryEvent) {
        match event {
            TelemetryEvent::RetryScheduled { .. } => warn!("{}", event),
            TelemetryEvent::AttemptSucceeded { attempt, .. } if *attempt > 1 => {
                info!("{}", event)
            }
            TelemetryEvent::AttemptSucceeded { .. } => debug!("{}", event),
            TelemetryEvent::RetriesExhausted { .. } => warn!("{}", event),
            TelemetryEvent::Cancelled { .. } => info!("{}", event),
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: &TelemetryEvent) {}
}
