//! Shared test helpers for retry tests.

#![allow(dead_code)]

use carekit_types::{EventSink, TelemetryEvent};
use std::fmt;
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

/// Error returned by the scripted operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flaky(pub &'static str);

impl fmt::Display for Flaky {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "flaky: {}", self.0)
    }
}

/// Sink that keeps every event for later assertions.
#[derive(Default)]
pub struct CollectingSink {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl CollectingSink {
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, event: &TelemetryEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Records the instant of every call made to a scripted operation.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Instant>>>,
}

impl CallLog {
    /// Records a call and returns how many calls have happened, this one included.
    pub fn record(&self) -> usize {
        let mut calls = self.calls.lock().unwrap();
        calls.push(Instant::now());
        calls.len()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Time between consecutive calls.
    pub fn gaps(&self) -> Vec<std::time::Duration> {
        let calls = self.calls.lock().unwrap();
        calls.windows(2).map(|w| w[1] - w[0]).collect()
    }
}
