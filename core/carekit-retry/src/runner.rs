//! The retry loop.

use crate::{RetryError, RetryOptions, RetryResult};
use carekit_types::{EventSink, TelemetryEvent, TracingSink};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Runs an operation with the plain contract: the last error comes back unchanged.
///
/// The error type must implement `Display` because its text is carried in the
/// `RetryScheduled` and `RetriesExhausted` telemetry events.
pub async fn retry<T, E, F, Fut>(options: RetryOptions, operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    RetryRunner::new(options).run(operation).await
}

/// Retries async operations according to a fixed [`RetryOptions`].
///
/// The runner holds no per-call state, so one instance can be shared behind
/// an `Arc` and driven from several tasks at once.
#[derive(Clone)]
pub struct RetryRunner {
    options: RetryOptions,
    sink: Arc<dyn EventSink>,
}

impl RetryRunner {
    /// Creates a runner reporting through [`TracingSink`].
    pub fn new(options: RetryOptions) -> Self {
        Self::with_sink(options, Arc::new(TracingSink))
    }

    /// Creates a runner reporting through a caller-supplied sink.
    pub fn with_sink(options: RetryOptions, sink: Arc<dyn EventSink>) -> Self {
        Self { options, sink }
    }

    /// Returns the configured options.
    pub fn options(&self) -> &RetryOptions {
        &self.options
    }

    /// Attempts `operation` until it succeeds or attempts run out.
    ///
    /// Invalid delays are clamped rather than rejected; use
    /// [`run_cancellable`](Self::run_cancellable) to have them reported.
    ///
    /// `E: Display` is required because each failure's text is reported to the
    /// sink in [`TelemetryEvent`] payloads.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        if let Err(e) = self.options.validate() {
            warn!("{}: {}, clamping", self.options.label, e);
        }
        let options = self.options.sanitized();
        let max_attempts = options.max_attempts();
        let mut attempt: u32 = 0;

        loop {
            attempt = attempt.saturating_add(1);
            match operation().await {
                Ok(value) => {
                    self.succeeded(attempt);
                    return Ok(value);
                }
                Err(e) if attempt >= max_attempts => {
                    self.exhausted(attempt, &e);
                    return Err(e);
                }
                Err(e) => {
                    let delay = self.scheduled(&options, attempt, &e);
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Like [`run`](Self::run), but stops early once `token` is cancelled.
    ///
    /// The token is checked before every attempt and races every backoff
    /// wait. An attempt already in flight is allowed to finish.
    /// As with [`run`](Self::run), failures are rendered with `Display` for the
    /// sink.
    pub async fn run_cancellable<T, E, F, Fut>(
        &self,
        token: &CancellationToken,
        mut operation: F,
    ) -> RetryResult<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.options.validate()?;
        let max_attempts = self.options.max_attempts();
        let mut attempt: u32 = 0;

        loop {
            if token.is_cancelled() {
                return Err(self.cancelled(attempt));
            }

            attempt = attempt.saturating_add(1);
            match operation().await {
                Ok(value) => {
                    self.succeeded(attempt);
                    return Ok(value);
                }
                Err(e) if attempt >= max_attempts => {
                    self.exhausted(attempt, &e);
                    return Err(RetryError::Exhausted(e));
                }
                Err(e) => {
                    let delay = self.scheduled(&self.options, attempt, &e);
                    tokio::select! {
                        biased;
                        () = token.cancelled() => return Err(self.cancelled(attempt)),
                        () = tokio::time::sleep(delay) => {}
                    }
                }
            }
        }
    }

    fn succeeded(&self, attempt: u32) {
        self.sink.emit(&TelemetryEvent::AttemptSucceeded {
            label: self.options.label.clone(),
            attempt,
        });
    }

    fn exhausted<E: Display>(&self, attempts: u32, error: &E) {
        self.sink.emit(&TelemetryEvent::RetriesExhausted {
            label: self.options.label.clone(),
            attempts,
            error: error.to_string(),
        });
    }

    fn scheduled<E: Display>(&self, options: &RetryOptions, attempt: u32, error: &E) -> Duration {
        let delay = options.delay_for(attempt.saturating_sub(1));
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        debug!(attempt, delay_ms, "backing off");
        self.sink.emit(&TelemetryEvent::RetryScheduled {
            label: options.label.clone(),
            attempt,
            delay_ms,
            error: error.to_string(),
        });
        delay
    }

    fn cancelled<E>(&self, attempts: u32) -> RetryError<E> {
        self.sink.emit(&TelemetryEvent::Cancelled {
            label: self.options.label.clone(),
            attempts,
        });
        RetryError::Cancelled { attempts }
    }
}

impl std::fmt::Debug for RetryRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryRunner")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
