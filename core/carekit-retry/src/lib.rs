//! Retry-with-backoff for flaky asynchronous calls.
//!
//! An operation is attempted up to `retries + 1` times. After each failed
//! attempt except the last, the runner sleeps `base_delay * 2^i` where `i`
//! counts retries from zero, giving `base, 2*base, 4*base, ...`.
//!
//! ```no_run
//! use carekit_retry::{retry, RetryOptions};
//! use std::time::Duration;
//!
//! # async fn fetch_rows() -> Result<Vec<String>, std::io::Error> { Ok(vec![]) }
//! # async fn demo() -> Result<(), std::io::Error> {
//! let options = RetryOptions::default()
//!     .with_retries(2)
//!     .with_base_delay(Duration::from_millis(250));
//! let rows = retry(options, fetch_rows).await?;
//! # let _ = rows;
//! # Ok(())
//! # }
//! ```
//!
//! The plain [`retry`] / [`RetryRunner::run`] path returns the operation's
//! own error once attempts are exhausted. [`RetryRunner::run_cancellable`]
//! additionally watches a [`CancellationToken`] and reports through
//! [`RetryError`].

mod error;
mod options;
mod runner;

pub use error::{OptionsError, RetryError, RetryResult};
pub use options::{RetryOptions, DEFAULT_BASE_DELAY, DEFAULT_RETRIES};
pub use runner::{retry, RetryRunner};
pub use tokio_util::sync::CancellationToken;
