//! Retry error types.

use thiserror::Error;

/// Result type for cancellable retry runs.
pub type RetryResult<T, E> = Result<T, RetryError<E>>;

/// Why a set of retry options was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("base delay must be positive")]
    ZeroBaseDelay,

    #[error("max delay {max_ms}ms is below base delay {base_ms}ms")]
    CapBelowBase { max_ms: u128, base_ms: u128 },
}

/// Errors returned by [`RetryRunner::run_cancellable`](crate::RetryRunner::run_cancellable).
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// Every attempt failed. Holds the last attempt's error as-is.
    #[error("{0}")]
    Exhausted(E),

    /// The cancellation token fired before the run finished.
    #[error("cancelled after {attempts} attempts")]
    Cancelled { attempts: u32 },

    #[error("invalid retry options: {0}")]
    InvalidOptions(#[from] OptionsError),
}

impl<E> RetryError<E> {
    /// Returns the operation's error if attempts were exhausted.
    pub fn into_inner(self) -> Option<E> {
        match self {
            RetryError::Exhausted(e) => Some(e),
            _ => None,
        }
    }

    /// Returns true if the run stopped because of cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RetryError::Cancelled { .. })
    }
}
