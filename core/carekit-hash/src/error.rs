//! Error types for fingerprinting.

use thiserror::Error;

/// Result type for fingerprint operations.
pub type HashResult<T> = Result<T, HashError>;

/// Inputs that cannot be fingerprinted, and malformed digests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    /// Containers nested beyond [`MAX_DEPTH`](crate::MAX_DEPTH).
    #[error("value nested deeper than {max} levels")]
    TooDeep { max: usize },

    /// NaN or an infinity.
    #[error("non-finite number cannot be fingerprinted")]
    NonFiniteNumber,

    /// The value has no JSON representation (non-string map keys, failing `Serialize` impls).
    #[error("value cannot be represented as JSON: {0}")]
    Unsupported(String),

    #[error("invalid digest: {0:?}")]
    InvalidDigest(String),
}
