//! Stable content fingerprints for JSON-like values.
//!
//! A value is first rendered to a canonical text form (object keys sorted,
//! arrays in order, numbers normalized) and the text is then digested with
//! 64-bit FNV-1a over its UTF-16 code units. The digest is printed as 16
//! lowercase hex digits.
//!
//! ```
//! use serde_json::json;
//!
//! let a = carekit_hash::hash(&json!({"resident": "r1", "day": "2026-10-01"})).unwrap();
//! let b = carekit_hash::hash(&json!({"day": "2026-10-01", "resident": "r1"})).unwrap();
//! assert_eq!(a, b);
//! assert_eq!(a.len(), 16);
//! ```
//!
//! This is a fingerprint, not a cryptographic hash. Distinct values can
//! collide; callers may rely on stability only.

mod canonical;
mod digest;
mod error;
mod fnv;
mod probe;

pub use canonical::{canonicalize, canonicalize_with, CanonicalOptions, MAX_DEPTH};
pub use digest::Digest;
pub use error::{HashError, HashResult};
pub use fnv::{fnv1a_64, FNV_OFFSET_BASIS, FNV_PRIME};

use serde::Serialize;
use serde_json::Value;
use tracing::trace;

/// Computes fingerprints with a fixed set of canonicalization options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanonicalHasher {
    options: CanonicalOptions,
}

impl CanonicalHasher {
    #[must_use]
    pub const fn new(options: CanonicalOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> CanonicalOptions {
        self.options
    }

    /// Renders `value` in canonical text form.
    pub fn canonicalize(&self, value: &Value) -> HashResult<String> {
        canonicalize_with(value, &self.options)
    }

    /// Fingerprints `value`.
    pub fn digest(&self, value: &Value) -> HashResult<Digest> {
        let text = self.canonicalize(value)?;
        let digest = Digest::from_u64(fnv1a_64(&text));
        trace!(canonical_len = text.len(), %digest, "hashed value");
        Ok(digest)
    }

    /// Fingerprints `value` and returns the 16-digit hex string.
    pub fn hash(&self, value: &Value) -> HashResult<String> {
        self.digest(value).map(|d| d.to_string())
    }

    /// Fingerprints any serializable value.
    ///
    /// Non-finite floats are rejected instead of being turned into `null`.
    pub fn hash_serialize<T: Serialize + ?Sized>(&self, value: &T) -> HashResult<String> {
        probe::check(value)?;
        let value = serde_json::to_value(value).map_err(|e| HashError::Unsupported(e.to_string()))?;
        self.hash(&value)
    }
}

/// Fingerprints `value` with default options.
pub fn hash(value: &Value) -> HashResult<String> {
    CanonicalHasher::default().hash(value)
}

/// Fingerprints `value` with default options, returning a [`Digest`].
pub fn digest(value: &Value) -> HashResult<Digest> {
    CanonicalHasher::default().digest(value)
}

/// Fingerprints any serializable value with default options.
pub fn hash_serialize<T: Serialize + ?Sized>(value: &T) -> HashResult<String> {
    CanonicalHasher::default().hash_serialize(value)
}
