//! Retry configuration.

use crate::OptionsError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retries after the first attempt when nothing else is configured.
pub const DEFAULT_RETRIES: u32 = 3;

/// Wait before the first retry when nothing else is configured.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(400);

/// Configuration for a retry run.
///
/// Deserializes from `{"retries": 3, "base_delay_ms": 400, "max_delay_ms": null, "label": "..."}`;
/// any missing field takes its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryOptions {
    /// Retries after the first attempt (0 = a single attempt).
    pub retries: u32,
    /// Wait before the first retry; doubles for every retry after it.
    #[serde(rename = "base_delay_ms", with = "millis")]
    pub base_delay: Duration,
    /// Upper bound on any single wait.
    #[serde(rename = "max_delay_ms", with = "opt_millis")]
    pub max_delay: Option<Duration>,
    /// Name used in telemetry.
    pub label: String,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: None,
            label: "operation".to_string(),
        }
    }
}

impl RetryOptions {
    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    #[must_use]
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    #[must_use]
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = Some(delay);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Total number of attempts this configuration allows.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// Checks that the delays make sense.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.base_delay.is_zero() {
            return Err(OptionsError::ZeroBaseDelay);
        }
        match self.max_delay {
            Some(max) if max < self.base_delay => Err(OptionsError::CapBelowBase {
                max_ms: max.as_millis(),
                base_ms: self.base_delay.as_millis(),
            }),
            _ => Ok(()),
        }
    }

    /// Wait before retry number `retry_index` (0-based): `base_delay * 2^retry_index`.
    ///
    /// Saturates at `Duration::MAX` and is capped by `max_delay` when set.
    #[must_use]
    pub fn delay_for(&self, retry_index: u32) -> Duration {
        let delay = 1u32
            .checked_shl(retry_index)
            .and_then(|factor| self.base_delay.checked_mul(factor))
            .unwrap_or(Duration::MAX);

        match self.max_delay {
            Some(max) => delay.min(max),
            None => delay,
        }
    }

    /// Returns a copy with invalid delays clamped into range.
    pub(crate) fn sanitized(&self) -> Self {
        let mut options = self.clone();
        if options.base_delay.is_zero() {
            options.base_delay = Duration::from_millis(1);
        }
        if let Some(max) = options.max_delay {
            options.max_delay = Some(max.max(options.base_delay));
        }
        options
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(delay: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

mod opt_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        delay: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match delay {
            Some(d) => serializer.serialize_some(&u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Option::<u64>::deserialize(deserializer).map(|ms| ms.map(Duration::from_millis))
    }
}
