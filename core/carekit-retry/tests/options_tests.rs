use carekit_retry::{OptionsError, RetryOptions, DEFAULT_BASE_DELAY, DEFAULT_RETRIES};
use pretty_assertions::assert_eq;
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ── Defaults & builders ──────────────────────────────────────────

#[test]
fn default_options() {
    let options = RetryOptions::default();
    assert_eq!(options.retries, 3);
    assert_eq!(options.retries, DEFAULT_RETRIES);
    assert_eq!(options.base_delay, ms(400));
    assert_eq!(options.base_delay, DEFAULT_BASE_DELAY);
    assert_eq!(options.max_delay, None);
    assert_eq!(options.max_attempts(), 4);
}

#[test]
fn builders_set_fields() {
    let options = RetryOptions::default()
        .with_retries(5)
        .with_base_delay(ms(100))
        .with_max_delay(ms(1000))
        .with_label("save observation");
    assert_eq!(options.retries, 5);
    assert_eq!(options.base_delay, ms(100));
    assert_eq!(options.max_delay, Some(ms(1000)));
    assert_eq!(options.label, "save observation");
}

#[test]
fn max_attempts_saturates() {
    let options = RetryOptions::default().with_retries(u32::MAX);
    assert_eq!(options.max_attempts(), u32::MAX);
}

// ── Backoff schedule ─────────────────────────────────────────────

#[test]
fn delays_double_from_base() {
    let options = RetryOptions::default();
    let delays: Vec<_> = (0..4).map(|i| options.delay_for(i)).collect();
    assert_eq!(delays, vec![ms(400), ms(800), ms(1600), ms(3200)]);
}

#[test]
fn delays_respect_cap() {
    let options = RetryOptions::default()
        .with_base_delay(ms(100))
        .with_max_delay(ms(250));
    assert_eq!(options.delay_for(0), ms(100));
    assert_eq!(options.delay_for(1), ms(200));
    assert_eq!(options.delay_for(2), ms(250));
    assert_eq!(options.delay_for(10), ms(250));
}

#[test]
fn huge_retry_index_saturates() {
    let options = RetryOptions::default();
    assert_eq!(options.delay_for(64), Duration::MAX);
    assert_eq!(options.delay_for(u32::MAX), Duration::MAX);
}

// ── Validation ───────────────────────────────────────────────────

#[test]
fn validate_accepts_defaults() {
    assert_eq!(RetryOptions::default().validate(), Ok(()));
}

#[test]
fn validate_rejects_zero_base() {
    let options = RetryOptions::default().with_base_delay(Duration::ZERO);
    assert_eq!(options.validate(), Err(OptionsError::ZeroBaseDelay));
}

#[test]
fn validate_rejects_cap_below_base() {
    let options = RetryOptions::default().with_max_delay(ms(100));
    assert_eq!(
        options.validate(),
        Err(OptionsError::CapBelowBase {
            max_ms: 100,
            base_ms: 400
        })
    );
}

// ── Config deserialization ───────────────────────────────────────

#[test]
fn deserialize_uses_millisecond_fields() {
    let options: RetryOptions = serde_json::from_str(
        r#"{"retries": 1, "base_delay_ms": 50, "max_delay_ms": 75, "label": "billing"}"#,
    )
    .unwrap();
    assert_eq!(options.retries, 1);
    assert_eq!(options.base_delay, ms(50));
    assert_eq!(options.max_delay, Some(ms(75)));
    assert_eq!(options.label, "billing");
}

#[test]
fn deserialize_fills_missing_fields() {
    let options: RetryOptions = serde_json::from_str(r#"{"retries": 0}"#).unwrap();
    assert_eq!(options.retries, 0);
    assert_eq!(options.base_delay, DEFAULT_BASE_DELAY);
    assert_eq!(options.max_delay, None);
    assert_eq!(options.label, "operation");
}

#[test]
fn serialize_writes_millis() {
    let json = serde_json::to_value(RetryOptions::default()).unwrap();
    assert_eq!(json["base_delay_ms"], 400);
    assert!(json["max_delay_ms"].is_null());
}

// ── Properties ───────────────────────────────────────────────────

mod schedule_properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Each wait is at least as long as the one before it.
        #[test]
        fn delays_never_shrink(base_ms in 1u64..10_000, index in 0u32..40) {
            let options = RetryOptions::default().with_base_delay(ms(base_ms));
            prop_assert!(options.delay_for(index + 1) >= options.delay_for(index));
        }

        /// A configured cap is never exceeded.
        #[test]
        fn delays_stay_under_cap(base_ms in 1u64..1_000, extra_ms in 0u64..10_000, index in 0u32..64) {
            let cap = ms(base_ms + extra_ms);
            let options = RetryOptions::default()
                .with_base_delay(ms(base_ms))
                .with_max_delay(cap);
            prop_assert!(options.delay_for(index) <= cap);
            prop_assert!(options.validate().is_ok());
        }
    }
}
