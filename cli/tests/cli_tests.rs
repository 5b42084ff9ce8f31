use carekit_cli::{
    hash_document, merge_documents, read_input, retry_command, retry_options, CommandError,
};
use carekit_retry::{CancellationToken, RetryError};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::io::Write;
use std::time::Duration;

// ── hash ─────────────────────────────────────────────────────────

#[test]
fn hash_prints_digest() {
    assert_eq!(hash_document("null", false, false).unwrap(), "5b9bc4ba528108e4");
    assert_eq!(
        hash_document(r#"{"b": 2, "a": 1}"#, false, false).unwrap(),
        hash_document(r#"{"a":1,"b":2}"#, false, false).unwrap()
    );
}

#[test]
fn hash_can_print_canonical_text() {
    assert_eq!(
        hash_document(r#"{"b": [1.0, null], "a": "x"}"#, false, true).unwrap(),
        r#"{"a":"x","b":[1,null]}"#
    );
}

#[test]
fn hash_omit_nulls_flag() {
    assert_eq!(
        hash_document(r#"{"a": null, "b": 1}"#, true, true).unwrap(),
        r#"{"b":1}"#
    );
}

#[test]
fn hash_rejects_invalid_json() {
    let err = hash_document("{not json", false, false).unwrap_err();
    assert!(err.to_string().contains("not valid JSON"));
}

// ── merge ────────────────────────────────────────────────────────

#[test]
fn merge_prints_priority_first() {
    let base = r#"[{"id": "a", "status": "確定"}, {"id": "b", "status": "確定"}]"#;
    let priority = r#"[{"id": "a", "status": "遅刻"}]"#;

    let out = merge_documents(base, priority, "id").unwrap();
    let merged: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(
        merged,
        json!([{"id": "a", "status": "遅刻"}, {"id": "b", "status": "確定"}])
    );
}

#[test]
fn merge_requires_arrays() {
    let err = merge_documents(r#"{"id": 1}"#, "[]", "id").unwrap_err();
    assert_eq!(
        err.to_string(),
        "base must be a JSON array of records, got an object"
    );
}

#[test]
fn merge_reports_missing_ids() {
    let err = merge_documents("[]", r#"[{"name": "x"}]"#, "id").unwrap_err();
    assert_eq!(err.to_string(), "priority record #0 has no usable `id`");
}

// ── input ────────────────────────────────────────────────────────

#[test]
fn read_input_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"id": 1}}"#).unwrap();

    let text = read_input(Some(file.path())).unwrap();
    assert_eq!(text, r#"{"id": 1}"#);
}

#[test]
fn read_input_missing_file_has_context() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    let err = read_input(Some(missing.as_path())).unwrap_err();
    assert!(err.to_string().starts_with("failed to read"));
}

// ── retry ────────────────────────────────────────────────────────

#[test]
fn retry_options_from_flags() {
    let options = retry_options(2, 50, Some(80), "curl");
    assert_eq!(options.retries, 2);
    assert_eq!(options.base_delay, Duration::from_millis(50));
    assert_eq!(options.max_delay, Some(Duration::from_millis(80)));
    assert_eq!(options.label, "curl");

    assert_eq!(retry_options(0, 1, None, "x").max_delay, None);
}

#[cfg(unix)]
#[tokio::test]
async fn retry_command_succeeds_first_time() {
    let token = CancellationToken::new();
    let outcome = retry_command("true", &[], retry_options(2, 1, None, "true"), &token)
        .await
        .unwrap();
    assert_eq!(outcome.attempts, 1);
}

#[cfg(unix)]
#[tokio::test]
async fn retry_command_exhausts_on_failing_program() {
    let token = CancellationToken::new();
    let err = retry_command("false", &[], retry_options(2, 1, None, "false"), &token)
        .await
        .unwrap_err();
    assert!(matches!(err, RetryError::Exhausted(CommandError::Failed(_))));
}

#[cfg(unix)]
#[tokio::test]
async fn retry_command_succeeds_after_flaky_runs() {
    // Fails on the first two runs.
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("count");
    let script = format!(
        "echo x >> {0}; test $(wc -l < {0}) -ge 3",
        marker.display()
    );

    let token = CancellationToken::new();
    let outcome = retry_command(
        "sh",
        &["-c".to_string(), script],
        retry_options(3, 1, None, "sh"),
        &token,
    )
    .await
    .unwrap();
    assert_eq!(outcome.attempts, 3);
}

#[tokio::test]
async fn retry_command_reports_spawn_failure() {
    let token = CancellationToken::new();
    let err = retry_command(
        "carekit-test-no-such-program",
        &[],
        retry_options(0, 1, None, "missing"),
        &token,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RetryError::Exhausted(CommandError::Spawn(_))));
}

#[tokio::test]
async fn retry_command_honours_cancelled_token() {
    let token = CancellationToken::new();
    token.cancel();
    let err = retry_command("true", &[], retry_options(1, 1, None, "true"), &token)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
}
