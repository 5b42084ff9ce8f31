//! Command implementations for the `carekit` binary.
//!
//! Each command takes already-read input and returns the text to print, so
//! the binary stays a thin argument-parsing shell.

use anyhow::{Context, Result};
use carekit_hash::{CanonicalHasher, CanonicalOptions};
use carekit_retry::{CancellationToken, RetryOptions, RetryResult, RetryRunner};
use serde_json::Value;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::process::ExitStatus;
use std::time::Duration;
use tracing::{debug, info};

/// Reads a whole document from `path`, or from stdin when `path` is `None` or `-`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read {}", p.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn parse_json(text: &str, what: &str) -> Result<Value> {
    serde_json::from_str(text).with_context(|| format!("{what} is not valid JSON"))
}

/// Fingerprints a JSON document, or renders its canonical text.
pub fn hash_document(text: &str, omit_nulls: bool, canonical: bool) -> Result<String> {
    let value = parse_json(text, "input")?;
    let hasher = CanonicalHasher::new(CanonicalOptions::default().omit_null_fields(omit_nulls));
    let output = if canonical {
        hasher.canonicalize(&value)?
    } else {
        hasher.hash(&value)?
    };
    Ok(output)
}

/// Merges two JSON arrays of records and returns the pretty-printed result.
pub fn merge_documents(base: &str, priority: &str, id_field: &str) -> Result<String> {
    let base = records(parse_json(base, "base")?, "base")?;
    let priority = records(parse_json(priority, "priority")?, "priority")?;
    let (base_len, priority_len) = (base.len(), priority.len());

    let merged = carekit_merge::merge_by_id(base, priority, id_field)?;
    info!(
        base = base_len,
        priority = priority_len,
        merged = merged.len(),
        "merged records"
    );
    Ok(serde_json::to_string_pretty(&merged)?)
}

fn records(value: Value, what: &str) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        other => anyhow::bail!("{what} must be a JSON array of records, got {}", kind(&other)),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Builds retry options from command-line values.
pub fn retry_options(
    retries: u32,
    base_delay_ms: u64,
    max_delay_ms: Option<u64>,
    label: impl Into<String>,
) -> RetryOptions {
    let options = RetryOptions::default()
        .with_retries(retries)
        .with_base_delay(Duration::from_millis(base_delay_ms))
        .with_label(label);
    match max_delay_ms {
        Some(ms) => options.with_max_delay(Duration::from_millis(ms)),
        None => options,
    }
}

/// A command attempt that did not exit successfully.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to start: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("exited with {0}")]
    Failed(ExitStatus),
}

/// How a retried command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    pub attempts: u32,
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "succeeded after {} attempt(s)", self.attempts)
    }
}

/// Runs `program` until it exits with status 0, backing off between attempts.
pub async fn retry_command(
    program: &str,
    args: &[String],
    options: RetryOptions,
    token: &CancellationToken,
) -> RetryResult<CommandOutcome, CommandError> {
    let runner = RetryRunner::new(options);
    let mut attempts: u32 = 0;

    runner
        .run_cancellable(token, || {
            attempts = attempts.saturating_add(1);
            let attempt = attempts;
            let mut command = tokio::process::Command::new(program);
            command.args(args);
            async move {
                debug!(attempt, "spawning command");
                let status = command.status().await?;
                if status.success() {
                    Ok(CommandOutcome { attempts: attempt })
                } else {
                    Err(CommandError::Failed(status))
                }
            }
        })
        .await
}
