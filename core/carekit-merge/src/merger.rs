use crate::{MergeError, MergeResult, Side};
use carekit_types::RecordId;
use serde_json::Value;
use std::collections::HashSet;
use std::hash::Hash;
use tracing::debug;

/// Field holding the id in list-store rows.
pub const DEFAULT_ID_FIELD: &str = "id";

/// A record that knows its own id.
pub trait Keyed {
    fn key(&self) -> RecordId;
}

/// Merges two collections, keeping the priority record for every shared id.
pub fn merge<R: Keyed>(
    base: impl IntoIterator<Item = R>,
    priority: impl IntoIterator<Item = R>,
) -> Vec<R> {
    merge_by(base, priority, R::key)
}

/// Merges two collections using `key_fn` to identify records.
///
/// Works on owned records as well as references, so passing `slice.iter()`
/// yields references into the inputs.
pub fn merge_by<R, K, F>(
    base: impl IntoIterator<Item = R>,
    priority: impl IntoIterator<Item = R>,
    key_fn: F,
) -> Vec<R>
where
    K: Eq + Hash,
    F: Fn(&R) -> K,
{
    let mut seen = HashSet::new();
    let mut merged: Vec<R> = priority
        .into_iter()
        .filter(|record| seen.insert(key_fn(record)))
        .collect();
    let priority_count = merged.len();

    merged.extend(
        base.into_iter()
            .filter(|record| seen.insert(key_fn(record))),
    );

    debug!(
        priority = priority_count,
        base_only = merged.len().saturating_sub(priority_count),
        "merged record collections"
    );
    merged
}

/// Merges JSON object records keyed by `field`.
///
/// Fails on the first record (priority side checked first) that has no
/// string or integer id under `field`.
pub fn merge_by_id(
    base: Vec<Value>,
    priority: Vec<Value>,
    field: &str,
) -> MergeResult<Vec<Value>> {
    let priority = keyed(priority, Side::Priority, field)?;
    let base = keyed(base, Side::Base, field)?;

    Ok(merge_by(base, priority, |pair: &(RecordId, Value)| pair.0.clone())
        .into_iter()
        .map(|(_, record)| record)
        .collect())
}

fn keyed(records: Vec<Value>, side: Side, field: &str) -> MergeResult<Vec<(RecordId, Value)>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| match RecordId::from_field(&record, field) {
            Some(id) => Ok((id, record)),
            None => Err(MergeError::MissingId {
                side,
                index,
                field: field.to_string(),
            }),
        })
        .collect()
}
