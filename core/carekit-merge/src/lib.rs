//! Precedence merge for keyed record collections.
//!
//! Reconciles locally drafted records against server-fetched ones: every
//! drafted (priority) record is kept, and fetched (base) records fill in
//! the ids the drafts do not cover. A record is never blended field by
//! field; the priority version replaces the base version whole.
//!
//! Output order is fixed: priority records in their original order, then
//! base-only records in their original order. Duplicate ids inside a single
//! input collapse to their first occurrence.

mod error;
mod merger;

pub use error::{MergeError, MergeResult, Side};
pub use merger::{merge, merge_by, merge_by_id, Keyed, DEFAULT_ID_FIELD};
