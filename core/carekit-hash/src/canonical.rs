//! Canonical text form of JSON values.
//!
//! - `null`, `true`, `false` as literals
//! - integers in decimal; floats holding an integral value below 2^127 in
//!   magnitude print as that exact integer (`1.0`, `-0.0` and `1e16` become
//!   `1`, `0` and `10000000000000000`), other floats in shortest round-trip form
//! - strings as JSON string literals
//! - arrays as `[a,b]` in element order
//! - objects as `{"k":v}` with keys ordered by their UTF-16 code units

use crate::{HashError, HashResult};
use serde_json::{Map, Number, Value};

/// Deepest container nesting accepted.
pub const MAX_DEPTH: usize = 128;

/// 2^127: every integral `f64` below this magnitude converts to `i128` exactly.
const I128_LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// Knobs for canonicalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanonicalOptions {
    /// Drop object members whose value is `null`, so an absent optional
    /// field and an explicit `null` render the same.
    pub omit_null_fields: bool,
}

impl CanonicalOptions {
    #[must_use]
    pub const fn omit_null_fields(mut self, omit: bool) -> Self {
        self.omit_null_fields = omit;
        self
    }
}

/// Renders `value` with default options.
pub fn canonicalize(value: &Value) -> HashResult<String> {
    canonicalize_with(value, &CanonicalOptions::default())
}

/// Renders `value` in canonical text form.
pub fn canonicalize_with(value: &Value, options: &CanonicalOptions) -> HashResult<String> {
    let mut out = String::new();
    write_value(&mut out, value, options, 0)?;
    Ok(out)
}

/// `depth` is the number of containers enclosing `value`.
fn write_value(
    out: &mut String,
    value: &Value,
    options: &CanonicalOptions,
    depth: usize,
) -> HashResult<()> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => write_number(out, n)?,
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            check_depth(depth)?;
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item, options, depth + 1)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            check_depth(depth)?;
            write_object(out, map, options, depth)?;
        }
    }
    Ok(())
}

fn write_object(
    out: &mut String,
    map: &Map<String, Value>,
    options: &CanonicalOptions,
    depth: usize,
) -> HashResult<()> {
    let mut entries: Vec<(&String, &Value)> = map
        .iter()
        .filter(|(_, v)| !(options.omit_null_fields && v.is_null()))
        .collect();
    entries.sort_by(|(a, _), (b, _)| a.encode_utf16().cmp(b.encode_utf16()));

    out.push('{');
    for (i, (key, item)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_string(out, key);
        out.push(':');
        write_value(out, item, options, depth + 1)?;
    }
    out.push('}');
    Ok(())
}

fn check_depth(depth: usize) -> HashResult<()> {
    if depth >= MAX_DEPTH {
        return Err(HashError::TooDeep { max: MAX_DEPTH });
    }
    Ok(())
}

fn write_number(out: &mut String, n: &Number) -> HashResult<()> {
    if let Some(i) = n.as_i64() {
        out.push_str(&i.to_string());
        return Ok(());
    }
    if let Some(u) = n.as_u64() {
        out.push_str(&u.to_string());
        return Ok(());
    }

    let f = n.as_f64().ok_or(HashError::NonFiniteNumber)?;
    if !f.is_finite() {
        return Err(HashError::NonFiniteNumber);
    }
    if f.fract() == 0.0 && f.abs() < I128_LIMIT {
        out.push_str(&(f as i128).to_string());
    } else {
        out.push_str(&n.to_string());
    }
    Ok(())
}

fn write_string(out: &mut String, s: &str) {
    // Serializing a str to JSON cannot fail.
    out.push_str(&Value::from(s).to_string());
}
