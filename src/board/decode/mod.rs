//! Board description decoding
//!
//! Two generations of the description format exist and both are supported:
//!
//! - `legacy` - shapes as `~`-delimited strings whose first token names the
//!   shape kind, layers as delimited strings
//! - `structured` - shapes grouped per kind key as field records, layers as
//!   an id-to-record mapping, footprints nesting the same grouping
//!
//! [`parse_document`] detects the generation and applies each generation's
//! historical tolerance default; the decoders themselves take the policy
//! explicitly.

pub mod legacy;
pub mod structured;

use crate::board::store::ShapeStore;
use crate::error::Result;
use serde_json::Value;

/// What to do with a shape record whose kind has no decoder.
///
/// Deliberately a configuration choice: the earliest description revisions
/// abort on an unknown kind, later ones skip it with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownShapePolicy {
    /// Abort the whole decode pass
    Fail,
    /// Log a warning and keep going
    Skip,
}

/// Decode a board description of either generation, using the tolerance
/// default observed for that generation: legacy documents fail on unknown
/// kinds, structured documents skip them.
pub fn parse_document(doc: &Value) -> Result<ShapeStore> {
    if doc.get("shape").map(Value::is_array).unwrap_or(false) {
        legacy::parse_document(doc, UnknownShapePolicy::Fail)
    } else {
        structured::parse_document(doc, UnknownShapePolicy::Skip)
    }
}

/// Numeric field access tolerating both JSON numbers and numeric strings,
/// which the description format mixes freely.
pub(crate) fn num(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn num_field(record: &Value, key: &str) -> Option<f64> {
    record.get(key).and_then(num)
}

pub(crate) fn str_field<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}

/// Boolean field access tolerating both JSON booleans and `"true"` strings
pub(crate) fn bool_field(record: &Value, key: &str) -> Option<bool> {
    match record.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => Some(s == "true" || s == "1"),
        _ => None,
    }
}

/// Empty strings mean "no net" in both generations
pub(crate) fn optional_net(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}
