//! Answer values accumulated across questionnaire pages.
//!
//! Records are loose maps on purpose: rows written by older form versions carry
//! different keys and types, and readers must cope with whatever is stored.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SLIDER_MIN: i64 = 0;
pub const SLIDER_MAX: i64 = 10;
/// Neutral value substituted for missing or malformed slider answers.
pub const SLIDER_MIDPOINT: i64 = 5;

/// A single answer as produced by one form widget.
///
/// Stored rows may hold anything, so `Float` and `Other` keep values no widget
/// produces (fractional sliders, `null`, nested objects) readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
    Other(Value),
}

/// Question key → answer. Ordered so serialized blobs are stable.
pub type AnswerRecord = BTreeMap<String, AnswerValue>;

/// Reads a slider answer, falling back to the midpoint when the field is missing
/// or cannot be read as a number. The result is clamped into the slider range.
pub fn numeric_or_midpoint(record: &AnswerRecord, key: &str) -> i64 {
    let value = match record.get(key) {
        Some(AnswerValue::Int(n)) => Some(*n),
        Some(AnswerValue::Float(f)) => round_finite(*f),
        Some(AnswerValue::Text(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(round_finite))
        }
        _ => None,
    };
    value.unwrap_or(SLIDER_MIDPOINT).clamp(SLIDER_MIN, SLIDER_MAX)
}

/// NaN and infinities have no slider position.
fn round_finite(f: f64) -> Option<i64> {
    f.is_finite().then(|| f.round() as i64)
}

/// Reads a multi-select answer as a set. A lone text value counts as one item.
pub fn string_set(record: &AnswerRecord, key: &str) -> BTreeSet<String> {
    match record.get(key) {
        Some(AnswerValue::List(items)) => items.iter().map(|s| s.trim().to_string()).collect(),
        Some(AnswerValue::Text(s)) if !s.trim().is_empty() => {
            BTreeSet::from([s.trim().to_string()])
        }
        _ => BTreeSet::new(),
    }
}

pub fn text<'a>(record: &'a AnswerRecord, key: &str) -> Option<&'a str> {
    match record.get(key) {
        Some(AnswerValue::Text(s)) => Some(s.as_str()),
        _ => None,
    }
}

pub fn flag(record: &AnswerRecord, key: &str) -> Option<bool> {
    match record.get(key) {
        Some(AnswerValue::Bool(b)) => Some(*b),
        _ => None,
    }
}
