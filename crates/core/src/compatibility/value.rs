//! Dynamic specification values and the coercion rules applied to them.
//!
//! Part specifications are schema-less JSON documents. Every field the
//! evaluator reads is lifted into a [`SpecValue`] so each rule handler can
//! match exhaustively instead of poking at raw JSON.
//!
//! Coercion is uniform across all handlers:
//!
//! - equality: numbers compare numerically, a number and a numeric string
//!   compare numerically, everything else compares by variant and value;
//! - numeric: numbers as-is, booleans as 1/0, trimmed strings parsed
//!   (empty string is 0), anything else is non-numeric;
//! - string form: integral numbers render without a fractional part, null
//!   renders as the empty string, arrays join with `,`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single specification field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<SpecValue>),
}

impl SpecValue {
    /// Lift a JSON value into a spec value.
    ///
    /// Objects have no spec-value representation and resolve to `None`;
    /// nested objects inside arrays are dropped.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::Null),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n.as_f64().map(Self::Number),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(items) => Some(Self::List(
                items.iter().filter_map(Self::from_json).collect(),
            )),
            Value::Object(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the elements when this value is an array.
    pub fn as_list(&self) -> Option<&[SpecValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Coerce to a number, or `None` when the value is non-numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Text(s) => parse_numeric(s),
            Self::Null | Self::List(_) => None,
        }
    }

    /// Equality under the uniform coercion rule.
    pub fn loosely_equals(&self, other: &SpecValue) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Number(n), Self::Text(s)) | (Self::Text(s), Self::Number(n)) => {
                parse_numeric(s).is_some_and(|parsed| parsed == *n)
            }
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Null, Self::Null) => true,
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loosely_equals(y))
            }
            _ => false,
        }
    }

    /// Membership test under the uniform coercion rule.
    pub fn list_contains(items: &[SpecValue], needle: &SpecValue) -> bool {
        items.iter().any(|item| item.loosely_equals(needle))
    }

    /// Join array elements with `sep`, rendering each in its string form.
    pub fn join(items: &[SpecValue], sep: &str) -> String {
        items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(sep)
    }
}

impl fmt::Display for SpecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => f.write_str(&Self::join(items, ",")),
        }
    }
}

impl From<&str> for SpecValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for SpecValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for SpecValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for SpecValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

fn parse_numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Render integral values without a trailing `.0`.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
