//! Typed record values

use serde::{Deserialize, Serialize};

/// A single cell of an input record
///
/// Serialized untagged so that the wire form is a bare JSON number, string
/// or `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Parse as an integer; float text with no fractional part is accepted.
    pub(crate) fn parse_integer(raw: &str) -> Self {
        if let Ok(i) = raw.parse::<i64>() {
            return FieldValue::Integer(i);
        }
        match Self::parse_float(raw) {
            FieldValue::Float(f) => Self::from_f64_integral(f),
            other => other,
        }
    }

    pub(crate) fn parse_float(raw: &str) -> Self {
        match raw.parse::<f64>() {
            Ok(f) if f.is_finite() => FieldValue::Float(f),
            _ => FieldValue::Null,
        }
    }

    /// Integer if it parses as one, then float, otherwise text.
    pub(crate) fn parse_auto(raw: &str) -> Self {
        if let Ok(i) = raw.parse::<i64>() {
            return FieldValue::Integer(i);
        }
        match Self::parse_float(raw) {
            FieldValue::Null => FieldValue::Text(raw.to_string()),
            number => number,
        }
    }

    pub(crate) fn from_f64_integral(f: f64) -> Self {
        if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
            FieldValue::Integer(f as i64)
        } else {
            FieldValue::Float(f)
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            FieldValue::Float(value)
        } else {
            FieldValue::Null
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// One row of input, positionally aligned with a field specification
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputRecord(Vec<FieldValue>);

impl InputRecord {
    pub fn new(values: Vec<FieldValue>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.0
    }
}

impl From<Vec<FieldValue>> for InputRecord {
    fn from(values: Vec<FieldValue>) -> Self {
        Self(values)
    }
}

impl FromIterator<FieldValue> for InputRecord {
    fn from_iter<T: IntoIterator<Item = FieldValue>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
