//! Field specification value objects

use super::value::{FieldValue, InputRecord};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// How raw input for a field is coerced before transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Integer,
    Float,
    Text,
    /// Integer, float or text, whichever the raw value reads as
    #[default]
    Auto,
}

impl FieldKind {
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Text => "text",
            FieldKind::Auto => "auto",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::Float)
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single named field the remote model expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
    /// Optional categorical encoding applied to raw text before coercion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<BTreeMap<String, i64>>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            encoding: None,
        }
    }

    pub fn with_encoding<K: Into<String>>(
        mut self,
        encoding: impl IntoIterator<Item = (K, i64)>,
    ) -> Self {
        self.encoding = Some(encoding.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    fn encode(&self, raw: &str) -> Option<i64> {
        self.encoding.as_ref()?.get(raw).copied()
    }

    /// Coerce raw text input into a typed value.
    ///
    /// Never fails: blank or unreadable input for a numeric kind becomes
    /// [`FieldValue::Null`].
    pub fn coerce_str(&self, raw: &str) -> FieldValue {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return FieldValue::Null;
        }
        if let Some(code) = self.encode(trimmed) {
            return FieldValue::Integer(code);
        }
        match self.kind {
            FieldKind::Integer => FieldValue::parse_integer(trimmed),
            FieldKind::Float => FieldValue::parse_float(trimmed),
            FieldKind::Text => FieldValue::Text(trimmed.to_string()),
            FieldKind::Auto => FieldValue::parse_auto(trimmed),
        }
    }

    /// Coerce a JSON input value into a typed value.
    pub fn coerce_json(&self, value: &serde_json::Value) -> FieldValue {
        use serde_json::Value;

        match value {
            Value::Null => FieldValue::Null,
            Value::String(s) => self.coerce_str(s),
            Value::Number(n) => match self.kind {
                FieldKind::Text => FieldValue::Text(n.to_string()),
                FieldKind::Float => n.as_f64().map(FieldValue::from).unwrap_or(FieldValue::Null),
                FieldKind::Integer => match n.as_i64() {
                    Some(i) => FieldValue::Integer(i),
                    None => n
                        .as_f64()
                        .map(FieldValue::from_f64_integral)
                        .unwrap_or(FieldValue::Null),
                },
                FieldKind::Auto => match n.as_i64() {
                    Some(i) => FieldValue::Integer(i),
                    None => n.as_f64().map(FieldValue::from).unwrap_or(FieldValue::Null),
                },
            },
            Value::Bool(b) if self.kind == FieldKind::Text || self.kind == FieldKind::Auto => {
                FieldValue::Text(b.to_string())
            }
            _ => FieldValue::Null,
        }
    }
}

/// Ordered list of fields agreed with the remote model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldSpecification {
    fields: Vec<FieldDef>,
}

impl FieldSpecification {
    /// Create a specification, rejecting empty lists and duplicate names
    pub fn new(fields: Vec<FieldDef>) -> Result<Self, DomainError> {
        if fields.is_empty() {
            return Err(DomainError::EmptyFieldSpecification);
        }
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(DomainError::DuplicateField(field.name.clone()));
            }
        }
        Ok(Self { fields })
    }

    /// Create a specification from bare names, each coerced as [`FieldKind::Auto`]
    pub fn from_names<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
    ) -> Result<Self, DomainError> {
        Self::new(
            names
                .into_iter()
                .map(|n| FieldDef::new(n, FieldKind::Auto))
                .collect(),
        )
    }

    /// Field list of the predictive-maintenance dataset
    ///
    /// `Type` is passed through as text; see [`FieldDef::with_encoding`] for
    /// deployments trained on a numeric encoding.
    pub fn predictive_maintenance() -> Self {
        Self {
            fields: vec![
                FieldDef::new("UDI", FieldKind::Integer),
                FieldDef::new("Product ID", FieldKind::Text),
                FieldDef::new("Type", FieldKind::Text),
                FieldDef::new("Air temperature [K]", FieldKind::Float),
                FieldDef::new("Process temperature [K]", FieldKind::Float),
                FieldDef::new("Rotational speed [rpm]", FieldKind::Integer),
                FieldDef::new("Torque [Nm]", FieldKind::Float),
                FieldDef::new("Tool wear [min]", FieldKind::Integer),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Coerce a row of raw text positionally.
    ///
    /// Values beyond the last field are coerced as [`FieldKind::Auto`]; the
    /// length mismatch itself is reported when the request is built.
    pub fn coerce_record<S: AsRef<str>>(&self, raw: &[S]) -> InputRecord {
        let auto = FieldDef::new("", FieldKind::Auto);
        raw.iter()
            .enumerate()
            .map(|(i, v)| self.fields.get(i).unwrap_or(&auto).coerce_str(v.as_ref()))
            .collect()
    }

    /// Coerce a row of JSON values positionally.
    pub fn coerce_json_record(&self, raw: &[serde_json::Value]) -> InputRecord {
        let auto = FieldDef::new("", FieldKind::Auto);
        raw.iter()
            .enumerate()
            .map(|(i, v)| self.fields.get(i).unwrap_or(&auto).coerce_json(v))
            .collect()
    }
}
