//! Model input configuration from TOML (`[model]` section)

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use wml_domain::{ConfigIssue, ConfigIssueCode, FieldDef, FieldSpecification, InputRecord};

/// Raw model input configuration from TOML
///
/// # Example
///
/// ```toml
/// [model]
/// fields = [
///     { name = "UDI", kind = "integer" },
///     { name = "Type", kind = "text", encoding = { M = 0, L = 1, H = 2 } },
/// ]
/// sample = [1, "M"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Ordered fields the deployed model expects
    pub fields: Vec<FieldDef>,
    /// Record used when none is given on the command line. Unset means the
    /// built-in record, and only for the default field list.
    pub sample: Option<Vec<Value>>,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            fields: FieldSpecification::predictive_maintenance()
                .fields()
                .to_vec(),
            sample: None,
        }
    }
}

/// Sample record for the predictive-maintenance field list
fn predictive_maintenance_sample() -> Vec<Value> {
    vec![
        json!(1),
        json!("M14860"),
        json!("M"),
        json!(298.1),
        json!(308.6),
        json!(1551),
        json!(42.8),
        json!(0),
    ]
}

impl FileModelConfig {
    /// Build the field specification, collecting issues for empty or
    /// duplicate field lists.
    pub fn parse_fields(&self) -> (Option<FieldSpecification>, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        match FieldSpecification::new(self.fields.clone()) {
            Ok(fields) => (Some(fields), issues),
            Err(wml_domain::DomainError::DuplicateField(name)) => {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::DuplicateField { name: name.clone() },
                    format!("model.fields: field '{}' is listed more than once", name),
                ));
                (None, issues)
            }
            Err(_) => {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyFieldList,
                    "model.fields: at least one field is required",
                ));
                (None, issues)
            }
        }
    }

    /// The configured sample, or the built-in one while `fields` is still
    /// the predictive-maintenance list
    pub fn effective_sample(&self) -> Option<Vec<Value>> {
        match &self.sample {
            Some(values) => Some(values.clone()),
            None if self.fields == FieldSpecification::predictive_maintenance().fields() => {
                Some(predictive_maintenance_sample())
            }
            None => None,
        }
    }

    /// The effective sample coerced against `fields`
    pub fn sample_record(&self, fields: &FieldSpecification) -> Option<InputRecord> {
        self.effective_sample()
            .map(|values| fields.coerce_json_record(&values))
    }

    pub(crate) fn validate_sample(&self) -> Vec<ConfigIssue> {
        match &self.sample {
            Some(values) if values.len() != self.fields.len() => vec![ConfigIssue::warning(
                ConfigIssueCode::SampleLengthMismatch {
                    expected: self.fields.len(),
                    actual: values.len(),
                },
                format!(
                    "model.sample: has {} values but {} fields are configured",
                    values.len(),
                    self.fields.len()
                ),
            )],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wml_domain::{FieldKind, FieldValue};

    #[test]
    fn test_default_is_predictive_maintenance() {
        let config = FileModelConfig::default();
        let (fields, issues) = config.parse_fields();
        assert!(issues.is_empty());
        let fields = fields.unwrap();
        assert_eq!(fields.len(), 8);
        assert_eq!(fields.names()[2], "Type");

        let sample = config.sample_record(&fields).unwrap();
        assert_eq!(sample.values()[0], FieldValue::Integer(1));
        assert_eq!(sample.values()[3], FieldValue::Float(298.1));
        assert!(config.validate_sample().is_empty());
    }

    #[test]
    fn test_deserialize_fields_with_encoding() {
        let toml_str = r#"
fields = [
    { name = "UDI", kind = "integer" },
    { name = "Type", kind = "text", encoding = { M = 0, L = 1, H = 2 } },
]
sample = [7, "H"]
"#;
        let config: FileModelConfig = toml::from_str(toml_str).unwrap();
        let fields = config.parse_fields().0.unwrap();
        assert_eq!(fields.fields()[0].kind, FieldKind::Integer);
        let sample = config.sample_record(&fields).unwrap();
        assert_eq!(
            sample.values(),
            &[FieldValue::Integer(7), FieldValue::Integer(2)]
        );
    }

    #[test]
    fn test_empty_fields_issue() {
        let config = FileModelConfig {
            fields: vec![],
            sample: None,
        };
        let (fields, issues) = config.parse_fields();
        assert!(fields.is_none());
        assert_eq!(issues[0].code, ConfigIssueCode::EmptyFieldList);
    }

    #[test]
    fn test_duplicate_fields_issue() {
        let config = FileModelConfig {
            fields: vec![
                FieldDef::new("UDI", FieldKind::Integer),
                FieldDef::new("UDI", FieldKind::Text),
            ],
            sample: None,
        };
        let (_, issues) = config.parse_fields();
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::DuplicateField {
                name: "UDI".to_string()
            }
        );
    }

    #[test]
    fn test_sample_length_warning() {
        let config = FileModelConfig {
            sample: Some(vec![Value::from(1)]),
            ..Default::default()
        };
        let issues = config.validate_sample();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_custom_fields_do_not_inherit_builtin_sample() {
        let config = FileModelConfig {
            fields: vec![
                FieldDef::new("a", FieldKind::Auto),
                FieldDef::new("b", FieldKind::Auto),
            ],
            sample: None,
        };
        let fields = config.parse_fields().0.unwrap();

        assert!(config.effective_sample().is_none());
        assert!(config.sample_record(&fields).is_none());
        assert!(config.validate_sample().is_empty());
    }

    #[test]
    fn test_explicit_sample_wins_over_builtin() {
        let config = FileModelConfig {
            sample: Some(vec![
                json!(2),
                json!("L47181"),
                json!("L"),
                json!(298.2),
                json!(308.7),
                json!(1408),
                json!(46.3),
                json!(3),
            ]),
            ..Default::default()
        };
        let fields = config.parse_fields().0.unwrap();
        let sample = config.sample_record(&fields).unwrap();
        assert_eq!(sample.values()[0], FieldValue::Integer(2));
    }
}
