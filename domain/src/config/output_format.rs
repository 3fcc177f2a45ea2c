//! Output format value object

use serde::{Deserialize, Serialize};

/// How prediction results are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table plus chart (default)
    Table,
    /// Pretty-printed response JSON
    Json,
    /// Response body exactly as received
    Raw,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_table() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&OutputFormat::Raw).unwrap();
        assert_eq!(json, "\"raw\"");
    }

    #[test]
    fn test_deserialize_lowercase() {
        let format: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, OutputFormat::Json);
    }
}
