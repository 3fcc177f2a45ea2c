//! Prediction response and tabular extraction

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Column name used when the deployment does not name its output
pub const PREDICTED_COLUMN: &str = "Predicted Target";

/// Why a decoded response could not be read as a prediction table
///
/// Non-fatal: callers show a warning together with the raw response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("response has no `predictions` array")]
    MissingPredictions,

    #[error("`predictions` array is empty")]
    EmptyPredictions,

    #[error("`predictions[0]` has no `values` field")]
    MissingValues,

    #[error("`predictions[0].values` is not an array")]
    ValuesNotArray,

    #[error("row {row} has {actual} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Decoded body of a prediction call
///
/// The schema belongs to the remote service; nothing here assumes more than
/// "valid JSON" until [`extract_table`](Self::extract_table) is called.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResponse {
    body: Value,
    raw: String,
}

impl PredictionResponse {
    /// Decode a response body, keeping the raw text alongside
    pub fn from_text(raw: impl Into<String>) -> Result<Self, serde_json::Error> {
        let raw = raw.into();
        let body = serde_json::from_str(&raw)?;
        Ok(Self { body, raw })
    }

    pub fn from_value(body: Value) -> Self {
        let raw = body.to_string();
        Self { body, raw }
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Read `predictions[0].values` as a table.
    ///
    /// Columns are named from `predictions[0].fields` when it matches the
    /// row width, otherwise the first is [`PREDICTED_COLUMN`].
    pub fn extract_table(&self) -> Result<PredictionTable, ShapeError> {
        let predictions = self
            .body
            .get("predictions")
            .and_then(Value::as_array)
            .ok_or(ShapeError::MissingPredictions)?;
        let first = predictions.first().ok_or(ShapeError::EmptyPredictions)?;
        let values = first.get("values").ok_or(ShapeError::MissingValues)?;
        let values = values.as_array().ok_or(ShapeError::ValuesNotArray)?;

        let rows: Vec<Vec<Value>> = values
            .iter()
            .map(|row| match row {
                Value::Array(cells) => cells.clone(),
                scalar => vec![scalar.clone()],
            })
            .collect();

        let width = rows.first().map(Vec::len).unwrap_or(1);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(ShapeError::RaggedRow {
                row,
                expected: width,
                actual: r.len(),
            });
        }

        let columns = Self::column_names(first.get("fields"), width);
        Ok(PredictionTable { columns, rows })
    }

    fn column_names(fields: Option<&Value>, width: usize) -> Vec<String> {
        let named: Option<Vec<String>> = fields.and_then(Value::as_array).and_then(|names| {
            names
                .iter()
                .map(|n| n.as_str().map(str::to_string))
                .collect()
        });
        match named {
            Some(names) if names.len() == width => names,
            _ => (0..width)
                .map(|i| {
                    if i == 0 {
                        PREDICTED_COLUMN.to_string()
                    } else {
                        format!("column_{}", i + 1)
                    }
                })
                .collect(),
        }
    }
}

/// Tabular view of a prediction response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl PredictionTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First column as numbers, for charting. `None` if any cell is not numeric.
    pub fn primary_series(&self) -> Option<Vec<f64>> {
        self.rows
            .iter()
            .map(|row| row.first().and_then(Value::as_f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_value_table() {
        let response = PredictionResponse::from_text(r#"{"predictions":[{"values":[[1]]}]}"#)
            .unwrap();
        let table = response.extract_table().unwrap();
        assert_eq!(table.columns, vec![PREDICTED_COLUMN.to_string()]);
        assert_eq!(table.rows, vec![vec![json!(1)]]);
    }

    #[test]
    fn test_missing_predictions_keeps_raw() {
        let response = PredictionResponse::from_text(r#"{"errors":[{"code":"x"}]}"#).unwrap();
        assert_eq!(
            response.extract_table(),
            Err(ShapeError::MissingPredictions)
        );
        assert_eq!(response.raw(), r#"{"errors":[{"code":"x"}]}"#);
        assert!(response.body().get("errors").is_some());
    }

    #[test]
    fn test_named_columns_from_fields() {
        let response = PredictionResponse::from_value(json!({
            "predictions": [{
                "fields": ["prediction", "probability"],
                "values": [[0, [0.97, 0.03]], [1, [0.2, 0.8]]]
            }]
        }));
        let table = response.extract_table().unwrap();
        assert_eq!(table.columns, vec!["prediction", "probability"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.primary_series(), Some(vec![0.0, 1.0]));
    }

    #[test]
    fn test_unnamed_wide_rows() {
        let response = PredictionResponse::from_value(json!({
            "predictions": [{"values": [[0, 0.9]]}]
        }));
        let table = response.extract_table().unwrap();
        assert_eq!(table.columns, vec![PREDICTED_COLUMN, "column_2"]);
    }

    #[test]
    fn test_scalar_rows_are_widened() {
        let response = PredictionResponse::from_value(json!({
            "predictions": [{"values": [0, 1]}]
        }));
        let table = response.extract_table().unwrap();
        assert_eq!(table.rows, vec![vec![json!(0)], vec![json!(1)]]);
    }

    #[test]
    fn test_shape_errors() {
        let cases = [
            (json!({"predictions": []}), ShapeError::EmptyPredictions),
            (json!({"predictions": [{}]}), ShapeError::MissingValues),
            (
                json!({"predictions": [{"values": "x"}]}),
                ShapeError::ValuesNotArray,
            ),
            (
                json!({"predictions": [{"values": [[1], [1, 2]]}]}),
                ShapeError::RaggedRow {
                    row: 1,
                    expected: 1,
                    actual: 2,
                },
            ),
            (json!([1, 2, 3]), ShapeError::MissingPredictions),
        ];
        for (body, expected) in cases {
            assert_eq!(
                PredictionResponse::from_value(body).extract_table(),
                Err(expected)
            );
        }
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(PredictionResponse::from_text("<html>502</html>").is_err());
    }

    #[test]
    fn test_primary_series_non_numeric() {
        let table = PredictionTable {
            columns: vec![PREDICTED_COLUMN.to_string()],
            rows: vec![vec![json!("failure")]],
        };
        assert!(table.primary_series().is_none());
    }
}
