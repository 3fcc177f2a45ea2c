//! Record parsing
//!
//! Turns user-supplied rows into [`InputRecord`]s aligned with a
//! [`FieldSpecification`]. Values are coerced per field kind; length
//! mismatches are left for the use case to reject so that the error
//! message is the same whatever the input source.

use serde_json::Value;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use wml_domain::{FieldSpecification, FieldValue, InputRecord};

/// Errors that can occur while reading records
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Unsupported layout in {path}: expected an array of rows, an array of objects, or {{\"values\": [...]}}"
    )]
    Layout { path: String },

    #[error("Record {index} in {path} is neither an array nor an object")]
    NotARecord { path: String, index: usize },
}

/// Split one comma-separated record.
///
/// Double quotes group a value that contains commas; `""` inside quotes is
/// a literal quote.
pub fn split_record(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => values.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    values.push(current);
    values
}

/// Records given as `--record` arguments
pub fn records_from_args(fields: &FieldSpecification, rows: &[String]) -> Vec<InputRecord> {
    rows.iter()
        .map(|row| fields.coerce_record(&split_record(row)))
        .collect()
}

/// Records from a decoded JSON document.
///
/// Accepted layouts:
/// - `[[1, "M14860", ...], ...]` rows in field order
/// - `[{"UDI": 1, "Product ID": "M14860", ...}, ...]` objects keyed by field name
/// - `{"values": [...]}` wrapping either of the above
pub fn records_from_json(
    fields: &FieldSpecification,
    document: &Value,
    path: &str,
) -> Result<Vec<InputRecord>, InputError> {
    let rows = match document {
        Value::Array(rows) => rows,
        Value::Object(map) => match map.get("values") {
            Some(Value::Array(rows)) => rows,
            _ => {
                return Err(InputError::Layout {
                    path: path.to_string(),
                });
            }
        },
        _ => {
            return Err(InputError::Layout {
                path: path.to_string(),
            });
        }
    };

    rows.iter()
        .enumerate()
        .map(|(index, row)| match row {
            Value::Array(values) => Ok(fields.coerce_json_record(values)),
            Value::Object(map) => Ok(fields
                .fields()
                .iter()
                .map(|field| {
                    map.get(&field.name)
                        .map(|v| field.coerce_json(v))
                        .unwrap_or(FieldValue::Null)
                })
                .collect()),
            _ => Err(InputError::NotARecord {
                path: path.to_string(),
                index,
            }),
        })
        .collect()
}

/// Read records from a JSON file, or standard input when `path` is `-`
pub fn read_records(
    fields: &FieldSpecification,
    path: &Path,
) -> Result<Vec<InputRecord>, InputError> {
    let display = path.display().to_string();
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| InputError::Read {
                path: display.clone(),
                source,
            })?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|source| InputError::Read {
            path: display.clone(),
            source,
        })?
    };

    let document: Value = serde_json::from_str(&text).map_err(|source| InputError::Json {
        path: display.clone(),
        source,
    })?;
    records_from_json(fields, &document, &display)
}
