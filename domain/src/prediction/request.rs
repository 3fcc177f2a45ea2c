//! Prediction request value object

use crate::core::error::DomainError;
use crate::record::{FieldSpecification, InputRecord};
use serde::Serialize;

/// A validated batch of records ready to be scored
///
/// Every record is guaranteed to have exactly one value per field.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    fields: FieldSpecification,
    records: Vec<InputRecord>,
}

/// Request body in the deployment's scoring format:
/// `{"input_data": [{"fields": [...], "values": [[...], ...]}]}`
#[derive(Debug, Serialize)]
pub struct ScoringPayload<'a> {
    input_data: [InputData<'a>; 1],
}

#[derive(Debug, Serialize)]
struct InputData<'a> {
    fields: Vec<&'a str>,
    values: &'a [InputRecord],
}

impl PredictionRequest {
    /// Build a request, rejecting any record whose length differs from the
    /// field count. Zero records is allowed.
    pub fn new(
        fields: FieldSpecification,
        records: Vec<InputRecord>,
    ) -> Result<Self, DomainError> {
        let expected = fields.len();
        if let Some((index, record)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != expected)
        {
            return Err(DomainError::RecordLengthMismatch {
                index,
                expected,
                actual: record.len(),
            });
        }
        Ok(Self { fields, records })
    }

    pub fn fields(&self) -> &FieldSpecification {
        &self.fields
    }

    pub fn records(&self) -> &[InputRecord] {
        &self.records
    }

    /// Borrowed request body, serialized by the caller
    pub fn to_payload(&self) -> ScoringPayload<'_> {
        ScoringPayload {
            input_data: [InputData {
                fields: self.fields.names(),
                values: &self.records,
            }],
        }
    }
}
