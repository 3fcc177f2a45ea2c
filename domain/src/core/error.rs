//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Every variant is detected locally, before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Field specification must contain at least one field")]
    EmptyFieldSpecification,

    #[error("Duplicate field name: {0}")]
    DuplicateField(String),

    #[error("Record {index} has {actual} values but {expected} fields are specified")]
    RecordLengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("API key is empty")]
    EmptyApiKey,
}

impl DomainError {
    /// Check if this error comes from a record/field alignment check
    pub fn is_record_mismatch(&self) -> bool {
        matches!(self, DomainError::RecordLengthMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_error_display() {
        let error = DomainError::RecordLengthMismatch {
            index: 2,
            expected: 8,
            actual: 7,
        };
        assert_eq!(
            error.to_string(),
            "Record 2 has 7 values but 8 fields are specified"
        );
    }

    #[test]
    fn test_is_record_mismatch_check() {
        assert!(
            DomainError::RecordLengthMismatch {
                index: 0,
                expected: 1,
                actual: 2
            }
            .is_record_mismatch()
        );
        assert!(!DomainError::EmptyApiKey.is_record_mismatch());
        assert!(!DomainError::EmptyFieldSpecification.is_record_mismatch());
    }
}
