//! Structured configuration issues.
//!
//! Produced by the infrastructure config loader and reported by the CLI
//! before any network call is made.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `[model].fields` is empty.
    EmptyFieldList,
    /// The same field name appears twice in `[model].fields`.
    DuplicateField { name: String },
    /// `[model].sample` does not have one value per field.
    SampleLengthMismatch { expected: usize, actual: usize },
    /// `[deployment].timeout_secs` is zero.
    ZeroTimeout,
    /// `[deployment].url` is not set.
    MissingDeploymentUrl,
    /// An API key is written directly into a config file.
    InlineApiKey,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
