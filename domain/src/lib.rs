//! Domain layer for wml-predict
//!
//! This crate contains the value objects of the prediction workflow.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Credentials**: [`ApiKey`] is exchanged for a short-lived [`AccessToken`]
//! - **Records**: [`InputRecord`]s are positionally aligned with a
//!   [`FieldSpecification`]; raw input is coerced per [`FieldKind`]
//! - **Prediction**: a validated [`PredictionRequest`] produces a
//!   [`PredictionResponse`], optionally read as a [`PredictionTable`]
//! - **Phases**: [`PredictionPhase`] tracks one invocation from `Idle` to
//!   `Parsed` / `ParseFailed`

pub mod config;
pub mod core;
pub mod credential;
pub mod prediction;
pub mod record;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use crate::core::error::DomainError;
pub use credential::{AccessToken, ApiKey};
pub use prediction::{
    phase::PredictionPhase,
    request::{PredictionRequest, ScoringPayload},
    response::{PREDICTED_COLUMN, PredictionResponse, PredictionTable, ShapeError},
};
pub use record::{FieldDef, FieldKind, FieldSpecification, FieldValue, InputRecord};
