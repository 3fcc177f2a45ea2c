//! Run Prediction use case
//!
//! Orchestrates one prediction invocation: validate, exchange the API key
//! for a token, send the records, read the response as a table.
//!
//! Each step is awaited before the next starts. Nothing is retried and
//! nothing is cached between invocations, so running the same input twice
//! performs two token exchanges and two prediction calls.

use crate::ports::identity_gateway::IdentityGateway;
use crate::ports::prediction_gateway::{PredictionError, PredictionGateway};
use crate::ports::progress::{NoProgress, PredictionProgressNotifier};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use wml_domain::{
    ApiKey, DomainError, FieldSpecification, InputRecord, PredictionPhase, PredictionRequest,
    PredictionResponse, PredictionTable, ShapeError,
};

/// Errors that halt a prediction invocation
#[derive(Error, Debug)]
pub enum RunPredictionError {
    #[error("Invalid input: {0}")]
    Validation(#[from] DomainError),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Prediction request failed: {message}")]
    PredictionRequestFailed {
        message: String,
        raw: Option<String>,
    },

    #[error("Failed to parse prediction response: {error}")]
    MalformedResponse { error: String, raw: String },
}

impl RunPredictionError {
    /// Response text received before the failure, for display
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            RunPredictionError::PredictionRequestFailed { raw, .. } => raw.as_deref(),
            RunPredictionError::MalformedResponse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

impl From<PredictionError> for RunPredictionError {
    fn from(err: PredictionError) -> Self {
        match err {
            PredictionError::MalformedResponse { error, raw } => {
                RunPredictionError::MalformedResponse { error, raw }
            }
            PredictionError::Rejected { status, body } => {
                RunPredictionError::PredictionRequestFailed {
                    message: format!("HTTP {}", status),
                    raw: Some(body),
                }
            }
            other => RunPredictionError::PredictionRequestFailed {
                message: other.to_string(),
                raw: None,
            },
        }
    }
}

/// Input for the RunPrediction use case
#[derive(Clone)]
pub struct RunPredictionInput {
    api_key: String,
    /// Fields agreed with the deployed model
    pub fields: FieldSpecification,
    /// Records to score, one value per field
    pub records: Vec<InputRecord>,
}

impl RunPredictionInput {
    pub fn new(
        api_key: impl Into<String>,
        fields: FieldSpecification,
        records: Vec<InputRecord>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            fields,
            records,
        }
    }
}

impl std::fmt::Debug for RunPredictionInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunPredictionInput")
            .field("api_key", &"<redacted>")
            .field("fields", &self.fields.names())
            .field("records", &self.records.len())
            .finish()
    }
}

/// Result of reading the response as a table
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Table(PredictionTable),
    /// The response decoded but did not have the expected shape
    Unexpected { reason: ShapeError },
}

impl Extraction {
    pub fn table(&self) -> Option<&PredictionTable> {
        match self {
            Extraction::Table(table) => Some(table),
            Extraction::Unexpected { .. } => None,
        }
    }

    pub fn warning(&self) -> Option<String> {
        match self {
            Extraction::Table(_) => None,
            Extraction::Unexpected { reason } => Some(format!(
                "Could not extract prediction values from response: {}",
                reason
            )),
        }
    }
}

/// Output of a completed invocation
///
/// Returned for both `Parsed` and `ParseFailed`; the raw response is
/// always available.
#[derive(Debug, Clone)]
pub struct RunPredictionOutput {
    pub response: PredictionResponse,
    pub extraction: Extraction,
    pub phase: PredictionPhase,
}

/// Tracks the current phase and forwards transitions to the notifier
struct PhaseTracker<'a> {
    current: PredictionPhase,
    progress: &'a dyn PredictionProgressNotifier,
}

impl<'a> PhaseTracker<'a> {
    fn new(progress: &'a dyn PredictionProgressNotifier) -> Self {
        Self {
            current: PredictionPhase::Idle,
            progress,
        }
    }

    fn advance(&mut self, next: PredictionPhase) {
        debug_assert!(
            self.current.can_transition_to(next),
            "invalid phase transition {:?} -> {:?}",
            self.current,
            next
        );
        debug!("Phase: {} -> {}", self.current.as_str(), next.as_str());
        self.progress.on_phase_change(self.current, next);
        self.current = next;
    }

    fn fail(&mut self, message: &str) {
        self.progress.on_failure(self.current, message);
        self.advance(PredictionPhase::Idle);
    }
}

/// Use case for running a single prediction
pub struct RunPredictionUseCase<I: IdentityGateway + 'static, P: PredictionGateway + 'static> {
    identity: Arc<I>,
    predictor: Arc<P>,
}

impl<I: IdentityGateway + 'static, P: PredictionGateway + 'static> Clone
    for RunPredictionUseCase<I, P>
{
    fn clone(&self) -> Self {
        Self {
            identity: self.identity.clone(),
            predictor: self.predictor.clone(),
        }
    }
}

impl<I: IdentityGateway + 'static, P: PredictionGateway + 'static> RunPredictionUseCase<I, P> {
    pub fn new(identity: Arc<I>, predictor: Arc<P>) -> Self {
        Self {
            identity,
            predictor,
        }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunPredictionInput,
    ) -> Result<RunPredictionOutput, RunPredictionError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunPredictionInput,
        progress: &dyn PredictionProgressNotifier,
    ) -> Result<RunPredictionOutput, RunPredictionError> {
        // Validation happens before any network call
        let request = PredictionRequest::new(input.fields, input.records)?;
        let api_key = ApiKey::new(input.api_key)?;

        info!(
            "Starting prediction: {} fields, {} records",
            request.fields().len(),
            request.records().len()
        );

        let mut phase = PhaseTracker::new(progress);

        // Step 1: token exchange
        phase.advance(PredictionPhase::Authenticating);
        let token = match self.identity.exchange_token(&api_key).await {
            Ok(token) => token,
            Err(e) => {
                warn!("Token exchange failed: {}", e);
                phase.fail(&e.to_string());
                return Err(RunPredictionError::AuthenticationFailed(e.to_string()));
            }
        };
        phase.advance(PredictionPhase::Authenticated);

        // Step 2: prediction request
        phase.advance(PredictionPhase::Requesting);
        let response = match self.predictor.predict(&token, &request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Prediction request failed: {}", e);
                phase.fail(&e.to_string());
                return Err(e.into());
            }
        };
        drop(token);
        phase.advance(PredictionPhase::ResponseReceived);

        // Step 3: extraction (non-fatal)
        let extraction = match response.extract_table() {
            Ok(table) => {
                debug!("Extracted {} prediction rows", table.row_count());
                phase.advance(PredictionPhase::Parsed);
                Extraction::Table(table)
            }
            Err(reason) => {
                warn!("Unexpected response shape: {}", reason);
                phase.advance(PredictionPhase::ParseFailed);
                Extraction::Unexpected { reason }
            }
        };

        Ok(RunPredictionOutput {
            response,
            extraction,
            phase: phase.current,
        })
    }
}
