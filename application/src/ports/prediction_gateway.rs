//! Prediction Gateway port
//!
//! Defines how a validated request is sent to the model deployment.

use async_trait::async_trait;
use thiserror::Error;
use wml_domain::{AccessToken, PredictionRequest, PredictionResponse};

/// Errors that can occur during a prediction call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PredictionError {
    #[error("Could not reach prediction endpoint: {0}")]
    Transport(String),

    #[error("Prediction endpoint timed out")]
    Timeout,

    #[error("Prediction endpoint returned HTTP {status}")]
    Rejected { status: u16, body: String },

    #[error("Prediction response is not valid JSON: {error}")]
    MalformedResponse { error: String, raw: String },
}

impl PredictionError {
    /// Response text received before the failure, if any
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            PredictionError::Rejected { body, .. } => Some(body),
            PredictionError::MalformedResponse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// Gateway for scoring requests against a deployed model
#[async_trait]
pub trait PredictionGateway: Send + Sync {
    /// POST the request payload with `Authorization: Bearer <token>`
    async fn predict(
        &self,
        token: &AccessToken,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, PredictionError>;
}
