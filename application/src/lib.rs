//! Application layer for wml-predict
//!
//! This crate contains the prediction use case and the port definitions
//! its adapters implement. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    identity_gateway::{AuthError, IdentityGateway},
    prediction_gateway::{PredictionError, PredictionGateway},
    progress::{NoProgress, PredictionProgressNotifier},
};
pub use use_cases::run_prediction::{
    Extraction, RunPredictionError, RunPredictionInput, RunPredictionOutput, RunPredictionUseCase,
};
