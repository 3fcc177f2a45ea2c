//! Prediction request/response value objects.
//!
//! - [`request::PredictionRequest`]: validated fields + records, rendered
//!   as the `input_data` payload
//! - [`response::PredictionResponse`]: decoded body plus raw text, with
//!   [`extract_table`](response::PredictionResponse::extract_table)
//! - [`phase::PredictionPhase`]: the per-invocation workflow state machine

pub mod phase;
pub mod request;
pub mod response;
