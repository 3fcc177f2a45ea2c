//! Error types for constructing the IBM Cloud adapters

use thiserror::Error;

/// Errors that can occur while setting up an endpoint adapter
#[derive(Error, Debug)]
pub enum EndpointError {
    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
