//! Identity Gateway port
//!
//! Defines how an API key is exchanged for a bearer token.

use async_trait::async_trait;
use thiserror::Error;
use wml_domain::{AccessToken, ApiKey};

/// Errors that can occur while exchanging an API key
///
/// Messages never include the API key itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Could not reach identity service: {0}")]
    Transport(String),

    #[error("Identity service timed out")]
    Timeout,

    #[error("Identity service rejected the API key (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Identity response is not valid JSON: {0}")]
    InvalidBody(String),

    #[error("Identity response has no access_token")]
    MissingToken,
}

/// Gateway for token exchange
///
/// Implementations perform exactly one network call per invocation and
/// never cache tokens.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Exchange an API key for a short-lived bearer token
    async fn exchange_token(&self, api_key: &ApiKey) -> Result<AccessToken, AuthError>;
}
