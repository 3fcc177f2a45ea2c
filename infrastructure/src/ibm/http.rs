//! Shared HTTP client construction

use super::error::EndpointError;
use std::time::Duration;

/// Default timeout for identity and prediction calls
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("wml-predict/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by both adapters.
///
/// The timeout covers the whole request, including reading the body.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, EndpointError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Parse an absolute http(s) URL
pub(crate) fn parse_url(url: &str) -> Result<reqwest::Url, EndpointError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| EndpointError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(EndpointError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}
