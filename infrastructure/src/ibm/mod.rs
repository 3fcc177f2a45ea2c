//! IBM Cloud adapters.
//!
//! | Adapter | Port | Endpoint |
//! |---------|------|----------|
//! | [`IamTokenClient`] | `IdentityGateway` | `POST {identity.url}` (form-encoded API key grant) |
//! | [`WatsonPredictionClient`] | `PredictionGateway` | `POST {deployment.url}?version=...` (JSON `input_data`) |
//!
//! Both adapters share one [`reqwest::Client`] built by [`http::build_client`]
//! with a bounded timeout. Neither retries.

pub mod deployment;
pub mod error;
pub mod http;
pub mod iam;

#[cfg(test)]
pub(crate) mod test_support;

pub use deployment::{DEFAULT_API_VERSION, WatsonPredictionClient};
pub use error::EndpointError;
pub use iam::{IAM_GRANT_TYPE, IamTokenClient};

use crate::config::{ConfigError, FileConfig};
use tracing::debug;

/// Build both adapters from resolved configuration, sharing one HTTP client.
pub fn gateways_from_config(
    config: &FileConfig,
) -> Result<(IamTokenClient, WatsonPredictionClient), ConfigError> {
    let deployment_url = config
        .deployment
        .url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .ok_or(ConfigError::MissingDeploymentUrl)?;

    let client = http::build_client(config.deployment.timeout())?;
    let identity = IamTokenClient::new(client.clone(), &config.identity.url)?;
    let predictor =
        WatsonPredictionClient::new(client, deployment_url, &config.deployment.version)?;

    debug!(
        "Identity endpoint: {}, prediction endpoint: {}",
        identity.url(),
        predictor.url()
    );
    Ok((identity, predictor))
}
