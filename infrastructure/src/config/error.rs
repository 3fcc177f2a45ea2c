//! Configuration resolution errors

use thiserror::Error;

/// Errors raised while turning configuration into runnable adapters
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Config file not found: {}", path.display())]
    MissingConfigFile { path: std::path::PathBuf },

    #[error("Deployment URL is not configured (set [deployment].url, WML_DEPLOYMENT__URL or --deployment-url)")]
    MissingDeploymentUrl,

    #[error("No API key found: set the {env} environment variable")]
    MissingApiKey { env: String },

    #[error("Invalid field configuration: {0}")]
    InvalidFields(String),

    #[error(transparent)]
    Endpoint(#[from] crate::ibm::EndpointError),
}
