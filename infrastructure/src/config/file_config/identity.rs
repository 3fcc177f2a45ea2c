//! Identity configuration from TOML (`[identity]` section)

use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Public IBM Cloud IAM token endpoint
pub const DEFAULT_IDENTITY_URL: &str = "https://iam.cloud.ibm.com/identity/token";

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "IBM_CLOUD_API_KEY";

/// Raw identity configuration from TOML
///
/// # Example
///
/// ```toml
/// [identity]
/// url = "https://iam.cloud.ibm.com/identity/token"
/// api_key_env = "IBM_CLOUD_API_KEY"
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileIdentityConfig {
    /// Token endpoint URL
    pub url: String,
    /// Environment variable name for the API key
    pub api_key_env: String,
    /// Direct API key (prefer the environment variable)
    pub api_key: Option<String>,
}

impl Default for FileIdentityConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_IDENTITY_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
        }
    }
}

impl std::fmt::Debug for FileIdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileIdentityConfig")
            .field("url", &self.url)
            .field("api_key_env", &self.api_key_env)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl FileIdentityConfig {
    /// Resolve the API key: the environment variable wins over an inline key.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Same as [`resolve_api_key`](Self::resolve_api_key) with an injectable
    /// environment lookup.
    pub fn resolve_api_key_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<String, ConfigError> {
        if let Some(key) = lookup(&self.api_key_env).filter(|k| !k.trim().is_empty()) {
            return Ok(key);
        }
        match &self.api_key {
            Some(key) if !key.trim().is_empty() => Ok(key.clone()),
            _ => Err(ConfigError::MissingApiKey {
                env: self.api_key_env.clone(),
            }),
        }
    }
}
