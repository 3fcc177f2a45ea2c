//! Deployment configuration from TOML (`[deployment]` section)

use serde::{Deserialize, Serialize};

/// Raw deployment configuration from TOML
///
/// The URL has no default: it identifies a specific deployment and must be
/// supplied by config file, `WML_DEPLOYMENT__URL` or `--deployment-url`.
///
/// # Example
///
/// ```toml
/// [deployment]
/// url = "https://jp-tok.ml.cloud.ibm.com/ml/v4/deployments/<id>/predictions"
/// version = "2021-05-01"
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDeploymentConfig {
    /// Prediction endpoint URL
    pub url: Option<String>,
    /// `version` query parameter
    pub version: String,
    /// Timeout for each HTTP call, in seconds
    pub timeout_secs: u64,
}

impl Default for FileDeploymentConfig {
    fn default() -> Self {
        Self {
            url: None,
            version: "2021-05-01".to_string(),
            timeout_secs: 30,
        }
    }
}

impl FileDeploymentConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileDeploymentConfig::default();
        assert!(config.url.is_none());
        assert_eq!(config.version, "2021-05-01");
        assert_eq!(config.timeout().as_secs(), 30);
    }
}
