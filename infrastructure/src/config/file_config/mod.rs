//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod deployment;
mod identity;
mod model;
mod output;

pub use deployment::FileDeploymentConfig;
pub use identity::{DEFAULT_API_KEY_ENV, DEFAULT_IDENTITY_URL, FileIdentityConfig};
pub use model::FileModelConfig;
pub use output::{FileOutputConfig, FileOutputFormat};

use serde::{Deserialize, Serialize};
use wml_domain::{ConfigIssue, ConfigIssueCode};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Token exchange settings
    pub identity: FileIdentityConfig,
    /// Prediction endpoint settings
    pub deployment: FileDeploymentConfig,
    /// Field specification and sample record
    pub model: FileModelConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. The field list is non-empty and has unique names
    /// 2. The sample record matches the field count
    /// 3. The deployment URL is set and the timeout is non-zero
    /// 4. No API key is written inline
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Field list
        issues.extend(self.model.parse_fields().1);

        // 2. Sample record
        issues.extend(self.model.validate_sample());

        // 3. Deployment
        if self
            .deployment
            .url
            .as_deref()
            .is_none_or(|u| u.trim().is_empty())
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingDeploymentUrl,
                "deployment.url: not set (config file, WML_DEPLOYMENT__URL or --deployment-url)",
            ));
        }
        if self.deployment.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                "deployment.timeout_secs: must be greater than zero",
            ));
        }

        // 4. Inline secrets
        if self.identity.api_key.is_some() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InlineApiKey,
                format!(
                    "identity.api_key: API key stored in config; prefer the {} environment variable",
                    self.identity.api_key_env
                ),
            ));
        }

        issues
    }
}
