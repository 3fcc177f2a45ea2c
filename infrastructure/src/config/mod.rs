//! Configuration file loading for wml-predict
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables `WML_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./wml.toml` or `./.wml.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/wml-predict/config.toml`
//! 5. Default values
//!
//! Command-line flags are applied on top by the binary.

pub mod error;
mod file_config;
mod loader;

pub use error::ConfigError;
pub use file_config::{
    DEFAULT_API_KEY_ENV, DEFAULT_IDENTITY_URL, FileConfig, FileDeploymentConfig,
    FileIdentityConfig, FileModelConfig, FileOutputConfig, FileOutputFormat,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
