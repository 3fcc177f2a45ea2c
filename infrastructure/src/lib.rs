//! Infrastructure layer for wml-predict
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod ibm;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileConfig, FileDeploymentConfig, FileIdentityConfig,
    FileModelConfig, FileOutputConfig, FileOutputFormat,
};
pub use ibm::{EndpointError, IamTokenClient, WatsonPredictionClient, gateways_from_config};
