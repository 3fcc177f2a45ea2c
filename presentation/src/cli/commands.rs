//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for prediction results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Prediction table and chart
    Table,
    /// Pretty-printed response JSON
    Json,
    /// Response body exactly as received
    Raw,
}

impl From<OutputFormat> for wml_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => wml_domain::OutputFormat::Table,
            OutputFormat::Json => wml_domain::OutputFormat::Json,
            OutputFormat::Raw => wml_domain::OutputFormat::Raw,
        }
    }
}

/// CLI arguments for wml-predict
#[derive(Parser, Debug)]
#[command(name = "wml-predict")]
#[command(author, version, about = "Score records against a Watson Machine Learning deployment")]
#[command(long_about = r#"
wml-predict sends sensor readings to a deployed machine-learning model and
shows the prediction.

Each run performs three steps, in order:
1. Token exchange: the API key is exchanged for a short-lived bearer token
2. Prediction: the records are POSTed to the deployment endpoint
3. Extraction: predictions[0].values is rendered as a table and chart

The API key is read from an environment variable (IBM_CLOUD_API_KEY by
default) and never printed.

Configuration files are loaded from (in priority order):
1. WML_<SECTION>__<KEY>  Environment overrides
2. --config <path>       Explicit config file
3. ./wml.toml            Project-level config
4. ~/.config/wml-predict/config.toml   Global config

Example:
  wml-predict --deployment-url https://.../predictions \
      --record '1,M14860,M,298.1,308.6,1551,42.8,0'
  wml-predict --input readings.json -o json
"#)]
pub struct Cli {
    /// One record as comma-separated values, in field order (repeatable)
    #[arg(short, long, value_name = "VALUES")]
    pub record: Vec<String>,

    /// JSON file with records ('-' for stdin)
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Prediction endpoint URL (overrides config)
    #[arg(long, value_name = "URL")]
    pub deployment_url: Option<String>,

    /// Environment variable holding the API key (overrides config)
    #[arg(long, value_name = "NAME")]
    pub api_key_env: Option<String>,

    /// Timeout for each HTTP call in seconds (overrides config)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format (defaults to config, then table)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Do not draw the chart under the table
    #[arg(long)]
    pub no_chart: bool,

    /// Print the request body and exit without any network call
    #[arg(long)]
    pub print_payload: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
