//! Configuration file loader with multi-source merging

use super::error::ConfigError;
use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["wml.toml", ".wml.toml"];

/// Prefix for environment overrides (`WML_DEPLOYMENT__URL`, ...)
pub const ENV_PREFIX: &str = "WML_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `WML_<SECTION>__<KEY>`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./wml.toml` or `./.wml.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/wml-predict/config.toml`
    /// 5. Default values
    ///
    /// An explicit path that does not exist is an error; discovered files
    /// are optional.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::MissingConfigFile { path: path.clone() });
            }
        }
        Ok(Self::figment(config_path).extract().map_err(Box::new)?)
    }

    fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        // Add global config (XDG or fallback)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        // Add explicit config path (highest priority for files)
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    ///
    /// Environment overrides still apply so that secrets and URLs never have
    /// to be written to disk.
    pub fn load_defaults() -> Result<FileConfig, ConfigError> {
        Ok(Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)?)
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/wml-predict/config.toml if set,
    /// otherwise falls back to ~/.config/wml-predict/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("wml-predict").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config sources for `--show-config`, highest priority first
    pub fn config_sources(config_path: Option<&PathBuf>, no_config: bool) -> Vec<String> {
        let mut lines = vec![format!("  [ENV  ] {}<SECTION>__<KEY>", ENV_PREFIX)];

        if no_config {
            lines.push("  [SKIP ] Config files disabled by --no-config".to_string());
        } else {
            if let Some(path) = config_path {
                let mark = if path.exists() { "FOUND" } else { "MISS " };
                lines.push(format!("  [{}] Explicit: {}", mark, path.display()));
            }

            match Self::project_config_path() {
                Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
                None => lines.push("  [     ] Project: ./wml.toml or ./.wml.toml".to_string()),
            }

            if let Some(path) = Self::global_config_path() {
                let mark = if path.exists() { "FOUND" } else { "     " };
                lines.push(format!("  [{}] Global:  {}", mark, path.display()));
            }
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>, no_config: bool) {
        println!("Configuration sources (in priority order):");
        for line in Self::config_sources(config_path, no_config) {
            println!("{}", line);
        }
    }
}
