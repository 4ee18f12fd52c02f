//! Bootstrap configuration loading
//!
//! The TOML file is optional. Values found here sit between environment
//! variables and compiled defaults in the resolution order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory name used under the platform config directory
pub const APP_DIR_NAME: &str = "albumatch";

/// Config file name inside [`APP_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Bootstrap configuration loaded from TOML file
///
/// Every field is optional so that a partial file only overrides what it names.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Path to the library document
    #[serde(default)]
    pub library: Option<PathBuf>,

    /// Directory receiving the report, audit files and covers
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Search service settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Search service settings
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Minimum delay between search requests in milliseconds
    #[serde(default)]
    pub interval_ms: Option<u64>,

    /// Rate limiting strategy ("interval" or "bucket")
    #[serde(default)]
    pub rate_limit: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Interface language sent to the search service
    #[serde(default)]
    pub language: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Platform default location of the config file
///
/// `~/.config/albumatch/config.toml` on Linux, the equivalent application
/// support / roaming directory elsewhere.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;

    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse config file {}: {}", path.display(), e)))?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Config file that [`load_config`] will read, if any
///
/// An explicit path is returned as-is, existing or not. The platform default
/// is returned only when the file exists.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().filter(|path| path.exists()),
    }
}

/// Load configuration from an explicit path, or from the platform default
///
/// An explicitly requested file must exist and parse. The default file is
/// optional: when it is absent the compiled defaults apply.
///
/// The binary calls this before its subscriber is installed, so it reports
/// the outcome again through [`resolve_config_path`] once logging is up.
pub fn load_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    match resolve_config_path(explicit) {
        Some(path) => load_toml_config(&path),
        None => {
            debug!("No config file found, using defaults");
            Ok(TomlConfig::default())
        }
    }
}
