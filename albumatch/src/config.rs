//! Run settings resolution
//!
//! **Priority:** command line → environment → TOML → compiled default
//!
//! Command-line flags and their environment variables are merged by clap
//! before they reach [`CliOverrides`], so resolution here only has to layer
//! the overrides over the TOML file and the defaults.

use crate::services::rate_limiter::{RateLimitStrategy, DEFAULT_SEARCH_INTERVAL_MS};
use albumatch_common::config::{LoggingConfig, TomlConfig};
use albumatch_common::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LIBRARY_FILE: &str = "YourLibrary.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LANGUAGE: &str = "en";

/// Values supplied on the command line or through environment variables
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub library: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub interval_ms: Option<u64>,
    pub rate_limit: Option<String>,
    pub timeout_secs: Option<u64>,
    pub language: Option<String>,
    pub log_level: Option<String>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub library_path: PathBuf,
    pub output_dir: PathBuf,
    pub search_interval: Duration,
    pub rate_limit: RateLimitStrategy,
    pub request_timeout: Duration,
    pub language: String,
    pub logging: LoggingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            library_path: PathBuf::from(DEFAULT_LIBRARY_FILE),
            output_dir: PathBuf::from("."),
            search_interval: Duration::from_millis(DEFAULT_SEARCH_INTERVAL_MS),
            rate_limit: RateLimitStrategy::default(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            language: DEFAULT_LANGUAGE.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Settings {
    pub fn resolve(cli: &CliOverrides, toml: &TomlConfig) -> Result<Self> {
        let defaults = Settings::default();
        let search = &toml.search;

        let rate_limit = match cli.rate_limit.as_ref().or(search.rate_limit.as_ref()) {
            Some(value) => value.parse::<RateLimitStrategy>().map_err(Error::Config)?,
            None => defaults.rate_limit,
        };

        let language = cli
            .language
            .clone()
            .or_else(|| search.language.clone())
            .unwrap_or(defaults.language);
        if language.trim().is_empty() {
            return Err(Error::Config("language must not be empty".to_string()));
        }

        let mut logging = toml.logging.clone();
        if let Some(level) = &cli.log_level {
            logging.level = level.clone();
        }

        Ok(Self {
            library_path: cli
                .library
                .clone()
                .or_else(|| toml.library.clone())
                .unwrap_or(defaults.library_path),
            output_dir: cli
                .output_dir
                .clone()
                .or_else(|| toml.output_dir.clone())
                .unwrap_or(defaults.output_dir),
            search_interval: cli
                .interval_ms
                .or(search.interval_ms)
                .map(Duration::from_millis)
                .unwrap_or(defaults.search_interval),
            rate_limit,
            request_timeout: cli
                .timeout_secs
                .or(search.timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            language,
            logging,
        })
    }
}

/// Tracing filter directive for the subscriber
///
/// An explicit `--log-level` wins over `RUST_LOG`, which wins over the
/// configured level.
pub fn log_filter_directive(
    cli_level: Option<&str>,
    rust_log: Option<&str>,
    configured: &str,
) -> String {
    cli_level
        .or(rust_log.filter(|v| !v.trim().is_empty()))
        .unwrap_or(configured)
        .to_string()
}
