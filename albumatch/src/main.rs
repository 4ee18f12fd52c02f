//! albumatch - match a local album catalog against YouTube Music
//!
//! Reads the library document, searches every album, downloads covers and
//! writes `data.json`, `data_raw.json`, `results.html` and `covers/` into the
//! output directory.

use albumatch::config::{log_filter_directive, CliOverrides, Settings};
use albumatch::Pipeline;
use albumatch_common::config::{load_config, resolve_config_path, LoggingConfig};
use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for albumatch
#[derive(Parser, Debug)]
#[command(name = "albumatch")]
#[command(about = "Find a local album catalog on YouTube Music and build a cover gallery")]
#[command(version)]
struct Args {
    /// TOML config file (default: platform config dir/albumatch/config.toml)
    #[arg(short, long, env = "ALBUMATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Library document with an `albums` list of {artist, album} records
    #[arg(short, long, env = "ALBUMATCH_LIBRARY")]
    library: Option<PathBuf>,

    /// Directory receiving the report, audit files and covers
    #[arg(short, long, env = "ALBUMATCH_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Minimum delay between search requests, in milliseconds
    #[arg(long, env = "ALBUMATCH_INTERVAL_MS")]
    interval_ms: Option<u64>,

    /// Rate limiting strategy: interval or bucket
    #[arg(long, env = "ALBUMATCH_RATE_LIMIT")]
    rate_limit: Option<String>,

    /// HTTP request timeout, in seconds
    #[arg(long, env = "ALBUMATCH_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Interface language sent to the search service
    #[arg(long, env = "ALBUMATCH_LANGUAGE")]
    language: Option<String>,

    /// Log level or filter directive; overrides RUST_LOG
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            library: self.library.clone(),
            output_dir: self.output_dir.clone(),
            interval_ms: self.interval_ms,
            rate_limit: self.rate_limit.clone(),
            timeout_secs: self.timeout_secs,
            language: self.language.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

/// Install the global subscriber
fn init_tracing(directive: &str, logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("Invalid log filter '{}'", directive))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match &logging.file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = load_config(args.config.as_deref())?;
    let settings = Settings::resolve(&args.overrides(), &toml_config)?;

    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = log_filter_directive(
        args.log_level.as_deref(),
        rust_log.as_deref(),
        &settings.logging.level,
    );
    init_tracing(&directive, &settings.logging)?;

    info!("Starting albumatch {}", albumatch::build_info());
    match resolve_config_path(args.config.as_deref()) {
        Some(path) => info!("Configuration: {}", path.display()),
        None => info!("Configuration: no config file, using defaults"),
    }
    info!("Library: {}", settings.library_path.display());
    info!("Output directory: {}", settings.output_dir.display());

    let pipeline = Pipeline::from_settings(&settings)?;

    match pipeline.run().await {
        Ok(_report) => {
            info!("Done. Open {} in your browser.", pipeline.report_path().display());
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e.into())
        }
    }
}
