//! Error types for albumatch
//!
//! Only setup and finalization failures are represented here; they abort the
//! run. Per-item failures ([`SearchError`](crate::services::SearchError),
//! [`DownloadError`](crate::services::DownloadError)) are recorded in the run
//! report instead of propagating.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal pipeline error
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Library document missing or not of the expected shape
    #[error("Failed to load library {path}: {reason}")]
    Input { path: PathBuf, reason: String },

    /// Covers directory could not be created
    #[error("Unable to create covers directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Audit artifact could not be written
    #[error("Failed to write audit file {path}: {source}")]
    AuditWrite {
        path: PathBuf,
        #[source]
        source: albumatch_common::Error,
    },

    /// Report document could not be written
    #[error("Failed to write report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// albumatch-common error
    #[error("Common error: {0}")]
    Common(#[from] albumatch_common::Error),
}

/// Result type for pipeline stages
pub type PipelineResult<T> = Result<T, PipelineError>;
