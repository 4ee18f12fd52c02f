//! Audit artifacts
//!
//! Two pretty-printed JSON files are written once, after all searches:
//! - matches: `[[query, match], ...]`
//! - raw results: `[[query, [candidate, ...]], ...]`
//!
//! Both are fully overwritten on every run and contain nothing run-specific,
//! so identical search responses give byte-identical files.

use crate::error::{PipelineError, PipelineResult};
use crate::models::{AlbumMatch, CandidateAlbum, MatchRecord, RawSearchResult};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const MATCHES_FILE_NAME: &str = "data.json";
pub const RAW_RESULTS_FILE_NAME: &str = "data_raw.json";

/// Writes the matches and raw-results artifacts
pub struct AuditWriter {
    matches_path: PathBuf,
    raw_path: PathBuf,
}

impl AuditWriter {
    pub fn new(matches_path: impl Into<PathBuf>, raw_path: impl Into<PathBuf>) -> Self {
        Self {
            matches_path: matches_path.into(),
            raw_path: raw_path.into(),
        }
    }

    /// Writer using the standard file names inside `output_dir`
    pub fn in_dir(output_dir: &Path) -> Self {
        Self::new(
            output_dir.join(MATCHES_FILE_NAME),
            output_dir.join(RAW_RESULTS_FILE_NAME),
        )
    }

    pub fn matches_path(&self) -> &Path {
        &self.matches_path
    }

    pub fn raw_path(&self) -> &Path {
        &self.raw_path
    }

    pub async fn write(&self, matches: &[MatchRecord], raw: &[RawSearchResult]) -> PipelineResult<()> {
        let match_pairs: Vec<(&str, &AlbumMatch)> = matches
            .iter()
            .map(|m| (m.query.as_str(), &m.album))
            .collect();
        write_json(&self.matches_path, &match_pairs).await?;

        let raw_pairs: Vec<(&str, &[CandidateAlbum])> = raw
            .iter()
            .map(|r| (r.query.as_str(), r.candidates.as_slice()))
            .collect();
        write_json(&self.raw_path, &raw_pairs).await?;

        info!(
            matches = matches.len(),
            raw = raw.len(),
            "Saved audit files {} and {}",
            self.matches_path.display(),
            self.raw_path.display()
        );
        Ok(())
    }
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> PipelineResult<()> {
    let to_audit_error = |source: albumatch_common::Error| PipelineError::AuditWrite {
        path: path.to_path_buf(),
        source,
    };

    let json = serde_json::to_string_pretty(value)
        .map_err(|e| to_audit_error(albumatch_common::Error::Json(e)))?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| to_audit_error(albumatch_common::Error::Io(e)))
}
