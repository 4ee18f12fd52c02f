//! Cover art download
//!
//! Each match's widest thumbnail is stored as `<covers>/<filename>` where the
//! filename is a pure function of the match's display name, so a re-run
//! overwrites the same files instead of adding new ones.

use crate::error::{PipelineError, PipelineResult};
use crate::models::AlbumMatch;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Characters removed from cover file names
const FORBIDDEN_FILENAME_CHARS: &[char] = &['/', '<', '>', ':', '"', '\\', '|', '?', '*', '#'];

/// Per-cover download failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DownloadError {
    #[error("Match has no thumbnail")]
    MissingThumbnail,

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Http(u16),

    #[error("Write error: {0}")]
    Write(String),
}

/// Binary retrieval of artwork by URL
#[async_trait]
pub trait CoverSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DownloadError>;
}

/// Plain HTTP GET, redirects followed, no authentication
pub struct HttpCoverSource {
    http_client: reqwest::Client,
}

impl HttpCoverSource {
    pub fn new(timeout: Duration) -> Result<Self, DownloadError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DownloadError::Network(e.to_string()))?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl CoverSource for HttpCoverSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Http(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DownloadError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Filesystem-safe name: forbidden characters stripped, spaces to underscores
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !FORBIDDEN_FILENAME_CHARS.contains(c))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

/// Cover file name for a match
pub fn cover_filename(album: &AlbumMatch) -> String {
    sanitize_filename(&album.display_name())
}

/// A cover written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverFile {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Downloads covers into one directory
pub struct CoverFetcher {
    covers_dir: PathBuf,
    source: Arc<dyn CoverSource>,
}

impl CoverFetcher {
    pub fn new(covers_dir: impl Into<PathBuf>, source: Arc<dyn CoverSource>) -> Self {
        Self {
            covers_dir: covers_dir.into(),
            source,
        }
    }

    pub fn covers_dir(&self) -> &Path {
        &self.covers_dir
    }

    /// Create the covers directory; the run cannot continue without it
    pub async fn prepare(&self) -> PipelineResult<()> {
        tokio::fs::create_dir_all(&self.covers_dir)
            .await
            .map_err(|source| PipelineError::Directory {
                path: self.covers_dir.clone(),
                source,
            })
    }

    /// Download and store the cover for `album`, overwriting any previous file
    ///
    /// Failures are logged naming the album and returned for the caller to record.
    pub async fn fetch_cover(&self, album: &AlbumMatch) -> Result<CoverFile, DownloadError> {
        let result = self.download(album).await;
        if let Err(e) = &result {
            warn!("Couldn't download cover: {} ({})", album.display_name(), e);
        }
        result
    }

    async fn download(&self, album: &AlbumMatch) -> Result<CoverFile, DownloadError> {
        let url = album
            .thumbnail
            .as_deref()
            .ok_or(DownloadError::MissingThumbnail)?;

        let content = self.source.fetch(url).await?;

        let path = self.covers_dir.join(cover_filename(album));
        tokio::fs::write(&path, &content)
            .await
            .map_err(|e| DownloadError::Write(e.to_string()))?;

        debug!(path = %path.display(), bytes = content.len(), "Saved cover");
        Ok(CoverFile {
            path,
            bytes: content.len(),
        })
    }
}
