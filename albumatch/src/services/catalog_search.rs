//! Catalog search client
//!
//! Wraps an [`AlbumSearch`] backend behind the per-entry query contract:
//! every request is paced by the shared [`RateLimit`], and a failed request
//! is reported as a diagnostic and handed back as a value. It never aborts
//! the batch and is never retried.

use crate::models::CandidateAlbum;
use crate::services::rate_limiter::RateLimit;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Per-query search failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Query-by-text album search capability
#[async_trait]
pub trait AlbumSearch: Send + Sync {
    /// Search albums matching free text, returning results in service order
    async fn search_albums(&self, query: &str) -> Result<Vec<CandidateAlbum>, SearchError>;
}

/// Rate-limited, failure-isolating search front end
pub struct CatalogSearchClient {
    backend: Arc<dyn AlbumSearch>,
    rate_limiter: Arc<dyn RateLimit>,
}

impl CatalogSearchClient {
    pub fn new(backend: Arc<dyn AlbumSearch>, rate_limiter: Arc<dyn RateLimit>) -> Self {
        Self {
            backend,
            rate_limiter,
        }
    }

    /// Run one query
    ///
    /// Errors are logged with the failing query and returned for the caller
    /// to record; they are never propagated further.
    pub async fn search(&self, query: &str) -> Result<Vec<CandidateAlbum>, SearchError> {
        self.rate_limiter.until_ready().await;

        match self.backend.search_albums(query).await {
            Ok(candidates) => {
                debug!(query = %query, count = candidates.len(), "Search returned candidates");
                Ok(candidates)
            }
            Err(e) => {
                warn!("Search failed, skipping '{}': {}", query, e);
                Err(e)
            }
        }
    }
}
