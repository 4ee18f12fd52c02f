//! Reconciliation pipeline driver
//!
//! # Stages
//! LOAD → SEARCH (paced, one entry at a time) → AUDIT → COVERS → REPORT
//!
//! Loading, covers-directory creation and the final artifact writes are
//! fatal on failure. Search and download failures are recorded per item in
//! the [`RunReport`] and the batch continues.

use crate::config::Settings;
use crate::error::{PipelineError, PipelineResult};
use crate::models::{LibraryEntry, MatchRecord};
use crate::services::report_renderer::COVERS_DIR_NAME;
use crate::services::{
    build_rate_limiter, cover_filename, load_library, select_match, AlbumSearch, AuditWriter,
    CatalogSearchClient, CoverFetcher, CoverSource, HttpCoverSource, RateLimit, ReportRenderer,
    YtMusicClient, YtMusicConfig,
};
use crate::workflow::run_report::{CoverOutcome, EntryOutcome, RunReport};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Pipeline wired to its search backend, cover source and output locations
pub struct Pipeline {
    library_path: PathBuf,
    output_dir: PathBuf,
    search: CatalogSearchClient,
    covers: CoverFetcher,
    audit: AuditWriter,
    report: ReportRenderer,
}

impl Pipeline {
    /// Create a pipeline reading `library_path` and writing into `output_dir`
    ///
    /// # Arguments
    /// * `search_backend` - Album search capability
    /// * `rate_limiter` - Pacing applied before every search request
    /// * `cover_source` - Artwork retrieval
    pub fn new(
        library_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        search_backend: Arc<dyn AlbumSearch>,
        rate_limiter: Arc<dyn RateLimit>,
        cover_source: Arc<dyn CoverSource>,
    ) -> Self {
        let output_dir = output_dir.into();
        Self {
            library_path: library_path.into(),
            search: CatalogSearchClient::new(search_backend, rate_limiter),
            covers: CoverFetcher::new(output_dir.join(COVERS_DIR_NAME), cover_source),
            audit: AuditWriter::in_dir(&output_dir),
            report: ReportRenderer::in_dir(&output_dir),
            output_dir,
        }
    }

    /// Production wiring: YouTube Music search and HTTP cover downloads
    pub fn from_settings(settings: &Settings) -> PipelineResult<Self> {
        let search_backend = YtMusicClient::new(YtMusicConfig {
            language: settings.language.clone(),
            timeout: settings.request_timeout,
            ..Default::default()
        })
        .map_err(|e| PipelineError::HttpClient(e.to_string()))?;

        let cover_source = HttpCoverSource::new(settings.request_timeout)
            .map_err(|e| PipelineError::HttpClient(e.to_string()))?;

        let rate_limiter = build_rate_limiter(settings.rate_limit, settings.search_interval);
        debug!(
            strategy = ?settings.rate_limit,
            interval = ?settings.search_interval,
            "Search rate limiter configured"
        );

        Ok(Self::new(
            &settings.library_path,
            &settings.output_dir,
            Arc::new(search_backend),
            rate_limiter,
            Arc::new(cover_source),
        ))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn report_path(&self) -> &Path {
        self.report.path()
    }

    /// Run every stage and return the per-item outcomes
    pub async fn run(&self) -> PipelineResult<RunReport> {
        let entries = load_library(&self.library_path)?;

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| PipelineError::Directory {
                path: self.output_dir.clone(),
                source,
            })?;

        let mut report = RunReport::new();

        info!("Searching {} albums...", entries.len());
        self.search_entries(&entries, &mut report).await;

        let matches = report.matches();
        self.audit.write(&matches, report.raw_results()).await?;

        info!("Creating covers directory {}", self.covers.covers_dir().display());
        self.covers.prepare().await?;

        info!("Downloading {} covers...", matches.len());
        self.download_covers(&matches, &mut report).await;

        info!("Saving report...");
        self.report.write(&matches).await?;

        info!("{}", report.statistics().display_string());
        Ok(report)
    }

    /// Search each entry in order, recording one outcome per entry
    pub async fn search_entries(&self, entries: &[LibraryEntry], report: &mut RunReport) {
        for (index, entry) in entries.iter().enumerate() {
            let query = entry.query();
            debug!(query = %query, "Searching {} of {}", index + 1, entries.len());

            match self.search.search(&query).await {
                Ok(candidates) => {
                    let outcome = match select_match(&candidates) {
                        Some(album) => {
                            debug!(query = %query, found = %album.display_name(), "Selected match");
                            EntryOutcome::Matched(MatchRecord {
                                query: query.clone(),
                                album,
                            })
                        }
                        None => {
                            info!("No album result for '{}'", query);
                            EntryOutcome::NoEligibleCandidate {
                                query: query.clone(),
                            }
                        }
                    };
                    report.record_search(query, candidates, outcome);
                }
                Err(error) => report.record_search_failure(query, error),
            }
        }
    }

    /// Download each match's cover in order, recording one outcome per match
    pub async fn download_covers(&self, matches: &[MatchRecord], report: &mut RunReport) {
        for record in matches {
            let outcome = match self.covers.fetch_cover(&record.album).await {
                Ok(file) => CoverOutcome::Downloaded {
                    query: record.query.clone(),
                    file,
                },
                Err(error) => CoverOutcome::Failed {
                    query: record.query.clone(),
                    filename: cover_filename(&record.album),
                    error,
                },
            };
            report.record_cover(outcome);
        }
    }
}
