//! Per-item outcomes of a pipeline run
//!
//! The pipeline driver owns one [`RunReport`] and appends to it in library
//! order. Failures stay inspectable here after their diagnostics are logged.

use crate::models::{CandidateAlbum, MatchRecord, RawSearchResult};
use crate::services::{CoverFile, DownloadError, SearchError};

/// What happened to one library entry during the search phase
#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    /// An album was selected
    Matched(MatchRecord),
    /// The search worked but returned nothing of kind "Album"
    NoEligibleCandidate { query: String },
    /// The search call failed; the entry was skipped
    SearchFailed { query: String, error: SearchError },
}

impl EntryOutcome {
    pub fn query(&self) -> &str {
        match self {
            EntryOutcome::Matched(record) => &record.query,
            EntryOutcome::NoEligibleCandidate { query } => query,
            EntryOutcome::SearchFailed { query, .. } => query,
        }
    }
}

/// What happened to one match's cover
#[derive(Debug, Clone, PartialEq)]
pub enum CoverOutcome {
    Downloaded { query: String, file: CoverFile },
    Failed { query: String, filename: String, error: DownloadError },
}

/// Summary counts for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    pub entries: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub search_failures: usize,
    pub covers_downloaded: usize,
    pub cover_failures: usize,
}

impl RunStatistics {
    pub fn display_string(&self) -> String {
        format!(
            "{} albums searched: {} matched, {} without album result, {} search failures; {} covers downloaded, {} cover failures",
            self.entries,
            self.matched,
            self.unmatched,
            self.search_failures,
            self.covers_downloaded,
            self.cover_failures
        )
    }
}

/// Accumulated results of one run, in library order
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    entries: Vec<EntryOutcome>,
    raw_results: Vec<RawSearchResult>,
    covers: Vec<CoverOutcome>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful search and its selection result
    pub fn record_search(&mut self, query: String, candidates: Vec<CandidateAlbum>, outcome: EntryOutcome) {
        self.raw_results.push(RawSearchResult { query, candidates });
        self.entries.push(outcome);
    }

    pub fn record_search_failure(&mut self, query: String, error: SearchError) {
        self.entries.push(EntryOutcome::SearchFailed { query, error });
    }

    pub fn record_cover(&mut self, outcome: CoverOutcome) {
        self.covers.push(outcome);
    }

    pub fn entries(&self) -> &[EntryOutcome] {
        &self.entries
    }

    pub fn raw_results(&self) -> &[RawSearchResult] {
        &self.raw_results
    }

    pub fn covers(&self) -> &[CoverOutcome] {
        &self.covers
    }

    /// Match records in library order
    pub fn matches(&self) -> Vec<MatchRecord> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                EntryOutcome::Matched(record) => Some(record.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn statistics(&self) -> RunStatistics {
        let mut stats = RunStatistics {
            entries: self.entries.len(),
            ..Default::default()
        };
        for entry in &self.entries {
            match entry {
                EntryOutcome::Matched(_) => stats.matched += 1,
                EntryOutcome::NoEligibleCandidate { .. } => stats.unmatched += 1,
                EntryOutcome::SearchFailed { .. } => stats.search_failures += 1,
            }
        }
        for cover in &self.covers {
            match cover {
                CoverOutcome::Downloaded { .. } => stats.covers_downloaded += 1,
                CoverOutcome::Failed { .. } => stats.cover_failures += 1,
            }
        }
        stats
    }
}
