//! In-memory search service and cover source

use albumatch::models::{CandidateAlbum, CandidateArtist, Thumbnail};
use albumatch::services::{AlbumSearch, CoverSource, DownloadError, RateLimit, SearchError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Search backend answering from a fixed table
///
/// Queries missing from the table return no candidates.
#[derive(Default)]
pub struct FakeSearch {
    responses: HashMap<String, Result<Vec<CandidateAlbum>, SearchError>>,
    calls: Mutex<Vec<String>>,
}

impl FakeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, query: &str, candidates: Vec<CandidateAlbum>) -> Self {
        self.responses.insert(query.to_string(), Ok(candidates));
        self
    }

    pub fn with_error(mut self, query: &str, error: SearchError) -> Self {
        self.responses.insert(query.to_string(), Err(error));
        self
    }

    /// Queries received, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlbumSearch for FakeSearch {
    async fn search_albums(&self, query: &str) -> Result<Vec<CandidateAlbum>, SearchError> {
        self.calls.lock().unwrap().push(query.to_string());
        self.responses
            .get(query)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Rate limiter that never waits and counts permits
///
/// When linked to a [`FakeSearch`] it also checks that the permit came
/// before the search call it paces.
#[derive(Default)]
pub struct CountingLimiter {
    permits: AtomicUsize,
    search: Option<Arc<FakeSearch>>,
    permits_ahead_of_search: AtomicUsize,
}

impl CountingLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pacing(search: Arc<FakeSearch>) -> Self {
        Self {
            search: Some(search),
            ..Default::default()
        }
    }

    pub fn permits(&self) -> usize {
        self.permits.load(Ordering::SeqCst)
    }

    /// Permits granted while the linked search had seen one call fewer
    pub fn permits_ahead_of_search(&self) -> usize {
        self.permits_ahead_of_search.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateLimit for CountingLimiter {
    async fn until_ready(&self) {
        let granted = self.permits.fetch_add(1, Ordering::SeqCst);
        if let Some(search) = &self.search {
            if search.calls().len() == granted {
                self.permits_ahead_of_search.fetch_add(1, Ordering::SeqCst);
            }
        }
    }
}

/// Cover source serving bytes derived from the URL
///
/// URLs registered with [`FakeCovers::failing`] return an HTTP 404 error.
#[derive(Default)]
pub struct FakeCovers {
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeCovers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.failing.push(url.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CoverSource for FakeCovers {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.failing.iter().any(|u| u == url) {
            Err(DownloadError::Http(404))
        } else {
            Ok(format!("image:{}", url).into_bytes())
        }
    }
}

/// Candidate with one artist and the given thumbnail widths
///
/// Thumbnail URLs are `https://img.example/<browse_id>/<width>`.
pub fn candidate(kind: &str, artist: &str, title: &str, widths: &[u32]) -> CandidateAlbum {
    let browse_id = format!("MPREb_{}_{}", artist, title).replace(' ', "");
    CandidateAlbum {
        kind: kind.to_string(),
        title: title.to_string(),
        artists: vec![CandidateArtist {
            name: artist.to_string(),
            id: Some(format!("UC_{}", artist)),
        }],
        thumbnails: widths
            .iter()
            .map(|w| Thumbnail {
                url: format!("https://img.example/{}/{}", browse_id, w),
                width: *w,
                height: *w,
            })
            .collect(),
        browse_id,
        playlist_id: Some(format!("OLAK5uy_{}", title)),
        year: Some("1999".to_string()),
        is_explicit: Some(false),
    }
}

/// Album candidate with a 60px and a 544px thumbnail
pub fn album(artist: &str, title: &str) -> CandidateAlbum {
    candidate("Album", artist, title, &[60, 544])
}

/// Write a library document with the given (artist, album) pairs
pub fn write_library(dir: &Path, albums: &[(&str, &str)]) -> PathBuf {
    let records: Vec<serde_json::Value> = albums
        .iter()
        .map(|(artist, album)| serde_json::json!({ "artist": artist, "album": album }))
        .collect();
    let path = dir.join("YourLibrary.json");
    std::fs::write(&path, serde_json::json!({ "albums": records }).to_string()).unwrap();
    path
}
