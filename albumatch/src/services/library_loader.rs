//! Library document loader
//!
//! Reads the user's catalog (`{"albums": [{"artist": ..., "album": ...}]}`),
//! trims both fields, drops incomplete records, and returns the entries in
//! ascending (artist, album) order with exact duplicates removed.

use crate::error::{PipelineError, PipelineResult};
use crate::models::LibraryEntry;
use serde::{de, Deserialize};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct LibraryDocument {
    #[serde(default)]
    albums: Vec<LibraryRecord>,
}

/// Other keys (track lists, service URIs) are ignored
#[derive(Debug, Deserialize)]
struct LibraryRecord {
    #[serde(default)]
    artist: Option<String>,
    #[serde(default)]
    album: Option<String>,
}

/// Load, normalize and order the library at `path`
pub fn load_library(path: &Path) -> PipelineResult<Vec<LibraryEntry>> {
    let content = std::fs::read_to_string(path).map_err(|e| PipelineError::Input {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let entries = parse_library(&content).map_err(|e| PipelineError::Input {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    info!("Loaded {} albums from {}", entries.len(), path.display());
    Ok(entries)
}

/// Parse library JSON text into ordered entries
pub fn parse_library(content: &str) -> Result<Vec<LibraryEntry>, serde_json::Error> {
    let value: Value = serde_json::from_str(content)?;
    if !value.is_object() {
        return Err(de::Error::custom("library document must be a JSON object"));
    }
    let document = LibraryDocument::deserialize(value)?;
    let total = document.albums.len();

    let mut entries: Vec<LibraryEntry> = document
        .albums
        .into_iter()
        .filter_map(|record| {
            let artist = record.artist.as_deref().unwrap_or_default().trim();
            let album = record.album.as_deref().unwrap_or_default().trim();
            if artist.is_empty() || album.is_empty() {
                None
            } else {
                Some(LibraryEntry::new(artist, album))
            }
        })
        .collect();

    let complete = entries.len();
    entries.sort();
    entries.dedup();

    debug!(
        total,
        skipped = total - complete,
        duplicates = complete - entries.len(),
        "Normalized library records"
    );

    Ok(entries)
}
