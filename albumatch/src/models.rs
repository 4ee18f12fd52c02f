//! Domain types passed between pipeline stages
//!
//! Data flows strictly forward: a [`LibraryEntry`] becomes a search query,
//! the search returns [`CandidateAlbum`]s, and the selected candidate is
//! reduced to an [`AlbumMatch`] carried by a [`MatchRecord`].

use serde::{Deserialize, Serialize};

/// Result kind eligible for selection
pub const ALBUM_KIND: &str = "Album";

/// Canonical album page prefix; the candidate's browse id is appended
pub const BROWSE_URL_PREFIX: &str = "https://music.youtube.com/browse/";

/// One (artist, album) pair from the user's catalog
///
/// Field order matters: the derived `Ord` sorts by artist, then album.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LibraryEntry {
    pub artist: String,
    pub album: String,
}

impl LibraryEntry {
    pub fn new(artist: impl Into<String>, album: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            album: album.into(),
        }
    }

    /// Free-text search query for this entry: `"{artist}, {album}"`
    pub fn query(&self) -> String {
        format!("{}, {}", self.artist, self.album)
    }
}

/// Artist credit on a search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateArtist {
    pub name: String,
    /// Channel id of the artist, when the result links to one
    pub id: Option<String>,
}

/// Artwork variant offered by the search service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// A single search result record, in the order the service returned it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateAlbum {
    /// Result kind as reported by the service ("Album", "Single", "EP", ...)
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub artists: Vec<CandidateArtist>,
    pub browse_id: String,
    pub playlist_id: Option<String>,
    pub year: Option<String>,
    pub is_explicit: Option<bool>,
    pub thumbnails: Vec<Thumbnail>,
}

impl CandidateAlbum {
    /// Whether this candidate may be selected as a match
    pub fn is_album(&self) -> bool {
        self.kind == ALBUM_KIND
    }

    /// Artist names in credit order
    pub fn artist_names(&self) -> impl Iterator<Item = &str> {
        self.artists.iter().map(|a| a.name.as_str())
    }
}

/// Metadata extracted from the selected candidate
///
/// Serialized with the key names of the audit file (`playlistId`,
/// `isExplicit`); absent values are written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumMatch {
    /// Artist names joined with ", "
    pub artists: String,
    pub title: String,
    /// Canonical album page
    pub url: String,
    pub playlist_id: Option<String>,
    pub year: Option<String>,
    pub is_explicit: Option<bool>,
    /// URL of the widest thumbnail, if the candidate had any
    pub thumbnail: Option<String>,
}

impl AlbumMatch {
    /// "artists - title", used for the report and the cover file name
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.artists, self.title)
    }
}

/// A query paired with the album selected for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub query: String,
    pub album: AlbumMatch,
}

/// Everything a successful search returned for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSearchResult {
    pub query: String,
    pub candidates: Vec<CandidateAlbum>,
}
