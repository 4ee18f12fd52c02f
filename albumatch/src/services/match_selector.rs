//! Match selection
//!
//! The first candidate of kind "Album", in the service's own order, is the
//! match. There is no secondary ranking and no comparison against the query
//! text.

use crate::models::{AlbumMatch, CandidateAlbum, Thumbnail, BROWSE_URL_PREFIX};

/// Select the canonical match among `candidates`, if any is eligible
pub fn select_match(candidates: &[CandidateAlbum]) -> Option<AlbumMatch> {
    candidates.iter().find(|c| c.is_album()).map(to_album_match)
}

/// Reduce a candidate to the metadata kept for the report and audit file
pub fn to_album_match(candidate: &CandidateAlbum) -> AlbumMatch {
    AlbumMatch {
        artists: candidate.artist_names().collect::<Vec<_>>().join(", "),
        title: candidate.title.clone(),
        url: format!("{}{}", BROWSE_URL_PREFIX, candidate.browse_id),
        playlist_id: candidate.playlist_id.clone(),
        year: candidate.year.clone(),
        is_explicit: candidate.is_explicit,
        thumbnail: largest_thumbnail(&candidate.thumbnails).map(|t| t.url.clone()),
    }
}

/// Widest thumbnail; on ties the earliest one wins
///
/// Thumbnails reporting a zero width are never selected.
pub fn largest_thumbnail(thumbnails: &[Thumbnail]) -> Option<&Thumbnail> {
    let mut largest: Option<&Thumbnail> = None;
    let mut largest_width = 0;
    for thumbnail in thumbnails {
        if thumbnail.width > largest_width {
            largest_width = thumbnail.width;
            largest = Some(thumbnail);
        }
    }
    largest
}
