//! YouTube Music search response parsing
//!
//! Album results arrive as `musicResponsiveListItemRenderer` items inside
//! `musicShelfRenderer` sections. The second flex column carries the result
//! kind, the artist credits and the year, separated by `" • "` runs:
//!
//! ```text
//! "Album" " • " "Artist A" ", " "Artist B" " • " "1997"
//! ```

use crate::models::{CandidateAlbum, CandidateArtist, Thumbnail};
use serde_json::Value;
use thiserror::Error;

const GROUP_SEPARATOR: &str = " • ";
const EXPLICIT_BADGE_LABEL: &str = "Explicit";

const TABS: &str = "/contents/tabbedSearchResultsRenderer/tabs";
const TAB_SECTIONS: &str = "/tabRenderer/content/sectionListRenderer/contents";
const UNTABBED_SECTIONS: &str = "/contents/sectionListRenderer/contents";
const SHELF_ITEMS: &str = "/musicShelfRenderer/contents";
const BROWSE_ID: &str = "/navigationEndpoint/browseEndpoint/browseId";
const PLAYLIST_ID: &str = "/overlay/musicItemThumbnailOverlayRenderer/content/musicPlayButtonRenderer/playNavigationEndpoint/watchPlaylistEndpoint/playlistId";
const THUMBNAILS: &str = "/thumbnail/musicThumbnailRenderer/thumbnail/thumbnails";
const BADGE_LABEL: &str = "/musicInlineBadgeRenderer/accessibilityData/accessibilityData/label";

/// Response did not have the layout of a search result page
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unexpected search response layout: {0}")]
pub struct LayoutError(pub String);

/// Extract candidates, in service order, from a search response body
///
/// A page without result shelves (the service's "no results" page) yields an
/// empty list. Items without a title or browse id are skipped.
pub fn parse_search_response(response: &Value) -> Result<Vec<CandidateAlbum>, LayoutError> {
    let sections = section_contents(response)
        .ok_or_else(|| LayoutError("missing section list".to_string()))?;

    let candidates = sections
        .iter()
        .filter_map(|section| section.pointer(SHELF_ITEMS).and_then(Value::as_array))
        .flatten()
        .filter_map(|item| item.get("musicResponsiveListItemRenderer"))
        .filter_map(parse_list_item)
        .collect();

    Ok(candidates)
}

fn section_contents(response: &Value) -> Option<&Vec<Value>> {
    match response.pointer(TABS).and_then(Value::as_array) {
        Some(tabs) => tabs
            .iter()
            .find_map(|tab| tab.pointer(TAB_SECTIONS))
            .and_then(Value::as_array),
        None => response.pointer(UNTABBED_SECTIONS).and_then(Value::as_array),
    }
}

fn parse_list_item(renderer: &Value) -> Option<CandidateAlbum> {
    let title = flex_column_runs(renderer, 0)
        .first()
        .and_then(run_text)?
        .to_string();
    let browse_id = renderer.pointer(BROWSE_ID).and_then(Value::as_str)?.to_string();

    let groups = split_groups(flex_column_runs(renderer, 1));
    let kind = groups
        .first()
        .map(|runs| runs.iter().filter_map(|r| run_text(r)).collect::<String>())
        .unwrap_or_default();
    let artists = groups.get(1).map(|runs| parse_artists(runs)).unwrap_or_default();
    let year = if groups.len() > 2 {
        groups.last().and_then(|runs| parse_year(runs))
    } else {
        None
    };

    Some(CandidateAlbum {
        kind,
        title,
        artists,
        browse_id,
        playlist_id: renderer
            .pointer(PLAYLIST_ID)
            .and_then(Value::as_str)
            .map(str::to_string),
        year,
        is_explicit: Some(has_explicit_badge(renderer)),
        thumbnails: parse_thumbnails(renderer),
    })
}

fn flex_column_runs(renderer: &Value, column: usize) -> &[Value] {
    renderer
        .get("flexColumns")
        .and_then(|c| c.get(column))
        .and_then(|c| c.pointer("/musicResponsiveListItemFlexColumnRenderer/text/runs"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn run_text(run: &Value) -> Option<&str> {
    run.get("text").and_then(Value::as_str)
}

fn split_groups(runs: &[Value]) -> Vec<&[Value]> {
    if runs.is_empty() {
        return Vec::new();
    }
    runs.split(|run| run_text(run) == Some(GROUP_SEPARATOR)).collect()
}

fn parse_artists(runs: &[Value]) -> Vec<CandidateArtist> {
    runs.iter()
        .filter_map(|run| {
            let name = run_text(run)?;
            if is_joiner(name) {
                return None;
            }
            Some(CandidateArtist {
                name: name.to_string(),
                id: run
                    .pointer(BROWSE_ID)
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
        })
        .collect()
}

fn is_joiner(text: &str) -> bool {
    matches!(text.trim(), "" | "," | "&")
}

fn parse_year(runs: &[Value]) -> Option<String> {
    let text: String = runs.iter().filter_map(|r| run_text(r)).collect();
    let text = text.trim();
    (text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit())).then(|| text.to_string())
}

fn has_explicit_badge(renderer: &Value) -> bool {
    renderer
        .get("badges")
        .and_then(Value::as_array)
        .map(|badges| {
            badges
                .iter()
                .any(|b| b.pointer(BADGE_LABEL).and_then(Value::as_str) == Some(EXPLICIT_BADGE_LABEL))
        })
        .unwrap_or(false)
}

fn parse_thumbnails(renderer: &Value) -> Vec<Thumbnail> {
    renderer
        .pointer(THUMBNAILS)
        .and_then(Value::as_array)
        .map(|thumbs| {
            thumbs
                .iter()
                .filter_map(|t| {
                    Some(Thumbnail {
                        url: t.get("url")?.as_str()?.to_string(),
                        width: dimension(t, "width"),
                        height: dimension(t, "height"),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn dimension(thumbnail: &Value, key: &str) -> u32 {
    thumbnail
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    fn text_run(text: &str) -> Value {
        json!({ "text": text })
    }

    fn artist_run(name: &str, channel: &str) -> Value {
        json!({
            "text": name,
            "navigationEndpoint": { "browseEndpoint": { "browseId": channel } }
        })
    }

    /// One album list item in the shape the service returns
    pub fn list_item(
        kind: &str,
        title: &str,
        artists: &[&str],
        year: Option<&str>,
        browse_id: &str,
        explicit: bool,
    ) -> Value {
        let mut runs = vec![text_run(kind), text_run(" • ")];
        for (i, artist) in artists.iter().enumerate() {
            if i > 0 {
                runs.push(text_run(", "));
            }
            runs.push(artist_run(artist, &format!("UC{}", i)));
        }
        if let Some(year) = year {
            runs.push(text_run(" • "));
            runs.push(text_run(year));
        }

        let mut item = json!({
            "musicResponsiveListItemRenderer": {
                "thumbnail": { "musicThumbnailRenderer": { "thumbnail": { "thumbnails": [
                    { "url": format!("https://lh3.example/{}=w60-h60", browse_id), "width": 60, "height": 60 },
                    { "url": format!("https://lh3.example/{}=w544-h544", browse_id), "width": 544, "height": 544 },
                    { "url": format!("https://lh3.example/{}=w226-h226", browse_id), "width": 226, "height": 226 }
                ] } } },
                "overlay": { "musicItemThumbnailOverlayRenderer": { "content": { "musicPlayButtonRenderer": {
                    "playNavigationEndpoint": { "watchPlaylistEndpoint": { "playlistId": format!("OLAK5uy_{}", browse_id) } }
                } } } },
                "flexColumns": [
                    { "musicResponsiveListItemFlexColumnRenderer": { "text": { "runs": [ { "text": title } ] } } },
                    { "musicResponsiveListItemFlexColumnRenderer": { "text": { "runs": runs } } }
                ],
                "navigationEndpoint": { "browseEndpoint": { "browseId": browse_id } }
            }
        });

        if explicit {
            item["musicResponsiveListItemRenderer"]["badges"] = json!([
                { "musicInlineBadgeRenderer": { "accessibilityData": { "accessibilityData": { "label": "Explicit" } } } }
            ]);
        }
        item
    }

    /// Full search response wrapping `items` in one shelf
    pub fn search_response(items: Vec<Value>) -> Value {
        json!({
            "contents": { "tabbedSearchResultsRenderer": { "tabs": [ { "tabRenderer": {
                "content": { "sectionListRenderer": { "contents": [
                    { "musicShelfRenderer": { "contents": items } }
                ] } }
            } } ] } }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{list_item, search_response};
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_album_item() {
        let response = search_response(vec![list_item(
            "Album",
            "OK Computer",
            &["Radiohead"],
            Some("1997"),
            "MPREb_ok",
            false,
        )]);

        let candidates = parse_search_response(&response).unwrap();
        assert_eq!(candidates.len(), 1);

        let album = &candidates[0];
        assert_eq!(album.kind, "Album");
        assert_eq!(album.title, "OK Computer");
        assert_eq!(album.browse_id, "MPREb_ok");
        assert_eq!(album.year.as_deref(), Some("1997"));
        assert_eq!(album.playlist_id.as_deref(), Some("OLAK5uy_MPREb_ok"));
        assert_eq!(album.is_explicit, Some(false));
        assert_eq!(album.artists.len(), 1);
        assert_eq!(album.artists[0].name, "Radiohead");
        assert_eq!(album.artists[0].id.as_deref(), Some("UC0"));
        assert_eq!(album.thumbnails.len(), 3);
        assert_eq!(album.thumbnails[1].width, 544);
    }

    #[test]
    fn test_multiple_artists_and_explicit_badge() {
        let response = search_response(vec![list_item(
            "Album",
            "Watch the Throne",
            &["JAY-Z", "Kanye West"],
            Some("2011"),
            "MPREb_wtt",
            true,
        )]);

        let album = &parse_search_response(&response).unwrap()[0];
        assert_eq!(
            album.artist_names().collect::<Vec<_>>(),
            vec!["JAY-Z", "Kanye West"]
        );
        assert_eq!(album.is_explicit, Some(true));
    }

    #[test]
    fn test_missing_year_is_absent() {
        let response = search_response(vec![list_item("EP", "Demo", &["Band"], None, "MPREb_d", false)]);

        let album = &parse_search_response(&response).unwrap()[0];
        assert_eq!(album.kind, "EP");
        assert!(album.year.is_none());
        assert_eq!(album.artists[0].name, "Band");
    }

    #[test]
    fn test_service_order_preserved() {
        let response = search_response(vec![
            list_item("Single", "One", &["A"], Some("2001"), "MPREb_1", false),
            list_item("Album", "Two", &["A"], Some("2002"), "MPREb_2", false),
        ]);

        let kinds: Vec<_> = parse_search_response(&response)
            .unwrap()
            .into_iter()
            .map(|c| c.kind)
            .collect();
        assert_eq!(kinds, vec!["Single", "Album"]);
    }

    #[test]
    fn test_item_without_browse_id_skipped() {
        let mut item = list_item("Album", "X", &["A"], None, "MPREb_x", false);
        item["musicResponsiveListItemRenderer"]
            .as_object_mut()
            .unwrap()
            .remove("navigationEndpoint");

        let response = search_response(vec![item]);
        assert!(parse_search_response(&response).unwrap().is_empty());
    }

    #[test]
    fn test_no_results_page_is_empty() {
        let response = json!({
            "contents": { "tabbedSearchResultsRenderer": { "tabs": [ { "tabRenderer": {
                "content": { "sectionListRenderer": { "contents": [
                    { "itemSectionRenderer": { "contents": [ { "messageRenderer": {} } ] } }
                ] } }
            } } ] } }
        });
        assert!(parse_search_response(&response).unwrap().is_empty());
    }

    #[test]
    fn test_untabbed_layout() {
        let response = json!({
            "contents": { "sectionListRenderer": { "contents": [
                { "musicShelfRenderer": { "contents": [
                    list_item("Album", "X", &["A"], Some("1990"), "MPREb_x", false)
                ] } }
            ] } }
        });
        assert_eq!(parse_search_response(&response).unwrap().len(), 1);
    }

    #[test]
    fn test_unexpected_layout_is_error() {
        assert!(parse_search_response(&json!({ "error": "nope" })).is_err());
    }

    #[test]
    fn test_layout_error_is_std_error() {
        let err = parse_search_response(&json!({})).unwrap_err();
        let as_std: &dyn std::error::Error = &err;
        assert_eq!(
            as_std.to_string(),
            "unexpected search response layout: missing section list"
        );
    }
}
