//! YouTube Music search client
//!
//! Talks to the web client API (`/youtubei/v1/search`) with the albums
//! filter. No authentication; the service's rate limits are respected by the
//! caller's [`RateLimit`](crate::services::RateLimit).

use crate::models::CandidateAlbum;
use crate::services::catalog_search::{AlbumSearch, SearchError};
use crate::services::ytmusic_parser::parse_search_response;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

pub const YTMUSIC_BASE_URL: &str = "https://music.youtube.com";
const SEARCH_PATH: &str = "/youtubei/v1/search?alt=json&prettyPrint=false";
const CLIENT_NAME: &str = "WEB_REMIX";
const CLIENT_VERSION: &str = "1.20240918.01.00";
/// Search params selecting the "Albums" result filter
const ALBUMS_FILTER_PARAMS: &str = "EgWKAQIYAWoMEA4QChADEAQQCRAF";
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Connection settings for [`YtMusicClient`]
#[derive(Debug, Clone)]
pub struct YtMusicConfig {
    pub base_url: String,
    pub language: String,
    pub timeout: Duration,
}

impl Default for YtMusicConfig {
    fn default() -> Self {
        Self {
            base_url: YTMUSIC_BASE_URL.to_string(),
            language: "en".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// YouTube Music album search
pub struct YtMusicClient {
    http_client: reqwest::Client,
    config: YtMusicConfig,
}

impl YtMusicClient {
    pub fn new(config: YtMusicConfig) -> Result<Self, SearchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    fn request_body(&self, query: &str) -> Value {
        json!({
            "context": {
                "client": {
                    "clientName": CLIENT_NAME,
                    "clientVersion": CLIENT_VERSION,
                    "hl": self.config.language,
                },
                "user": {}
            },
            "query": query,
            "params": ALBUMS_FILTER_PARAMS,
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> SearchError {
    if e.is_timeout() {
        SearchError::Timeout
    } else {
        SearchError::Network(e.to_string())
    }
}

#[async_trait]
impl AlbumSearch for YtMusicClient {
    async fn search_albums(&self, query: &str) -> Result<Vec<CandidateAlbum>, SearchError> {
        let url = format!("{}{}", self.config.base_url, SEARCH_PATH);

        tracing::debug!(query = %query, url = %url, "Querying YouTube Music");

        let response = self
            .http_client
            .post(&url)
            .header(reqwest::header::ORIGIN, self.config.base_url.as_str())
            .json(&self.request_body(query))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SearchError::Api(status.as_u16(), error_text));
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Timeout
            } else {
                SearchError::Parse(e.to_string())
            }
        })?;

        parse_search_response(&body).map_err(|e| SearchError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(YtMusicClient::new(YtMusicConfig::default()).is_ok());
    }

    #[test]
    fn test_request_body() {
        let client = YtMusicClient::new(YtMusicConfig {
            language: "fr".to_string(),
            ..Default::default()
        })
        .unwrap();

        let body = client.request_body("Air, Moon Safari");
        assert_eq!(body["query"], "Air, Moon Safari");
        assert_eq!(body["params"], ALBUMS_FILTER_PARAMS);
        assert_eq!(body["context"]["client"]["clientName"], "WEB_REMIX");
        assert_eq!(body["context"]["client"]["hl"], "fr");
    }
}
