//! Fetching video metadata from the YouTube Data API

use crate::core::{FieldSet, VideoId};
use crate::error::{FetchErrorKind, Result, TubeMatterError};
use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

/// Source of video metadata
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// Fetch the metadata of one video
    async fn fetch(&self, video_id: &VideoId, api_key: &str) -> Result<FieldSet>;
}

/// Client for the `videos` endpoint of the YouTube Data API v3
pub struct YouTubeClient {
    http: reqwest::Client,
    base_url: String,
}

impl YouTubeClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://www.googleapis.com/youtube/v3";
    const TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Self::TIMEOUT)
            .user_agent(concat!("tubematter/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at another API root (a proxy or a test server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl MetadataFetcher for YouTubeClient {
    async fn fetch(&self, video_id: &VideoId, api_key: &str) -> Result<FieldSet> {
        let url = format!("{}/videos", self.base_url);
        debug!("fetching details for {} from {}", video_id, url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("id", video_id.as_str()),
                ("key", api_key),
                ("part", "snippet,contentDetails"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TubeMatterError::fetch(
                status_kind(status),
                format!("service responded with {status}"),
            ));
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

fn status_kind(status: StatusCode) -> FetchErrorKind {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            FetchErrorKind::Unauthorized
        }
        StatusCode::NOT_FOUND => FetchErrorKind::NotFound,
        _ => FetchErrorKind::Transient,
    }
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    channel_title: String,
    title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
    published_at: Option<String>,
    channel_id: Option<String>,
    default_audio_language: Option<String>,
    description: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

/// Decode a `videos` response body into the first video's fields
pub fn parse_response(body: &str) -> Result<FieldSet> {
    let response: VideoListResponse = serde_json::from_str(body).map_err(|e| {
        TubeMatterError::fetch(FetchErrorKind::Transient, format!("malformed response: {e}"))
    })?;

    let item = response
        .items
        .into_iter()
        .next()
        .ok_or_else(|| TubeMatterError::fetch(FetchErrorKind::NotFound, "no video in response"))?;

    let snippet = item.snippet;
    Ok(FieldSet {
        channel: snippet.channel_title,
        title: snippet.title,
        thumbnail_url: snippet.thumbnails.high.map(|t| t.url),
        published_at: snippet.published_at,
        channel_id: snippet.channel_id,
        default_audio_language: snippet.default_audio_language,
        description: snippet.description,
        tags: snippet.tags,
    })
}
