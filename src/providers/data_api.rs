// Structured metadata provider backed by the YouTube Data API v3

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::build_client;
use crate::extractor::errors::ProviderError;
use crate::extractor::models::{RawMetadata, Thumbnails, VideoId};
use crate::extractor::traits::{ExtractorConfig, MetadataProvider};

const VIDEOS_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/videos";
const VIDEO_PARTS: &str = "snippet,statistics,contentDetails,status";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// `videos.list` client authenticated with an API key
pub struct DataApiClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl DataApiClient {
    pub fn new(api_key: String, config: &ExtractorConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(config)?,
            api_key,
            endpoint: VIDEOS_ENDPOINT.to_string(),
        })
    }

    /// Point the client at a different `videos` endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl MetadataProvider for DataApiClient {
    fn name(&self) -> &'static str {
        "youtube-data-api-v3"
    }

    async fn fetch(&self, id: &VideoId) -> Result<RawMetadata, ProviderError> {
        debug!(video_id = %id, "Querying videos.list");

        let response = self
            .client
            .get(&self.endpoint)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .query(&[("part", VIDEO_PARTS), ("id", id.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                code: status.as_u16(),
                message: api_error_message(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
            });
        }

        parse_video_list(&body, id)
    }
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoResource {
    snippet: Option<Snippet>,
    statistics: Option<Statistics>,
    content_details: Option<ContentDetails>,
    status: Option<Status>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: Option<String>,
    description: Option<String>,
    channel_title: Option<String>,
    published_at: Option<String>,
    thumbnails: Option<ThumbnailSet>,
}

#[derive(Debug, Deserialize)]
struct ThumbnailSet {
    default: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    view_count: Option<String>,
    like_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Status {
    privacy_status: Option<String>,
    upload_status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    reason: Option<String>,
}

/// Parse a `videos.list` body into a provider-neutral payload
fn parse_video_list(body: &str, id: &VideoId) -> Result<RawMetadata, ProviderError> {
    let list: VideoListResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::Parse(format!("Invalid JSON from Data API: {}", e)))?;

    let video = list
        .items
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::NotFound(id.to_string()))?;

    let snippet = video.snippet;
    let thumbnails = snippet
        .as_ref()
        .and_then(|s| s.thumbnails.as_ref())
        .map(|t| Thumbnails {
            default: t.default.as_ref().map(|th| th.url.clone()),
            medium: t.medium.as_ref().map(|th| th.url.clone()),
            high: t.high.as_ref().map(|th| th.url.clone()),
        })
        .unwrap_or_default();
    let (title, description, channel_title, published_at) = match snippet {
        Some(s) => (s.title, s.description, s.channel_title, s.published_at),
        None => (None, None, None, None),
    };
    let (view_count, like_count) = match video.statistics {
        Some(s) => (s.view_count, s.like_count),
        None => (None, None),
    };
    let (privacy_status, upload_status) = match video.status {
        Some(s) => (s.privacy_status, s.upload_status),
        None => (None, None),
    };

    Ok(RawMetadata {
        title,
        description,
        duration_code: video.content_details.and_then(|c| c.duration),
        thumbnails,
        channel_title,
        published_at,
        view_count,
        like_count,
        privacy_status,
        upload_status,
    })
}

/// Pull `error.message` (and the first reason) out of an API error body
fn api_error_message(body: &str) -> Option<String> {
    let envelope: ApiErrorEnvelope = serde_json::from_str(body).ok()?;
    let message = envelope.error.message?;
    match envelope.error.errors.into_iter().find_map(|d| d.reason) {
        Some(reason) => Some(format!("{} ({})", message, reason)),
        None => Some(message),
    }
}
