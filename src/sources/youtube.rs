//! YouTube Data API v3 implementation of the search and comment sources.
//!
//! Search hydrates each page of ids through `videos.list` so the engine gets
//! statistics in one record. The API key is injected at construction and is
//! never logged.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{CommentBatch, Config, ResultPage, VideoRecord};
use crate::sources::{CommentSource, SearchSource};
use crate::utils::http::create_async_client;

/// `videos.list` accepts at most this many ids per request.
const VIDEOS_PER_REQUEST: usize = 50;

/// Client for the YouTube Data API.
#[derive(Clone)]
pub struct YouTubeApi {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YouTubeApi {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Build a client from the `[api]` and `[client]` config sections.
    pub fn from_config(config: &Config, api_key: impl Into<String>) -> Result<Self> {
        let client = create_async_client(&config.client)?;
        Ok(Self::new(client, config.api.base_url.clone(), api_key))
    }

    fn endpoint(&self, resource: &str, params: &[(&str, &str)]) -> Result<Url> {
        let base = format!("{}/{}", self.base_url.trim_end_matches('/'), resource);
        let mut url = Url::parse_with_params(&base, params)?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    /// GET `url` and decode the body, or describe the API failure.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<std::result::Result<T, ApiFailure>> {
        // Strip the URL from transport errors so the key never reaches logs.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.without_url())?;
        let status = response.status();
        let body = response.text().await.map_err(|e| e.without_url())?;

        if status.is_success() {
            Ok(Ok(serde_json::from_str(&body)?))
        } else {
            Ok(Err(ApiFailure::from_body(status, &body)))
        }
    }

    /// Hydrate ids into records, keeping the order of `ids`.
    ///
    /// Ids the API no longer knows about (deleted or private videos) are dropped.
    async fn fetch_videos(&self, ids: &[String]) -> Result<Vec<VideoRecord>> {
        let mut by_id: HashMap<String, VideoRecord> = HashMap::with_capacity(ids.len());

        for chunk in ids.chunks(VIDEOS_PER_REQUEST) {
            let joined = chunk.join(",");
            let url = self.endpoint(
                "videos",
                &[("part", "snippet,statistics"), ("id", joined.as_str())],
            )?;
            let response: VideoListResponse = self
                .get_json(url)
                .await?
                .map_err(|failure| failure.into_error("videos.list"))?;

            for item in response.items {
                let record = item.into_record()?;
                by_id.insert(record.video_id.clone(), record);
            }
        }

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}

#[async_trait]
impl SearchSource for YouTubeApi {
    async fn search_page(
        &self,
        query: &str,
        page_token: Option<&str>,
        per_page: u32,
    ) -> Result<ResultPage> {
        let max_results = per_page.to_string();
        let mut params = vec![
            ("part", "id"),
            ("type", "video"),
            ("q", query),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let url = self.endpoint("search", &params)?;
        let response: SearchListResponse = self
            .get_json(url)
            .await?
            .map_err(|failure| failure.into_error("search.list"))?;

        let ids: Vec<String> = response
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect();
        log::debug!("search.list returned {} video ids", ids.len());

        let videos = self.fetch_videos(&ids).await?;
        Ok(ResultPage::new(videos, response.next_page_token))
    }
}

#[async_trait]
impl CommentSource for YouTubeApi {
    async fn comment_batch(
        &self,
        video_id: &str,
        batch_token: Option<&str>,
        batch_size: u32,
    ) -> Result<CommentBatch> {
        let max_results = batch_size.to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("videoId", video_id),
            ("maxResults", max_results.as_str()),
            ("textFormat", "plainText"),
            ("order", "relevance"),
        ];
        if let Some(token) = batch_token {
            params.push(("pageToken", token));
        }

        let url = self.endpoint("commentThreads", &params)?;
        match self.get_json::<CommentThreadListResponse>(url).await? {
            Ok(response) => Ok(CommentBatch::Page {
                texts: response.texts(),
                next_token: response.next_page_token,
            }),
            Err(failure) if failure.is_comments_disabled() => Ok(CommentBatch::Disabled),
            Err(failure) => Err(failure.into_error(format!("commentThreads.list {video_id}"))),
        }
    }
}

/// Parse a statistics counter. The API sends counts as strings.
fn parse_count(value: &str) -> u64 {
    value.trim().parse().unwrap_or(0)
}

/// Non-success API reply.
#[derive(Debug, Clone)]
struct ApiFailure {
    status: StatusCode,
    reason: Option<String>,
    message: String,
}

impl ApiFailure {
    fn from_body(status: StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorEnvelope>(body) {
            Ok(envelope) => Self {
                status,
                reason: envelope
                    .error
                    .errors
                    .into_iter()
                    .find_map(|detail| detail.reason),
                message: envelope.error.message.unwrap_or_default(),
            },
            Err(_) => Self {
                status,
                reason: None,
                message: body.chars().take(200).collect(),
            },
        }
    }

    fn is_comments_disabled(&self) -> bool {
        self.status == StatusCode::FORBIDDEN && self.reason.as_deref() == Some("commentsDisabled")
    }

    fn into_error(self, context: impl Into<String>) -> AppError {
        let reason = self
            .reason
            .map(|r| format!(" ({r})"))
            .unwrap_or_default();
        AppError::source(
            context,
            format!("HTTP {}{}: {}", self.status.as_u16(), reason, self.message),
        )
    }
}

// --- Wire types ---

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchListResponse {
    #[serde(default)]
    next_page_token: Option<String>,
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    #[serde(default)]
    snippet: VideoSnippet,
    #[serde(default)]
    statistics: VideoStatistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoSnippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    published_at: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    #[serde(default)]
    view_count: Option<String>,
    // Missing when comments are disabled
    #[serde(default)]
    comment_count: Option<String>,
}

impl VideoItem {
    fn into_record(self) -> Result<VideoRecord> {
        let published_at = DateTime::parse_from_rfc3339(&self.snippet.published_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                AppError::source(
                    format!("videos.list {}", self.id),
                    format!("bad publishedAt {:?}: {e}", self.snippet.published_at),
                )
            })?;

        Ok(VideoRecord {
            video_id: self.id,
            title: self.snippet.title,
            channel_title: self.snippet.channel_title,
            published_at,
            view_count: self.statistics.view_count.as_deref().map_or(0, parse_count),
            comment_count: self.statistics.comment_count.as_deref().map(parse_count),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadListResponse {
    #[serde(default)]
    next_page_token: Option<String>,
    #[serde(default)]
    items: Vec<CommentThreadItem>,
}

impl CommentThreadListResponse {
    /// Non-empty top-level comment texts in response order.
    fn texts(&self) -> Vec<String> {
        self.items
            .iter()
            .filter_map(|item| item.snippet.top_level_comment.snippet.text_display.clone())
            .filter(|text| !text.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct CommentThreadItem {
    #[serde(default)]
    snippet: CommentThreadSnippet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadSnippet {
    #[serde(default)]
    top_level_comment: TopLevelComment,
}

#[derive(Debug, Default, Deserialize)]
struct TopLevelComment {
    #[serde(default)]
    snippet: CommentSnippet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    #[serde(default)]
    text_display: Option<String>,
}
