//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{EngagementQuery, KeywordQuery, MatchMode, SortKey};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// API endpoint and credential
    #[serde(default)]
    pub api: ApiConfig,

    /// HTTP client behavior
    #[serde(default)]
    pub client: ClientConfig,

    /// Defaults for search/rank runs
    #[serde(default)]
    pub search: SearchDefaults,

    /// Defaults for keyword analysis runs
    #[serde(default)]
    pub keywords: KeywordDefaults,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::validation("api.base_url is empty"));
        }
        if self.client.user_agent.trim().is_empty() {
            return Err(AppError::validation("client.user_agent is empty"));
        }
        if self.client.timeout_secs == 0 {
            return Err(AppError::validation("client.timeout_secs must be > 0"));
        }
        if self.client.max_concurrent == 0 {
            return Err(AppError::validation("client.max_concurrent must be > 0"));
        }
        if !(1..=100).contains(&self.client.comment_batch_size) {
            return Err(AppError::validation(
                "client.comment_batch_size must be between 1 and 100",
            ));
        }
        self.engagement_query().validate()?;
        if self.keywords.top_videos == 0 {
            return Err(AppError::validation("keywords.top_videos must be > 0"));
        }
        if self.keywords.comments_per_video == 0 {
            return Err(AppError::validation(
                "keywords.comments_per_video must be > 0",
            ));
        }
        Ok(())
    }

    /// Engagement query seeded from the `[search]` section.
    pub fn engagement_query(&self) -> EngagementQuery {
        EngagementQuery {
            pages: self.search.pages,
            per_page: self.search.per_page,
            top: self.search.top,
            sort: self.search.sort,
            ..EngagementQuery::default()
        }
    }

    /// Keyword query for `terms` seeded from the `[keywords]` section.
    pub fn keyword_query(&self, terms: &str) -> Result<KeywordQuery> {
        Ok(KeywordQuery::from_csv(terms, self.keywords.match_mode)?
            .with_top_videos(self.keywords.top_videos)
            .with_comments_per_video(self.keywords.comments_per_video)
            .with_sample_limit(self.keywords.sample_limit))
    }
}

/// Search API endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API key; the `YOUTUBE_API_KEY` environment variable takes precedence
    #[serde(default)]
    pub key: Option<String>,

    /// Base URL of the Data API
    #[serde(default = "defaults::base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: None,
            base_url: defaults::base_url(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Videos whose comments are fetched at the same time
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Comments requested per batch (API maximum is 100)
    #[serde(default = "defaults::comment_batch_size")]
    pub comment_batch_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
            comment_batch_size: defaults::comment_batch_size(),
        }
    }
}

/// Defaults for the `search` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDefaults {
    #[serde(default = "defaults::pages")]
    pub pages: u32,

    #[serde(default = "defaults::per_page")]
    pub per_page: u32,

    #[serde(default = "defaults::top")]
    pub top: usize,

    #[serde(default)]
    pub sort: SortKey,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            pages: defaults::pages(),
            per_page: defaults::per_page(),
            top: defaults::top(),
            sort: SortKey::default(),
        }
    }
}

/// Defaults for the `comment-terms` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordDefaults {
    #[serde(default)]
    pub match_mode: MatchMode,

    #[serde(default = "defaults::top_videos")]
    pub top_videos: usize,

    #[serde(default = "defaults::comments_per_video")]
    pub comments_per_video: usize,

    #[serde(default = "defaults::sample_limit")]
    pub sample_limit: usize,
}

impl Default for KeywordDefaults {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::default(),
            top_videos: defaults::top_videos(),
            comments_per_video: defaults::comments_per_video(),
            sample_limit: defaults::sample_limit(),
        }
    }
}

mod defaults {
    // API defaults
    pub fn base_url() -> String {
        "https://www.googleapis.com/youtube/v3".into()
    }

    // Client defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; yt-radar/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        4
    }
    pub fn comment_batch_size() -> u32 {
        100
    }

    // Search defaults
    pub fn pages() -> u32 {
        3
    }
    pub fn per_page() -> u32 {
        25
    }
    pub fn top() -> usize {
        10
    }

    // Keyword defaults
    pub fn top_videos() -> usize {
        10
    }
    pub fn comments_per_video() -> usize {
        200
    }
    pub fn sample_limit() -> usize {
        3
    }
}
