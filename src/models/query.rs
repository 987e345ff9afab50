// src/models/query.rs

//! Engagement and keyword query options.
//!
//! Both queries are validated up front so that malformed options fail before
//! any collaborator is called. Nothing here is silently clamped.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, TimeDelta, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Largest page size the search API accepts.
pub const MAX_PER_PAGE: u32 = 50;

static SINCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*([dhw]?)$").expect("valid since pattern"));

/// Engagement metric used as the primary ranking key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Views,
    Comments,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Views => "views",
            SortKey::Comments => "comments",
        }
    }
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "views" => Ok(SortKey::Views),
            "comments" => Ok(SortKey::Comments),
            other => Err(AppError::validation(format!(
                "unknown sort '{other}' (expected 'views' or 'comments')"
            ))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy for flagging a video as a keyword match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// At least one term was found
    #[default]
    Any,
    /// Every term was found
    All,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Any => "any",
            MatchMode::All => "all",
        }
    }
}

impl FromStr for MatchMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "any" => Ok(MatchMode::Any),
            "all" => Ok(MatchMode::All),
            other => Err(AppError::validation(format!(
                "unknown match mode '{other}' (expected 'any' or 'all')"
            ))),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search, filter and ranking options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementQuery {
    /// Maximum number of search pages to fetch (>= 1)
    pub pages: u32,

    /// Results requested per page (1-50)
    pub per_page: u32,

    /// Result cap applied after ranking (>= 1)
    pub top: usize,

    /// Primary ranking metric
    pub sort: SortKey,

    /// Inclusive lower bound on views
    pub min_views: u64,

    /// Inclusive lower bound on comments
    pub min_comments: u64,

    /// Absolute publish cutoff resolved from a `since` window
    pub since_cutoff: Option<DateTime<Utc>>,
}

impl Default for EngagementQuery {
    fn default() -> Self {
        Self {
            pages: 3,
            per_page: 25,
            top: 10,
            sort: SortKey::Views,
            min_views: 0,
            min_comments: 0,
            since_cutoff: None,
        }
    }
}

impl EngagementQuery {
    /// Resolve a relative window such as `"30d"` against the current time.
    pub fn with_since(self, since: &str) -> Result<Self> {
        self.with_since_at(since, Utc::now())
    }

    /// Resolve a relative window against an explicit reference time.
    pub fn with_since_at(mut self, since: &str, now: DateTime<Utc>) -> Result<Self> {
        self.since_cutoff = match parse_since(since)? {
            Some(window) => Some(now.checked_sub_signed(window).ok_or_else(|| {
                AppError::validation(format!("since window '{since}' reaches past the supported date range"))
            })?),
            None => None,
        };
        Ok(self)
    }

    /// Check option ranges. Called before any page is fetched.
    pub fn validate(&self) -> Result<()> {
        if self.pages == 0 {
            return Err(AppError::validation("pages must be >= 1"));
        }
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(AppError::validation(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}, got {}",
                self.per_page
            )));
        }
        if self.top == 0 {
            return Err(AppError::validation("top must be >= 1"));
        }
        Ok(())
    }
}

/// Parse a relative time window.
///
/// Accepts `<N>d`, `<N>h`, `<N>w` or a bare `<N>` (days). An empty string means
/// no window.
pub fn parse_since(since: &str) -> Result<Option<TimeDelta>> {
    let trimmed = since.trim().to_lowercase();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let invalid = || AppError::validation(format!("invalid since window '{since}'"));
    let caps = SINCE_PATTERN.captures(&trimmed).ok_or_else(invalid)?;
    let amount: i64 = caps[1].parse().map_err(|_| invalid())?;

    let window = match &caps[2] {
        "h" => TimeDelta::try_hours(amount),
        "w" => TimeDelta::try_weeks(amount),
        _ => TimeDelta::try_days(amount),
    };
    window.map(Some).ok_or_else(invalid)
}

/// Keyword mining options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "KeywordQueryFields")]
pub struct KeywordQuery {
    terms: Vec<String>,

    /// Match policy across terms
    pub match_mode: MatchMode,

    /// Number of ranked videos whose comments are scanned
    pub top_videos: usize,

    /// Comment cap per video
    pub comments_per_video: usize,

    /// Cap on sample comments kept per term (display only)
    pub sample_limit: usize,
}

/// Unchecked wire form of [`KeywordQuery`].
#[derive(Deserialize)]
struct KeywordQueryFields {
    terms: Vec<String>,
    #[serde(default)]
    match_mode: MatchMode,
    top_videos: Option<usize>,
    comments_per_video: Option<usize>,
    sample_limit: Option<usize>,
}

impl TryFrom<KeywordQueryFields> for KeywordQuery {
    type Error = AppError;

    fn try_from(fields: KeywordQueryFields) -> Result<Self> {
        let mut query = Self::new(fields.terms, fields.match_mode)?;
        if let Some(n) = fields.top_videos {
            query.top_videos = n;
        }
        if let Some(n) = fields.comments_per_video {
            query.comments_per_video = n;
        }
        if let Some(n) = fields.sample_limit {
            query.sample_limit = n;
        }
        query.validate()?;
        Ok(query)
    }
}

impl KeywordQuery {
    /// Build a query from raw terms.
    ///
    /// Terms are trimmed and lower-cased once here, empty terms are dropped and
    /// duplicates collapse to their first occurrence.
    pub fn new<I, S>(terms: I, match_mode: MatchMode) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let terms: Vec<String> = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .filter(|t| seen.insert(t.clone()))
            .collect();

        if terms.is_empty() {
            return Err(AppError::validation("at least one non-empty term is required"));
        }

        Ok(Self {
            terms,
            match_mode,
            top_videos: 10,
            comments_per_video: 200,
            sample_limit: 3,
        })
    }

    /// Build a query from a comma-separated list such as `"pob, league start"`.
    pub fn from_csv(terms: &str, match_mode: MatchMode) -> Result<Self> {
        Self::new(terms.split(','), match_mode)
    }

    pub fn with_top_videos(mut self, top_videos: usize) -> Self {
        self.top_videos = top_videos;
        self
    }

    pub fn with_comments_per_video(mut self, comments_per_video: usize) -> Self {
        self.comments_per_video = comments_per_video;
        self
    }

    pub fn with_sample_limit(mut self, sample_limit: usize) -> Self {
        self.sample_limit = sample_limit;
        self
    }

    /// Normalized terms in query order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Check option ranges. Called before any comment is fetched.
    pub fn validate(&self) -> Result<()> {
        if self.terms.is_empty() {
            return Err(AppError::validation("at least one non-empty term is required"));
        }
        if self.top_videos == 0 {
            return Err(AppError::validation("top_videos must be >= 1"));
        }
        if self.comments_per_video == 0 {
            return Err(AppError::validation("comments_per_video must be >= 1"));
        }
        Ok(())
    }
}
