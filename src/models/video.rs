// src/models/video.rs

//! Video and comment records produced by the collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::SortKey;

/// A video returned by the search collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoRecord {
    /// Platform identifier, unique per video
    pub video_id: String,

    /// Video title
    pub title: String,

    /// Uploading channel's display name
    #[serde(default)]
    pub channel_title: String,

    /// Publish timestamp
    pub published_at: DateTime<Utc>,

    /// View count
    pub view_count: u64,

    /// Comment count (absent when comments are disabled)
    #[serde(default)]
    pub comment_count: Option<u64>,
}

impl VideoRecord {
    /// Watch page for this video.
    pub fn url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }

    /// Value of the given engagement metric. An absent comment count ranks as zero.
    pub fn metric(&self, key: SortKey) -> u64 {
        match key {
            SortKey::Views => self.view_count,
            SortKey::Comments => self.comment_count.unwrap_or(0),
        }
    }
}

/// A single top-level comment fetched for a video.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentRecord {
    /// Video the comment belongs to
    pub video_id: String,

    /// Raw comment text as returned by the source
    pub text: String,
}

impl CommentRecord {
    pub fn new(video_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            text: text.into(),
        }
    }
}
