// src/models/page.rs

//! Raw pages handed back by the search and comment collaborators.

use crate::models::VideoRecord;

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultPage {
    /// Records in source order
    pub videos: Vec<VideoRecord>,

    /// Token for the following page, `None` once results are exhausted
    pub next_page_token: Option<String>,
}

impl ResultPage {
    pub fn new(videos: Vec<VideoRecord>, next_page_token: Option<String>) -> Self {
        Self {
            videos,
            next_page_token,
        }
    }

    pub fn is_last(&self) -> bool {
        self.next_page_token.is_none()
    }
}

/// One batch of comment text for a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentBatch {
    /// Comment texts in source order plus the token for the next batch
    Page {
        texts: Vec<String>,
        next_token: Option<String>,
    },
    /// Comments are turned off for the video. Distinct from an empty page.
    Disabled,
}
