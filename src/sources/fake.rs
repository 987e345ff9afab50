//! In-memory collaborators for engine tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::error::{AppError, Result};
use crate::models::{CommentBatch, ResultPage, VideoRecord};
use crate::sources::{CommentSource, SearchSource};

/// Timestamp on the given day of January 2025.
pub fn day(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, n, 12, 0, 0).unwrap()
}

pub fn video(id: &str, views: u64, comments: Option<u64>, published_at: DateTime<Utc>) -> VideoRecord {
    VideoRecord {
        video_id: id.to_string(),
        title: format!("Title {id}"),
        channel_title: "Channel".to_string(),
        published_at,
        view_count: views,
        comment_count: comments,
    }
}

/// Serves a fixed list of pages; the last page carries no next token.
pub struct FakeSearch {
    pages: Vec<Vec<VideoRecord>>,
    fail_on_page: Option<usize>,
    requests: Mutex<Vec<(Option<String>, u32)>>,
}

impl FakeSearch {
    pub fn new(pages: Vec<Vec<VideoRecord>>) -> Self {
        Self {
            pages,
            fail_on_page: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail when the page at `index` (0-based) is requested.
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_on_page = Some(index);
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Page tokens and page sizes received, in call order.
    pub fn requests(&self) -> Vec<(Option<String>, u32)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchSource for FakeSearch {
    async fn search_page(
        &self,
        _query: &str,
        page_token: Option<&str>,
        per_page: u32,
    ) -> Result<ResultPage> {
        self.requests
            .lock()
            .unwrap()
            .push((page_token.map(str::to_string), per_page));

        let index = match page_token {
            None => 0,
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| AppError::source("fake search", "bad token"))?,
        };

        if self.fail_on_page == Some(index) {
            return Err(AppError::source(
                format!("fake search page {index}"),
                "quota exceeded",
            ));
        }

        let videos = self.pages.get(index).cloned().unwrap_or_default();
        let next = (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1));
        Ok(ResultPage::new(videos, next))
    }
}

/// Comment behavior for one fake video.
pub enum Thread {
    Texts(Vec<String>),
    Disabled,
    Failing,
    /// Batches served in order; a batch token `"N"` selects batch N.
    Scripted(Vec<CommentBatch>),
}

/// Serves comment batches by slicing per-video text lists.
#[derive(Default)]
pub struct FakeComments {
    threads: HashMap<String, Thread>,
    delays: HashMap<String, Duration>,
    requests: Mutex<Vec<(String, u32)>>,
}

impl FakeComments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_texts(mut self, video_id: &str, texts: &[&str]) -> Self {
        self.threads.insert(
            video_id.to_string(),
            Thread::Texts(texts.iter().map(|t| t.to_string()).collect()),
        );
        self
    }

    pub fn with_thread(mut self, video_id: &str, thread: Thread) -> Self {
        self.threads.insert(video_id.to_string(), thread);
        self
    }

    /// Delay every response for `video_id`.
    pub fn with_delay(mut self, video_id: &str, delay: Duration) -> Self {
        self.delays.insert(video_id.to_string(), delay);
        self
    }

    /// Video ids and batch sizes received, in call order.
    pub fn requests(&self) -> Vec<(String, u32)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommentSource for FakeComments {
    async fn comment_batch(
        &self,
        video_id: &str,
        batch_token: Option<&str>,
        batch_size: u32,
    ) -> Result<CommentBatch> {
        self.requests
            .lock()
            .unwrap()
            .push((video_id.to_string(), batch_size));

        if let Some(delay) = self.delays.get(video_id) {
            tokio::time::sleep(*delay).await;
        }

        match self.threads.get(video_id) {
            None => Ok(CommentBatch::Page {
                texts: Vec::new(),
                next_token: None,
            }),
            Some(Thread::Disabled) => Ok(CommentBatch::Disabled),
            Some(Thread::Failing) => Err(AppError::source(
                format!("fake comments {video_id}"),
                "video unavailable",
            )),
            Some(Thread::Scripted(batches)) => {
                let index: usize = batch_token.and_then(|t| t.parse().ok()).unwrap_or(0);
                Ok(batches.get(index).cloned().unwrap_or(CommentBatch::Page {
                    texts: Vec::new(),
                    next_token: None,
                }))
            }
            Some(Thread::Texts(texts)) => {
                let offset: usize = batch_token.and_then(|t| t.parse().ok()).unwrap_or(0);
                let end = (offset + batch_size as usize).min(texts.len());
                let next_token = (end < texts.len()).then(|| end.to_string());
                Ok(CommentBatch::Page {
                    texts: texts[offset.min(end)..end].to_vec(),
                    next_token,
                })
            }
        }
    }
}
