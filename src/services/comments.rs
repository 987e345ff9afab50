// src/services/comments.rs

//! Comment fetching service.
//!
//! Pulls comment batches for ranked videos until the per-video cap is reached
//! or the source runs dry.

use futures::stream::{self, StreamExt};

use crate::error::Result;
use crate::models::{CommentBatch, CommentRecord, VideoRecord};
use crate::sources::CommentSource;

/// Largest batch the comment API serves.
pub const MAX_BATCH_SIZE: u32 = 100;

/// Consecutive empty batches tolerated before a token chain is abandoned.
const MAX_EMPTY_BATCHES: usize = 3;

/// Comments collected for one video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentFetch {
    /// Comments in source order, at most the requested count
    Fetched(Vec<CommentRecord>),
    /// The source reported comments as turned off
    Disabled,
}

/// Service for fetching comment text through a [`CommentSource`].
pub struct CommentFetcher<'a> {
    source: &'a dyn CommentSource,
    batch_size: u32,
}

impl<'a> CommentFetcher<'a> {
    pub fn new(source: &'a dyn CommentSource) -> Self {
        Self {
            source,
            batch_size: MAX_BATCH_SIZE,
        }
    }

    /// Override the per-request batch size (capped at [`MAX_BATCH_SIZE`]).
    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size.clamp(1, MAX_BATCH_SIZE);
        self
    }

    /// Fetch up to `limit` comments for `video`.
    ///
    /// A disabled signal on the first batch yields [`CommentFetch::Disabled`];
    /// later it simply ends collection. Collection otherwise runs until the
    /// source returns no next token.
    pub async fn fetch(&self, video: &VideoRecord, limit: usize) -> Result<CommentFetch> {
        let mut comments: Vec<CommentRecord> = Vec::new();
        let mut token: Option<String> = None;
        let mut empty_batches = 0;

        while comments.len() < limit {
            let remaining = limit - comments.len();
            let request_size = u32::try_from(remaining)
                .unwrap_or(u32::MAX)
                .min(self.batch_size);

            let batch = self
                .source
                .comment_batch(&video.video_id, token.as_deref(), request_size)
                .await
                .map_err(|e| e.into_source(format!("comments for {}", video.video_id)))?;

            let (texts, next_token) = match batch {
                CommentBatch::Disabled if comments.is_empty() => {
                    log::debug!("Comments disabled for {}", video.video_id);
                    return Ok(CommentFetch::Disabled);
                }
                CommentBatch::Disabled => break,
                CommentBatch::Page { texts, next_token } => (texts, next_token),
            };

            log::debug!(
                "Fetched {} comments for {} ({} so far)",
                texts.len(),
                video.video_id,
                comments.len() + texts.len().min(remaining)
            );

            if texts.is_empty() {
                empty_batches += 1;
            } else {
                empty_batches = 0;
            }
            comments.extend(
                texts
                    .into_iter()
                    .take(remaining)
                    .map(|text| CommentRecord::new(&video.video_id, text)),
            );

            token = next_token;
            if token.is_none() {
                break;
            }
            if empty_batches >= MAX_EMPTY_BATCHES {
                log::warn!(
                    "Giving up on comments for {} after {} empty batches",
                    video.video_id,
                    empty_batches
                );
                break;
            }
        }

        Ok(CommentFetch::Fetched(comments))
    }

    /// Fetch comments for several videos with bounded concurrency.
    ///
    /// Results line up with `videos` regardless of completion order. Each
    /// video's failure is kept in its own slot.
    pub async fn fetch_many(
        &self,
        videos: &[VideoRecord],
        limit: usize,
        concurrency: usize,
    ) -> Vec<Result<CommentFetch>> {
        stream::iter(videos)
            .map(|video| self.fetch(video, limit))
            .buffered(concurrency.max(1))
            .collect()
            .await
    }
}
