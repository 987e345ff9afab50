// src/services/ranker.rs

//! Deterministic engagement ranking.

use std::cmp::Ordering;

use crate::models::{SortKey, VideoRecord};

/// Orders videos by an engagement metric.
///
/// Descending by the metric, then most recent first, then ascending id. The
/// id break makes the order total for distinct videos.
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    sort: SortKey,
}

impl Ranker {
    pub fn new(sort: SortKey) -> Self {
        Self { sort }
    }

    pub fn compare(&self, a: &VideoRecord, b: &VideoRecord) -> Ordering {
        b.metric(self.sort)
            .cmp(&a.metric(self.sort))
            .then_with(|| b.published_at.cmp(&a.published_at))
            .then_with(|| a.video_id.cmp(&b.video_id))
    }

    /// Sort all videos without truncating.
    pub fn sort(&self, mut videos: Vec<VideoRecord>) -> Vec<VideoRecord> {
        videos.sort_by(|a, b| self.compare(a, b));
        videos
    }

    /// Sort, then keep the first `top` videos.
    pub fn rank(&self, videos: Vec<VideoRecord>, top: usize) -> Vec<VideoRecord> {
        let candidates = videos.len();
        let mut ranked = self.sort(videos);
        ranked.truncate(top);
        log::debug!(
            "Ranked {} videos by {}, keeping {}",
            candidates,
            self.sort,
            ranked.len()
        );
        ranked
    }
}

/// Convenience function to rank and truncate videos.
pub fn rank_videos(videos: Vec<VideoRecord>, sort: SortKey, top: usize) -> Vec<VideoRecord> {
    Ranker::new(sort).rank(videos, top)
}
