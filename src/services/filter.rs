// src/services/filter.rs

//! Engagement predicates applied to aggregated search results.

use crate::models::{EngagementQuery, VideoRecord};

/// Keeps videos meeting every threshold in an [`EngagementQuery`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EngagementFilter;

impl EngagementFilter {
    pub fn new() -> Self {
        Self
    }

    /// Check one video against all predicates.
    ///
    /// An absent comment count only fails when `min_comments > 0`.
    pub fn accepts(&self, video: &VideoRecord, query: &EngagementQuery) -> bool {
        if video.view_count < query.min_views {
            return false;
        }

        let comments_ok = match video.comment_count {
            Some(count) => count >= query.min_comments,
            None => query.min_comments == 0,
        };
        if !comments_ok {
            return false;
        }

        match query.since_cutoff {
            Some(cutoff) => video.published_at >= cutoff,
            None => true,
        }
    }

    /// Keep accepted videos in their input order.
    pub fn apply(&self, videos: Vec<VideoRecord>, query: &EngagementQuery) -> Vec<VideoRecord> {
        let before = videos.len();
        let kept: Vec<VideoRecord> = videos
            .into_iter()
            .filter(|video| self.accepts(video, query))
            .collect();
        log::debug!("Engagement filter kept {} of {} videos", kept.len(), before);
        kept
    }
}

/// Convenience function to filter videos.
pub fn filter_videos(videos: Vec<VideoRecord>, query: &EngagementQuery) -> Vec<VideoRecord> {
    EngagementFilter::new().apply(videos, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::fake::{day, video};

    fn ids(videos: &[VideoRecord]) -> Vec<&str> {
        videos.iter().map(|v| v.video_id.as_str()).collect()
    }

    #[test]
    fn test_no_thresholds_keeps_everything() {
        let videos = vec![
            video("a", 0, None, day(1)),
            video("b", 5, Some(0), day(2)),
        ];
        let kept = filter_videos(videos.clone(), &EngagementQuery::default());
        assert_eq!(kept, videos);
    }

    #[test]
    fn test_min_views_is_inclusive() {
        let query = EngagementQuery {
            min_views: 100,
            ..EngagementQuery::default()
        };
        let videos = vec![
            video("a", 99, Some(1), day(1)),
            video("b", 100, Some(1), day(1)),
            video("c", 101, Some(1), day(1)),
        ];
        assert_eq!(ids(&filter_videos(videos, &query)), vec!["b", "c"]);
    }

    #[test]
    fn test_missing_comment_count() {
        let videos = vec![video("a", 10, None, day(1)), video("b", 10, Some(5), day(1))];

        let lenient = EngagementQuery::default();
        assert_eq!(ids(&filter_videos(videos.clone(), &lenient)), vec!["a", "b"]);

        let strict = EngagementQuery {
            min_comments: 1,
            ..EngagementQuery::default()
        };
        assert_eq!(ids(&filter_videos(videos, &strict)), vec!["b"]);
    }

    #[test]
    fn test_since_cutoff_is_inclusive() {
        let query = EngagementQuery {
            since_cutoff: Some(day(10)),
            ..EngagementQuery::default()
        };
        let videos = vec![
            video("old", 10, Some(1), day(9)),
            video("edge", 10, Some(1), day(10)),
            video("new", 10, Some(1), day(11)),
        ];
        assert_eq!(ids(&filter_videos(videos, &query)), vec!["edge", "new"]);
    }

    #[test]
    fn test_predicates_combine_and_order_is_preserved() {
        let query = EngagementQuery {
            min_views: 50,
            min_comments: 5,
            since_cutoff: Some(day(5)),
            ..EngagementQuery::default()
        };
        let videos = vec![
            video("z", 500, Some(50), day(20)),
            video("low-views", 10, Some(50), day(20)),
            video("m", 60, Some(5), day(6)),
            video("too-old", 500, Some(50), day(1)),
            video("a", 50, Some(9), day(5)),
        ];
        assert_eq!(ids(&filter_videos(videos, &query)), vec!["z", "m", "a"]);
    }
}
