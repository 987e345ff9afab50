// src/pipeline/analyze.rs

//! Keyword analysis pipeline.
//!
//! Ranks candidates, scans the top videos' comments and assembles the report.
//! A comment failure on one video is recorded in its entry and the run goes on.

use chrono::Utc;

use crate::error::Result;
use crate::models::{
    AnalysisReport, ClientConfig, CommentOutcome, EngagementQuery, KeywordQuery,
    UnavailableReason, VideoAnalysis, VideoRecord,
};
use crate::pipeline::run_search;
use crate::services::{CommentFetch, CommentFetcher, KeywordMatcher, MAX_BATCH_SIZE};
use crate::sources::{CommentSource, SearchSource};

/// Tuning for the comment stage.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    /// Videos whose comments are fetched at the same time
    pub max_concurrent: usize,
    /// Comments requested per batch
    pub batch_size: u32,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            max_concurrent: 1,
            batch_size: MAX_BATCH_SIZE,
        }
    }
}

impl From<&ClientConfig> for AnalysisOptions {
    fn from(config: &ClientConfig) -> Self {
        Self {
            max_concurrent: config.max_concurrent,
            batch_size: config.comment_batch_size,
        }
    }
}

/// Run search, ranking and keyword analysis end to end.
///
/// Both queries are validated before any collaborator is called.
pub async fn run_keyword_analysis(
    query_text: &str,
    engagement: &EngagementQuery,
    keywords: &KeywordQuery,
    search: &dyn SearchSource,
    comments: &dyn CommentSource,
    options: AnalysisOptions,
) -> Result<AnalysisReport> {
    engagement.validate()?;
    keywords.validate()?;

    let ranked = run_search(query_text, engagement, search).await?;
    let candidates: Vec<VideoRecord> = ranked.into_iter().take(keywords.top_videos).collect();

    analyze_videos(query_text, candidates, keywords, comments, options).await
}

/// Scan comments for an already ranked list of videos.
///
/// Entries keep the order of `videos`.
pub async fn analyze_videos(
    query_text: &str,
    videos: Vec<VideoRecord>,
    keywords: &KeywordQuery,
    comments: &dyn CommentSource,
    options: AnalysisOptions,
) -> Result<AnalysisReport> {
    keywords.validate()?;

    let fetcher = CommentFetcher::new(comments).with_batch_size(options.batch_size);
    let fetched = fetcher
        .fetch_many(&videos, keywords.comments_per_video, options.max_concurrent)
        .await;

    let matcher = KeywordMatcher::new();
    let entries: Vec<VideoAnalysis> = videos
        .into_iter()
        .zip(fetched)
        .enumerate()
        .map(|(index, (video, result))| {
            let outcome = match result {
                Ok(CommentFetch::Fetched(records)) => {
                    CommentOutcome::Analyzed(matcher.match_comments(&records, keywords))
                }
                Ok(CommentFetch::Disabled) => {
                    log::warn!("Comments disabled for {} ({})", video.video_id, video.title);
                    CommentOutcome::Unavailable {
                        reason: UnavailableReason::CommentsDisabled,
                    }
                }
                Err(error) => {
                    log::warn!("Comments unavailable for {}: {}", video.video_id, error);
                    CommentOutcome::Unavailable {
                        reason: UnavailableReason::SourceFailed(error.to_string()),
                    }
                }
            };
            VideoAnalysis {
                rank: index + 1,
                video,
                outcome,
            }
        })
        .collect();

    let report = AnalysisReport {
        query: query_text.to_string(),
        terms: keywords.terms().to_vec(),
        match_mode: keywords.match_mode,
        generated_at: Utc::now(),
        entries,
    };

    log::info!(
        "Keyword analysis {:?}: {} videos scanned, {} matched, {} unavailable",
        query_text,
        report.entries.len(),
        report.matched_count(),
        report.unavailable_count()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::models::MatchMode;
    use crate::sources::fake::{FakeComments, FakeSearch, Thread, day, video};

    fn search() -> FakeSearch {
        FakeSearch::new(vec![vec![
            video("third", 10, Some(3), day(1)),
            video("first", 300, Some(3), day(1)),
            video("second", 200, None, day(1)),
            video("fourth", 5, Some(1), day(1)),
        ]])
    }

    fn comments() -> FakeComments {
        FakeComments::new()
            .with_texts(
                "first",
                &["great build, pob linked", "POB pob POB", "no mention here"],
            )
            .with_thread("second", Thread::Disabled)
            .with_thread("third", Thread::Failing)
            .with_texts("fourth", &["buff incoming"])
    }

    fn ids(report: &AnalysisReport) -> Vec<&str> {
        report
            .entries
            .iter()
            .map(|e| e.video.video_id.as_str())
            .collect()
    }

    #[tokio::test]
    async fn test_report_keeps_rank_order_and_marks_unavailable() {
        let keywords = KeywordQuery::from_csv("pob", MatchMode::Any)
            .unwrap()
            .with_top_videos(3);
        let report = run_keyword_analysis(
            "poe build",
            &EngagementQuery::default(),
            &keywords,
            &search(),
            &comments(),
            AnalysisOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(ids(&report), vec!["first", "second", "third"]);
        assert_eq!(
            report.entries.iter().map(|e| e.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        let first = report.entries[0].keyword_match().unwrap();
        assert_eq!(first.get("pob").unwrap().count, 2);
        assert!(report.entries[0].is_match());

        assert_eq!(
            report.entries[1].outcome,
            CommentOutcome::Unavailable {
                reason: UnavailableReason::CommentsDisabled
            }
        );
        assert!(matches!(
            report.entries[2].outcome,
            CommentOutcome::Unavailable {
                reason: UnavailableReason::SourceFailed(_)
            }
        ));
        assert_eq!(report.matched_count(), 1);
        assert_eq!(report.unavailable_count(), 2);
        assert_eq!(report.terms, vec!["pob"]);
    }

    #[tokio::test]
    async fn test_all_mode_needs_every_term() {
        let keywords = KeywordQuery::from_csv("pob,buff", MatchMode::All).unwrap();
        let report = run_keyword_analysis(
            "poe build",
            &EngagementQuery::default(),
            &keywords,
            &search(),
            &comments(),
            AnalysisOptions::default(),
        )
        .await
        .unwrap();

        let first = report.entries[0].keyword_match().unwrap();
        assert_eq!(first.get("pob").unwrap().count, 2);
        assert_eq!(first.get("buff").unwrap().count, 0);
        assert!(!report.entries[0].is_match());
        assert!(!report.entries[3].is_match());
        assert_eq!(report.matched_count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_fetches_keep_rank_order() {
        let comments = comments()
            .with_delay("first", Duration::from_millis(40))
            .with_delay("second", Duration::from_millis(20));
        let keywords = KeywordQuery::from_csv("pob,buff", MatchMode::Any).unwrap();
        let options = AnalysisOptions {
            max_concurrent: 4,
            ..AnalysisOptions::default()
        };

        let report = run_keyword_analysis(
            "poe build",
            &EngagementQuery::default(),
            &keywords,
            &search(),
            &comments,
            options,
        )
        .await
        .unwrap();

        assert_eq!(ids(&report), vec!["first", "second", "third", "fourth"]);
        assert!(report.entries[3].is_match());
    }

    #[tokio::test]
    async fn test_invalid_queries_fail_before_any_fetch() {
        let search = search();
        let comments = comments();
        let keywords = KeywordQuery::from_csv("pob", MatchMode::Any)
            .unwrap()
            .with_comments_per_video(0);

        let err = run_keyword_analysis(
            "poe build",
            &EngagementQuery::default(),
            &keywords,
            &search,
            &comments,
            AnalysisOptions::default(),
        )
        .await
        .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(search.calls(), 0);
        assert!(comments.requests().is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_aborts_the_run() {
        let search = search().failing_at(0);
        let comments = comments();
        let keywords = KeywordQuery::from_csv("pob", MatchMode::Any).unwrap();

        let err = run_keyword_analysis(
            "poe build",
            &EngagementQuery::default(),
            &keywords,
            &search,
            &comments,
            AnalysisOptions::default(),
        )
        .await
        .unwrap_err();

        assert!(err.is_source());
        assert!(comments.requests().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_videos_uses_given_order() {
        let videos = vec![video("fourth", 1, None, day(1)), video("first", 1, None, day(1))];
        let keywords = KeywordQuery::from_csv("buff", MatchMode::Any).unwrap();

        let report = analyze_videos(
            "manual",
            videos,
            &keywords,
            &comments(),
            AnalysisOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(ids(&report), vec!["fourth", "first"]);
        assert!(report.entries[0].is_match());
        assert!(!report.entries[1].is_match());
    }
}
