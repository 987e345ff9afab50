// src/pipeline/search.rs

//! Search → filter → rank pipeline.

use crate::error::Result;
use crate::models::{EngagementQuery, VideoRecord};
use crate::services::{EngagementFilter, Ranker, SearchAggregator};
use crate::sources::SearchSource;

/// Run a ranked engagement search.
///
/// Returns at most `query.top` videos, every one of them passing the
/// engagement filter, in rank order.
pub async fn run_search(
    query_text: &str,
    query: &EngagementQuery,
    source: &dyn SearchSource,
) -> Result<Vec<VideoRecord>> {
    query.validate()?;

    let aggregated = SearchAggregator::new(source)
        .aggregate(query_text, query)
        .await?;
    let filtered = EngagementFilter::new().apply(aggregated, query);
    let ranked = Ranker::new(query.sort).rank(filtered, query.top);

    log::info!(
        "Search {:?}: {} ranked videos by {}",
        query_text,
        ranked.len(),
        query.sort
    );
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortKey;
    use crate::sources::fake::{FakeSearch, day, video};

    fn source() -> FakeSearch {
        FakeSearch::new(vec![
            vec![
                video("older", 100, Some(4), day(1)),
                video("tiny", 5, Some(0), day(9)),
            ],
            vec![
                video("newer", 100, Some(2), day(2)),
                video("newest", 50, Some(9), day(3)),
            ],
        ])
    }

    #[tokio::test]
    async fn test_ranked_top_two_by_views() {
        let query = EngagementQuery {
            top: 2,
            min_views: 10,
            ..EngagementQuery::default()
        };
        let ranked = run_search("poe", &query, &source()).await.unwrap();
        let ids: Vec<&str> = ranked.iter().map(|v| v.video_id.as_str()).collect();
        assert_eq!(ids, vec!["newer", "older"]);
    }

    #[tokio::test]
    async fn test_results_respect_top_and_filters() {
        let query = EngagementQuery {
            top: 3,
            sort: SortKey::Comments,
            min_comments: 1,
            since_cutoff: Some(day(2)),
            ..EngagementQuery::default()
        };
        let ranked = run_search("poe", &query, &source()).await.unwrap();

        assert!(ranked.len() <= query.top);
        assert!(ranked.iter().all(|v| EngagementFilter::new().accepts(v, &query)));
        let ids: Vec<&str> = ranked.iter().map(|v| v.video_id.as_str()).collect();
        assert_eq!(ids, vec!["newest", "newer"]);
    }

    #[tokio::test]
    async fn test_search_failure_is_not_suppressed() {
        let source = source().failing_at(1);
        let err = run_search("poe", &EngagementQuery::default(), &source)
            .await
            .unwrap_err();
        assert!(err.is_source());
    }
}
