// src/services/aggregator.rs

//! Multi-page search aggregation.

use std::collections::HashSet;

use crate::error::Result;
use crate::models::{EngagementQuery, VideoRecord};
use crate::sources::SearchSource;

/// Drives page fetches through a [`SearchSource`] and concatenates the results.
pub struct SearchAggregator<'a> {
    source: &'a dyn SearchSource,
}

impl<'a> SearchAggregator<'a> {
    pub fn new(source: &'a dyn SearchSource) -> Self {
        Self { source }
    }

    /// Fetch up to `query.pages` pages for `query_text`.
    ///
    /// Stops early once the source reports no further pages. Records keep
    /// source order within and across pages; a video id seen on an earlier
    /// page is not repeated. Any page failure aborts the whole aggregation.
    pub async fn aggregate(
        &self,
        query_text: &str,
        query: &EngagementQuery,
    ) -> Result<Vec<VideoRecord>> {
        query.validate()?;

        let mut videos = Vec::new();
        let mut seen = HashSet::new();
        let mut page_token: Option<String> = None;

        for page_number in 1..=query.pages {
            let page = self
                .source
                .search_page(query_text, page_token.as_deref(), query.per_page)
                .await
                .map_err(|e| e.into_source(format!("search page {page_number}")))?;

            let fetched = page.videos.len();
            let last = page.is_last();
            for video in page.videos {
                if seen.insert(video.video_id.clone()) {
                    videos.push(video);
                }
            }
            log::debug!(
                "Search page {}/{} for {:?}: {} results",
                page_number,
                query.pages,
                query_text,
                fetched
            );

            if last {
                break;
            }
            page_token = page.next_page_token;
        }

        log::info!(
            "Aggregated {} videos for {:?}",
            videos.len(),
            query_text
        );
        Ok(videos)
    }
}

/// Convenience function to aggregate search pages.
pub async fn aggregate(
    query_text: &str,
    query: &EngagementQuery,
    source: &dyn SearchSource,
) -> Result<Vec<VideoRecord>> {
    SearchAggregator::new(source).aggregate(query_text, query).await
}
