//! Collaborator contracts for search results and comment text.
//!
//! The engine only talks to these traits. `youtube` provides the Data API v3
//! implementation; tests drive the engine through in-memory fakes.

pub mod youtube;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CommentBatch, ResultPage};

// Re-export for convenience
pub use youtube::YouTubeApi;

/// Paginated video search.
#[async_trait]
pub trait SearchSource: Send + Sync {
    /// Fetch one page of results.
    ///
    /// `page_token` is `None` for the first page. Exhaustion is signalled by a
    /// page whose `next_page_token` is `None`.
    async fn search_page(
        &self,
        query: &str,
        page_token: Option<&str>,
        per_page: u32,
    ) -> Result<ResultPage>;
}

/// Paginated comment text for a single video.
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Fetch one batch of comment text.
    ///
    /// Returns [`CommentBatch::Disabled`] when the video does not accept
    /// comments, which is distinct from an empty page.
    async fn comment_batch(
        &self,
        video_id: &str,
        batch_token: Option<&str>,
        batch_size: u32,
    ) -> Result<CommentBatch>;
}
