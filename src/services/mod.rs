//! Service layer for the engine.
//!
//! This module contains the stages of the pipeline:
//! - Search aggregation (`SearchAggregator`)
//! - Engagement filtering (`EngagementFilter`)
//! - Ranking (`Ranker`)
//! - Comment fetching (`CommentFetcher`)
//! - Keyword matching (`KeywordMatcher`)

mod aggregator;
mod comments;
mod filter;
mod matcher;
mod ranker;

pub use aggregator::{SearchAggregator, aggregate};
pub use comments::{CommentFetch, CommentFetcher, MAX_BATCH_SIZE};
pub use filter::{EngagementFilter, filter_videos};
pub use matcher::{KeywordMatcher, match_comments};
pub use ranker::{Ranker, rank_videos};
