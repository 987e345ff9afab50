// src/models/mod.rs

//! Domain models for the ranking and keyword engine.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod page;
mod query;
mod report;
mod video;

// Re-export all public types
pub use config::{ApiConfig, ClientConfig, Config, KeywordDefaults, SearchDefaults};
pub use page::{CommentBatch, ResultPage};
pub use query::{EngagementQuery, KeywordQuery, MAX_PER_PAGE, MatchMode, SortKey, parse_since};
pub use report::{
    AnalysisReport, CommentOutcome, KeywordMatch, TermStats, UnavailableReason, VideoAnalysis,
};
pub use video::{CommentRecord, VideoRecord};
