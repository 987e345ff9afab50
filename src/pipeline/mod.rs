//! Pipeline entry points for engine runs.
//!
//! - `run_search`: Aggregate, filter and rank search results
//! - `run_keyword_analysis`: Rank, fetch comments and match keywords

pub mod analyze;
pub mod search;

pub use analyze::{AnalysisOptions, analyze_videos, run_keyword_analysis};
pub use search::run_search;
