// src/models/report.rs

//! Keyword statistics and the analysis report handed to the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{MatchMode, VideoRecord};

/// Match statistics for one term within one video's comments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TermStats {
    /// Normalized term
    pub term: String,

    /// Number of distinct comments containing the term
    pub count: usize,

    /// Original text of the first matching comments, in fetch order
    pub samples: Vec<String>,
}

impl TermStats {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            count: 0,
            samples: Vec::new(),
        }
    }

    pub fn is_hit(&self) -> bool {
        self.count > 0
    }
}

/// Keyword statistics for one video.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordMatch {
    /// One entry per query term, in query order. Zero-hit terms are kept.
    pub terms: Vec<TermStats>,

    /// Overall verdict under the query's match mode
    pub matched: bool,

    /// Number of comments inspected
    pub comments_scanned: usize,
}

impl KeywordMatch {
    /// Stats for a single term.
    pub fn get(&self, term: &str) -> Option<&TermStats> {
        self.terms.iter().find(|stats| stats.term == term)
    }

    /// Sum of the per-term comment counts.
    pub fn total_hits(&self) -> usize {
        self.terms.iter().map(|stats| stats.count).sum()
    }
}

/// Why a video has no keyword statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum UnavailableReason {
    /// The source reported comments as turned off
    CommentsDisabled,
    /// The comment source failed for this video
    SourceFailed(String),
}

/// Per-video result of the comment stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommentOutcome {
    /// Comments were fetched and matched
    Analyzed(KeywordMatch),
    /// Comments could not be read; the rest of the run continued
    Unavailable { reason: UnavailableReason },
}

/// One ranked video and what was found in its comments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoAnalysis {
    /// 1-based position in the ranked candidate list
    pub rank: usize,

    pub video: VideoRecord,

    pub outcome: CommentOutcome,
}

impl VideoAnalysis {
    /// True when comments were analyzed and the match policy was satisfied.
    pub fn is_match(&self) -> bool {
        matches!(&self.outcome, CommentOutcome::Analyzed(m) if m.matched)
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self.outcome, CommentOutcome::Unavailable { .. })
    }

    pub fn keyword_match(&self) -> Option<&KeywordMatch> {
        match &self.outcome {
            CommentOutcome::Analyzed(m) => Some(m),
            CommentOutcome::Unavailable { .. } => None,
        }
    }
}

/// Output of a keyword analysis run, ordered by rank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisReport {
    /// Search text that produced the candidates
    pub query: String,

    /// Normalized terms that were searched for
    pub terms: Vec<String>,

    pub match_mode: MatchMode,

    pub generated_at: DateTime<Utc>,

    pub entries: Vec<VideoAnalysis>,
}

impl AnalysisReport {
    pub fn matched_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_match()).count()
    }

    pub fn unavailable_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_unavailable()).count()
    }

    /// Entries whose comments satisfied the match policy, in rank order.
    pub fn iter_matches(&self) -> impl Iterator<Item = &VideoAnalysis> {
        self.entries.iter().filter(|e| e.is_match())
    }
}
