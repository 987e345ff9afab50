// src/services/matcher.rs

//! Keyword matching over comment text.
//!
//! Terms are raw case-insensitive substrings, not words: `pob` also matches
//! inside `problem`. A comment adds at most one to a term's count no matter
//! how often the term repeats inside it.

use crate::models::{CommentRecord, KeywordMatch, KeywordQuery, MatchMode, TermStats};

/// Computes per-term statistics for one video's comments.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordMatcher;

impl KeywordMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Match `comments` against the query terms.
    ///
    /// Every query term appears in the result, zero-hit terms included.
    pub fn match_comments(&self, comments: &[CommentRecord], query: &KeywordQuery) -> KeywordMatch {
        let mut stats: Vec<TermStats> = query.terms().iter().map(TermStats::new).collect();

        for comment in comments {
            let folded = comment.text.to_lowercase();
            for term_stats in stats.iter_mut() {
                if !folded.contains(term_stats.term.as_str()) {
                    continue;
                }
                term_stats.count += 1;
                if term_stats.samples.len() < query.sample_limit {
                    term_stats.samples.push(comment.text.clone());
                }
            }
        }

        let matched = match query.match_mode {
            MatchMode::Any => stats.iter().any(TermStats::is_hit),
            MatchMode::All => stats.iter().all(TermStats::is_hit),
        };

        KeywordMatch {
            terms: stats,
            matched,
            comments_scanned: comments.len(),
        }
    }
}

/// Convenience function to match comments.
pub fn match_comments(comments: &[CommentRecord], query: &KeywordQuery) -> KeywordMatch {
    KeywordMatcher::new().match_comments(comments, query)
}
