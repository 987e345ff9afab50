// src/output/json.rs

//! JSON rendering for machine consumers.

use serde::Serialize;

use crate::error::Result;
use crate::models::{AnalysisReport, VideoRecord};

#[derive(Serialize)]
struct VideoRow<'a> {
    rank: usize,
    #[serde(flatten)]
    video: &'a VideoRecord,
    url: String,
}

/// Ranked videos as a pretty-printed JSON array, each with its watch URL.
pub fn videos_to_json(videos: &[VideoRecord]) -> Result<String> {
    let rows: Vec<VideoRow<'_>> = videos
        .iter()
        .enumerate()
        .map(|(i, video)| VideoRow {
            rank: i + 1,
            video,
            url: video.url(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

/// The full analysis report as pretty-printed JSON.
pub fn report_to_json(report: &AnalysisReport, only_matches: bool) -> Result<String> {
    if !only_matches {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    let mut trimmed = report.clone();
    trimmed
        .entries
        .retain(|e| e.is_match() || e.is_unavailable());
    Ok(serde_json::to_string_pretty(&trimmed)?)
}
