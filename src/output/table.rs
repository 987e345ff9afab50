// src/output/table.rs

//! Plain-text tables for terminal output.

use unicode_segmentation::UnicodeSegmentation;

use crate::models::{AnalysisReport, CommentOutcome, UnavailableReason, VideoRecord};
use crate::utils::{single_line, truncate_graphemes};

const TITLE_WIDTH: usize = 60;
const SAMPLE_WIDTH: usize = 200;

/// Render ranked search results.
pub fn render_videos(videos: &[VideoRecord]) -> String {
    if videos.is_empty() {
        return "No videos matched the search and filters.\n".to_string();
    }

    let headers = ["#", "views", "comments", "published", "title", "url"];
    let rows: Vec<Vec<String>> = videos
        .iter()
        .enumerate()
        .map(|(i, video)| {
            vec![
                (i + 1).to_string(),
                video.view_count.to_string(),
                video
                    .comment_count
                    .map_or_else(|| "-".to_string(), |c| c.to_string()),
                video.published_at.format("%Y-%m-%d").to_string(),
                truncate_graphemes(&single_line(&video.title), TITLE_WIDTH),
                video.url(),
            ]
        })
        .collect();

    render_table(&headers, &rows)
}

/// Render a keyword analysis report with sample comments.
///
/// With `only_matches`, videos that did not satisfy the match policy are left
/// out of the table; unavailable videos are always listed.
pub fn render_report(report: &AnalysisReport, only_matches: bool) -> String {
    let mut out = format!(
        "Terms: {} (match {})\n",
        report.terms.join(", "),
        report.match_mode
    );

    let entries: Vec<_> = report
        .entries
        .iter()
        .filter(|e| !only_matches || e.is_match() || e.is_unavailable())
        .collect();

    if entries.is_empty() {
        out.push_str("No keyword matches found in fetched comments.\n");
        return out;
    }

    let mut headers = vec!["#".to_string(), "match".to_string()];
    headers.extend(report.terms.iter().cloned());
    headers.extend(["scanned".to_string(), "title".to_string()]);

    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|entry| {
            let mut row = vec![entry.rank.to_string()];
            match &entry.outcome {
                CommentOutcome::Analyzed(m) => {
                    row.push(if m.matched { "yes" } else { "no" }.to_string());
                    row.extend(m.terms.iter().map(|t| t.count.to_string()));
                    row.push(m.comments_scanned.to_string());
                }
                CommentOutcome::Unavailable { reason } => {
                    row.push(unavailable_label(reason).to_string());
                    row.extend(report.terms.iter().map(|_| "-".to_string()));
                    row.push("-".to_string());
                }
            }
            row.push(truncate_graphemes(
                &single_line(&entry.video.title),
                TITLE_WIDTH,
            ));
            row
        })
        .collect();

    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    out.push_str(&render_table(&header_refs, &rows));

    for entry in entries.iter().filter(|e| e.is_match()) {
        let Some(m) = entry.keyword_match() else {
            continue;
        };
        out.push_str(&format!(
            "\n--- #{} {} ({} hits)\n{}\n",
            entry.rank,
            entry.video.title,
            m.total_hits(),
            entry.video.url()
        ));
        for stats in m.terms.iter().filter(|t| t.is_hit()) {
            out.push_str(&format!("[{}] {} comment(s)\n", stats.term, stats.count));
            for sample in &stats.samples {
                out.push_str(&format!(
                    "  - {}\n",
                    truncate_graphemes(&single_line(sample), SAMPLE_WIDTH)
                ));
            }
        }
    }

    for entry in entries.iter().filter(|e| e.is_unavailable()) {
        if let CommentOutcome::Unavailable {
            reason: UnavailableReason::SourceFailed(message),
        } = &entry.outcome
        {
            out.push_str(&format!(
                "\nwarning: #{} comments unavailable: {}\n",
                entry.rank, message
            ));
        }
    }

    out
}

fn unavailable_label(reason: &UnavailableReason) -> &'static str {
    match reason {
        UnavailableReason::CommentsDisabled => "disabled",
        UnavailableReason::SourceFailed(_) => "error",
    }
}

fn display_width(cell: &str) -> usize {
    cell.graphemes(true).count()
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    let fmt_row = |cells: &mut dyn Iterator<Item = &str>| -> String {
        cells
            .enumerate()
            .map(|(i, cell)| {
                let pad = widths[i].saturating_sub(display_width(cell));
                format!("{cell}{}", " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&fmt_row(&mut headers.iter().copied()));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in rows {
        out.push_str(&fmt_row(&mut row.iter().map(String::as_str)));
        out.push('\n');
    }
    out
}
