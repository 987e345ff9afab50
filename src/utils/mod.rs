//! Utility functions and helpers.

pub mod http;

use unicode_segmentation::UnicodeSegmentation;

/// Shorten `text` to at most `max` graphemes, marking the cut with `…`.
pub fn truncate_graphemes(text: &str, max: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max {
        return text.to_string();
    }
    let mut out: String = graphemes[..max.saturating_sub(1)].concat();
    out.push('…');
    out
}

/// Collapse runs of whitespace (including newlines) into single spaces.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_graphemes() {
        assert_eq!(truncate_graphemes("short", 10), "short");
        assert_eq!(truncate_graphemes("abcdefgh", 5), "abcd…");
        assert_eq!(truncate_graphemes("héllo wörld", 6), "héllo…");
    }

    #[test]
    fn test_truncate_keeps_combined_characters_whole() {
        let flags = "🇰🇷🇯🇵🇺🇸";
        assert_eq!(truncate_graphemes(flags, 2), "🇰🇷…");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("  line one\n\nline   two "), "line one line two");
    }
}
