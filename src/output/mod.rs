//! Presentation of search results and analysis reports.

pub mod json;
pub mod table;

pub use json::{report_to_json, videos_to_json};
pub use table::{render_report, render_videos};
