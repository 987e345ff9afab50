// src/lib.rs

//! yt-radar Engagement Library
//!
//! Searches for videos, ranks them by engagement and scans their comments
//! for keywords.

pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod services;
pub mod sources;
pub mod utils;
