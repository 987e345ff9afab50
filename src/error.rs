// src/error.rs

//! Unified error handling for the engine and its collaborators.

use std::fmt;

use thiserror::Error;

/// Result type alias for radar operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// A search or comment collaborator failed to deliver a page
    #[error("Source error for {context}: {message}")]
    Source { context: String, message: String },

    /// Query options were malformed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl AppError {
    /// Create a source error with context.
    pub fn source(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Source {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Re-tag any failure as a source error for `context`.
    ///
    /// Source errors keep their original context.
    pub fn into_source(self, context: impl Into<String>) -> Self {
        match self {
            source @ Self::Source { .. } => source,
            other => Self::source(context, other),
        }
    }

    /// True for failures reported by (or while talking to) a collaborator.
    pub fn is_source(&self) -> bool {
        matches!(self, Self::Source { .. } | Self::Http(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
