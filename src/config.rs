// src/config.rs

//! Configuration loading utilities.
//!
//! This module resolves the API credential and loads the validated config
//! file. The engine itself never reads process state; callers pass the
//! resolved key into the source constructors.

use std::env;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::Config;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// Resolve the API key: `YOUTUBE_API_KEY` first, then `api.key` from config.
pub fn resolve_api_key(config: &Config) -> Result<String> {
    resolve_api_key_from(env::var(API_KEY_ENV).ok(), config)
}

/// Resolve the API key from an explicit environment value.
pub fn resolve_api_key_from(env_value: Option<String>, config: &Config) -> Result<String> {
    let non_empty = |value: &str| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };

    env_value
        .as_deref()
        .and_then(non_empty)
        .or_else(|| config.api.key.as_deref().and_then(non_empty))
        .ok_or_else(|| {
            AppError::config(format!(
                "{API_KEY_ENV} not set. Export it or add `key` under [api] in the config file."
            ))
        })
}

/// Load the config file (falling back to defaults when absent) and validate it.
pub fn load_validated(path: &Path) -> Result<Config> {
    let config = if path.exists() {
        Config::load(path)?
    } else {
        log::warn!("Config file {} not found. Using defaults.", path.display());
        Config::default()
    };

    config
        .validate()
        .map_err(|e| AppError::config(format!("Invalid config {}: {e}", path.display())))?;
    Ok(config)
}
