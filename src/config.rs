//! Suggestion service configuration read from environment variables.

use std::time::Duration;

use crate::error::SuggestionError;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const MODEL_VAR: &str = "STICKER_VISION_MODEL";
pub const BASE_URL_VAR: &str = "STICKER_VISION_BASE_URL";
pub const TIMEOUT_VAR: &str = "STICKER_VISION_TIMEOUT_SECS";

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl SuggestionConfig {
    /// Build the config from the process environment.
    ///
    /// Required: `OPENAI_API_KEY`.
    /// Optional: `STICKER_VISION_MODEL`, `STICKER_VISION_BASE_URL`,
    /// `STICKER_VISION_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, SuggestionError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the config from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SuggestionError> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| SuggestionError::MissingApiKey { var: API_KEY_VAR.into() })?;

        let model = lookup(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = lookup(BASE_URL_VAR)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = match lookup(TIMEOUT_VAR) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| SuggestionError::InvalidConfig {
                var: TIMEOUT_VAR.into(),
                value: raw,
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            model,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
