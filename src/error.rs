use thiserror::Error;

use crate::image::ImageLoadError;

/// Errors from requesting sticker suggestions for a photo
#[derive(Error, Debug)]
pub enum SuggestionError {
    /// The API key environment variable is not set
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// A configuration value could not be parsed
    #[error("invalid config value for {var}: {value}")]
    InvalidConfig { var: String, value: String },

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    #[error("failed to encode image for upload: {0}")]
    Encode(#[from] ImageLoadError),

    #[error("suggestion request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status
    #[error("suggestion service returned status {status}")]
    Response { status: u16, body: String },

    #[error("failed to parse suggestion response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("suggestion response had no text content")]
    EmptyResponse,

    /// The worker thread went away before delivering a result
    #[error("suggestion worker disconnected")]
    WorkerDisconnected,
}

impl SuggestionError {
    /// Whether trying the same request again could succeed
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::Request(_) | Self::Response { status: 429 | 500..=599, .. }
        )
    }
}
