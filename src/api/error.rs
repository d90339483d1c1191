use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Explorer returned HTTP {status}")]
    Status { status: u16 },

    #[error("{message}: {result}")]
    Explorer { message: String, result: String },

    #[error("Unexpected response for '{action}': {source}")]
    Decode {
        action: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Rate limits and transient network failures
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status } => *status == 429 || (500..=504).contains(status),
            Self::Explorer { result, .. } => {
                let lower = result.to_lowercase();
                lower.contains("rate limit") || lower.contains("too many")
            }
            Self::InvalidUrl(_) | Self::Decode { .. } => false,
        }
    }
}
