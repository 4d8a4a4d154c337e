use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A call that could not complete at the network level.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: BoxError,
    },
    #[error("email cannot be sent as a request header: {0}")]
    InvalidEmailHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("probe cancelled")]
    Cancelled,
}

impl TransportError {
    pub fn request(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Request {
            url: url.into(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
