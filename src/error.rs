use thiserror::Error;

/// Result type for link extraction
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Failure to retrieve the page
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("HTTP error {status} fetching {url}")]
    Status { url: String, status: u16 },

    /// Connection, TLS or body read failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl FetchError {
    /// HTTP status code, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Request(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// Errors raised while extracting links from a page
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid source URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to read config: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
